//! XML configuration support (quick_xml + serde).
//!
//! A missing file yields defaults. A malformed file, including unknown
//! elements, is an error so misconfigurations surface early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::Config;
use crate::logger::LogLevel;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    data_dir: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    json_logs: Option<bool>,
}

fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean '{other}'"
        ))),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(PathBuf::from)
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    if let Some(s) = parsed.log_level.as_deref().map(str::trim) {
        if !s.is_empty() {
            cfg.log_level = s
                .parse::<LogLevel>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("log_level")?;
        }
    }
    cfg.log_file = non_empty_path(parsed.log_file.as_deref());
    cfg.data_dir = non_empty_path(parsed.data_dir.as_deref());
    cfg.json_logs = parsed.json_logs.unwrap_or(false);
    Ok(cfg)
}

/// Parse config XML text.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("load config '{}'", path.display()))
}

/// Load the effective config: defaults when the file does not exist.
pub fn load_config() -> Result<(Config, PathBuf)> {
    let path = default_config_path().context("resolve config path")?;
    if path.is_dir() {
        bail!("config path '{}' is a directory", path.display());
    }
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok((Config::default(), path));
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "Loaded config");
    Ok((cfg, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields_with_whitespace() {
        let cfg = parse_config_xml(
            "<config>\n  <log_level> debug </log_level>\n  <log_file>/tmp/x.log</log_file>\n  <data_dir>/games/ja2</data_dir>\n  <json_logs> true </json_logs>\n</config>",
        )
        .unwrap();
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/games/ja2")));
        assert!(cfg.json_logs);
    }

    #[test]
    fn empty_elements_mean_defaults() {
        let cfg = parse_config_xml("<config><log_file></log_file></config>").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_element_is_rejected() {
        assert!(parse_config_xml("<config><colour>red</colour></config>").is_err());
    }

    #[test]
    fn bad_level_is_rejected() {
        let err = parse_config_xml("<config><log_level>loud</log_level></config>").unwrap_err();
        assert!(format!("{err:#}").contains("log_level"));
    }
}
