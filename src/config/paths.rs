//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SGP_FILEMAN_CONFIG";

const APP_DIR: &str = "sgp_fileman";

/// Config path: `$SGP_FILEMAN_CONFIG` if set (relative values are taken from
/// the current directory), else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        if p.is_absolute() {
            return Ok(p);
        }
        let cwd = env::current_dir()?;
        return Ok(dunce::simplified(&cwd.join(p)).to_path_buf());
    }
    if let Some(base) = config_dir() {
        return Ok(base.join(APP_DIR).join("config.xml"));
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join("config.xml"))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no HOME)"))
}

/// OS-appropriate default log file path (data dir). Does not create anything.
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(base) = data_dir() {
        return Ok(base.join(APP_DIR).join("sgp_fileman.log"));
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join(APP_DIR)
                .join("sgp_fileman.log")
        })
        .ok_or_else(|| anyhow!("cannot determine a data directory (no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_app_file() {
        if let Ok(p) = default_log_path() {
            assert!(p.ends_with("sgp_fileman/sgp_fileman.log"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("app.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("app.log")).unwrap());
    }
}
