//! Application orchestrator.
//! Loads/merges config, initializes logging, runs one subcommand and reports
//! library errors with their stable code and kind.

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use sgp_fileman::config::load_config;
use sgp_fileman::output as out;
use sgp_fileman::{
    Config, FileAttributes, FileMan, FileManError, TracingSink, file_get_attributes,
    find_all_files_in_dir, find_files_in_dir, find_object_case_insensitive, get_file_name, logger,
    slogd, slogi,
};

use crate::cli::{Args, Command};
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let (mut cfg, cfg_path) = load_config().map_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
        e
    })?;
    args.apply_overrides(&mut cfg);

    // Held until return so the file appender flushes.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), cfg.json_logs).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;
    logger::init(cfg.log_level, Box::new(TracingSink)).context("initialize engine logger")?;
    debug!(config = %cfg_path.display(), ?args, "Starting sgp_fileman");

    let result = dispatch(&args.command, &cfg, &cfg_path);
    if let Err(e) = &result {
        report(e);
    }

    logger::teardown();
    result
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<FileManError>() {
        Some(fe) => error!(code = fe.code(), kind = fe.kind(), error = %fe, "Command failed"),
        None => error!(error = %format!("{e:#}"), "Command failed"),
    }
}

fn folder_str(cfg: &Config, dir: &Path) -> String {
    cfg.resolve(dir).to_string_lossy().into_owned()
}

fn dispatch(command: &Command, cfg: &Config, cfg_path: &Path) -> Result<()> {
    match command {
        Command::Ls {
            dir,
            ext,
            ignore_case,
            names_only,
            sort,
        } => {
            let dir = cfg.resolve(dir);
            let entries = match ext {
                Some(ext) => find_files_in_dir(&dir, ext, *ignore_case, *names_only, *sort)?,
                None if *names_only => find_all_files_in_dir(&dir, *sort)?
                    .iter()
                    .map(|p| get_file_name(p))
                    .collect(),
                None => find_all_files_in_dir(&dir, *sort)?,
            };
            slogd!("Listed {} entries in {}", entries.len(), dir.display());
            for entry in entries {
                out::print_user(&entry);
            }
        }
        Command::Resolve { dir, name } => {
            let dir = cfg.resolve(dir);
            match find_object_case_insensitive(&dir, name, true, true)? {
                Some(found) => out::print_user(&found),
                None => {
                    return Err(FileManError::NotFound(dir.join(name)).into());
                }
            }
        }
        Command::Cat { dir, name } => {
            let fm = FileMan::new();
            let mut file = fm.open_for_reading_case_insensitive(&folder_str(cfg, dir), name)?;
            let text = file.read_text()?;
            slogd!("Read {} bytes of {}", text.len(), name);
            file.close();
            print!("{text}");
        }
        Command::Attrs { path } => {
            let path = cfg.resolve(path);
            let attrs = file_get_attributes(&path)
                .ok_or_else(|| anyhow!("cannot query attributes of '{}'", path.display()))?;
            out::print_field("path", &path.display().to_string());
            out::print_field(
                "directory",
                &attrs.contains(FileAttributes::DIRECTORY).to_string(),
            );
            out::print_field(
                "readonly",
                &attrs.contains(FileAttributes::READONLY).to_string(),
            );
        }
        Command::Mv { from, to } => {
            let (from, to) = (cfg.resolve(from), cfg.resolve(to));
            FileMan::move_file(&from, &to)?;
            slogi!("Moved {} -> {}", from.display(), to.display());
            out::print_success(&format!("moved '{}' -> '{}'", from.display(), to.display()));
        }
        Command::Mkdir { path } => {
            let path = cfg.resolve(path);
            FileMan::create_dir(&path)?;
            out::print_success(&format!("directory '{}' ready", path.display()));
        }
        Command::Rm { path } => {
            let path = cfg.resolve(path);
            FileMan::delete_file(&path)?;
            out::print_success(&format!("removed '{}'", path.display()));
        }
        Command::FreeSpace => {
            out::print_user(&FileMan::free_space()?.to_string());
        }
        Command::PrintConfig => print_config(cfg, cfg_path),
    }
    Ok(())
}

fn print_config(cfg: &Config, cfg_path: &Path) {
    let exists = if cfg_path.exists() { "" } else { " (not present)" };
    out::print_field("config", &format!("{}{}", cfg_path.display(), exists));
    out::print_field("log_level", cfg.log_level.as_str());
    out::print_field("log_file", &display_opt(cfg.log_file.as_ref()));
    out::print_field("data_dir", &display_opt(cfg.data_dir.as_ref()));
    out::print_field("json_logs", &cfg.json_logs.to_string());
}

fn display_opt(p: Option<&PathBuf>) -> String {
    p.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}
