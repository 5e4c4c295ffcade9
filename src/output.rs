//! User-facing console output for the `sgp_fileman` binary.
//!
//! Status lines carry a short prefix, colored only when the stream they go to
//! is a TTY. Primary results (listings, file contents) go through
//! `print_user` unprefixed so they can be piped.

use owo_colors::OwoColorize;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Aligned `key: value` line, key dimmed on a TTY.
pub fn print_field(key: &str, value: &str) {
    if stdout_tty() {
        println!("{:>10}: {}", key.dimmed(), value);
    } else {
        println!("{:>10}: {}", key, value);
    }
}

/// Print a plain user-facing line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
