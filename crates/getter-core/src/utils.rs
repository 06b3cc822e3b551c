//! Timestamped logging to stdout and to `<download_dir>/getter.log`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use chrono::Local;

pub const LOG_FILE: &str = "getter.log";

static QUIET: OnceLock<bool> = OnceLock::new();

/// Set whether `log` should print to stdout. Call once, before spawning any
/// workers; later calls are ignored (matches `OnceLock`'s set-once contract).
pub fn set_quiet(quiet: bool) {
    let _ = QUIET.set(quiet);
}

fn is_quiet() -> bool {
    QUIET.get().copied().unwrap_or(false)
}

/// Timestamp `message`, print it to stdout unless quiet, and append it to
/// `<download_dir>/getter.log` regardless of quiet mode.
pub fn log(download_dir: &Path, message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let line = format!("[{}] {}", timestamp, message);

    if !is_quiet() {
        println!("{}", line);
    }
    append_log_line(download_dir, &line);
}

/// Like `log`, but also prints to stderr regardless of quiet mode, for
/// diagnostics the operator should see even with `-q`.
pub fn log_error(download_dir: &Path, message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let line = format!("[{}] {}", timestamp, message);

    eprintln!("{}", line);
    append_log_line(download_dir, &line);
}

fn append_log_line(download_dir: &Path, line: &str) {
    let _ = fs::create_dir_all(download_dir);
    let log_path = download_dir.join(LOG_FILE);
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = writeln!(file, "{}", line);
    }
}
