//! Thin CLI layer: parse args, styled output, call into getter-core.

mod utils;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use getter_core::config::{self, Config};
use getter_core::http_client::HttpClient;
use getter_core::task_queue::WorkerPool;
use getter_core::{dispatcher, utils as core_utils};

/// Parallel range-based HTTP/1.0 file downloader.
#[derive(Parser, Debug)]
#[command(name = "getter", version, about)]
struct Cli {
    /// Text file with one URL per line (host/page, no scheme).
    url_file: PathBuf,

    /// Number of worker threads to use for ranged downloads.
    num_workers: usize,

    /// Directory to write chunk and output files into.
    download_dir: PathBuf,

    /// Suppress stdout status lines (log file still receives every line).
    #[arg(short, long)]
    quiet: bool,

    /// Path to a JSON config file, overriding the default .getterrc lookup.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run(cli))) {
        Ok(code) => code,
        Err(_) => {
            utils::error("getter crashed unexpectedly");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ExitCode {
    let mut cfg = match &cli.config {
        Some(path) => load_config_from(path),
        None => config::load_config(&cli.download_dir),
    };
    if cli.quiet {
        cfg.quiet = true;
    }
    core_utils::set_quiet(cfg.quiet);

    if let Err(e) = create_download_dir(&cli.download_dir) {
        utils::error(&format!("failed to create download directory: {}", e));
        return ExitCode::FAILURE;
    }

    let urls = match read_url_file(&cli.url_file) {
        Ok(urls) => urls,
        Err(e) => {
            utils::error(&format!("failed to open url file: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let client = Arc::new(HttpClient::new(Duration::from_millis(cfg.request_timeout_ms)));
    let pool = WorkerPool::spawn(cli.num_workers.max(1), Arc::clone(&client));

    utils::dim(&format!(
        "fetching {} url(s) with {} worker(s) on port {}",
        urls.len(),
        pool.worker_count(),
        cfg.port
    ));

    let progress = progress_bar(urls.len() as u64, cfg.quiet);

    let report = dispatcher::run(
        &pool,
        &client,
        &urls,
        &cli.download_dir,
        cfg.port,
        |msg| {
            core_utils::log(&cli.download_dir, msg);
            if let Some(pb) = &progress {
                pb.set_message(msg.to_string());
                if msg.starts_with("downloaded ") {
                    pb.inc(1);
                }
            }
        },
        |msg| {
            core_utils::log_error(&cli.download_dir, msg);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        },
    );
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    pool.shutdown();

    let summary = format!(
        "done: {} succeeded, {} failed, {} bytes written",
        report.succeeded(),
        report.failed(),
        report.total_bytes()
    );
    if report.failed() == 0 {
        utils::success(&summary);
    } else {
        utils::info(&summary);
    }

    ExitCode::SUCCESS
}

fn progress_bar(len: u64, quiet: bool) -> Option<ProgressBar> {
    if quiet || len == 0 || !std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        return None;
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap(),
    );
    Some(pb)
}

fn load_config_from(path: &Path) -> Config {
    match path.parent() {
        Some(dir) if path.file_name().map(|n| n == ".getterrc").unwrap_or(false) => {
            config::load_config(dir)
        }
        _ => config::load_config(path),
    }
}

fn create_download_dir(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(dir)?.permissions();
        perms.set_mode(0o700);
        fs::set_permissions(dir, perms)?;
    }
    Ok(())
}

fn read_url_file(path: &Path) -> std::io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().map(|l| l.to_string()).collect())
}
