//! Ties sizing, the worker pool, and chunk reassembly together: one URL at
//! a time, fully drained before the next begins.

use std::path::Path;
use std::sync::Arc;

use crate::chunk;
use crate::error::{network_error, GetterError};
use crate::http_client::{self, HttpClient};
use crate::report::DownloadReport;
use crate::sizing::{self, SizingDecision};
use crate::task::Task;
use crate::task_queue::WorkerPool;

/// Download every URL in `urls` into `download_dir` using `pool`, logging
/// progress via `log_fn`/`log_err_fn`. Always returns a report; per-URL
/// failures never abort the run.
pub fn run(
    pool: &WorkerPool,
    client: &Arc<HttpClient>,
    urls: &[String],
    download_dir: &Path,
    port: u16,
    mut log_fn: impl FnMut(&str),
    mut log_err_fn: impl FnMut(&str),
) -> DownloadReport {
    let mut report = DownloadReport::new();

    for url in urls {
        log_fn(&format!("downloading {}", url));
        let decision = sizing::size(client, url, worker_hint(pool), port);

        if decision.num_tasks == 0 {
            log_err_fn(&format!("failed: {} (no tasks; malformed URL or HEAD failed)", url));
            report.record(url.clone(), false, 0);
            continue;
        }

        match dispatch_one(pool, url, &decision, download_dir, port, &mut log_err_fn) {
            Ok((bytes, 0)) => {
                log_fn(&format!("downloaded {} ({} bytes)", url, bytes));
                report.record(url.clone(), true, bytes);
            }
            Ok((bytes, failures)) => {
                log_err_fn(&format!(
                    "{}: {} of {} ranges failed; {} bytes written (partial)",
                    url, failures, decision.num_tasks, bytes
                ));
                report.record(url.clone(), false, bytes);
            }
            Err(e) => {
                log_err_fn(&format!("failed: {} ({})", url, e));
                report.record(url.clone(), false, 0);
            }
        }
    }

    report
}

fn worker_hint(pool: &WorkerPool) -> u32 {
    pool.worker_count() as u32
}

/// Submit every range for `url`, reap exactly `decision.num_tasks`
/// completions, and run the reassembler unconditionally. Returns the bytes
/// written and the count of per-range failures (HTTP failure or chunk-write
/// failure); the reassembler already stops at the first missing chunk and
/// leaves whatever was written in place, so it is run even when some ranges
/// failed rather than being skipped.
fn dispatch_one(
    pool: &WorkerPool,
    url: &str,
    decision: &SizingDecision,
    download_dir: &Path,
    port: u16,
    log_err_fn: &mut impl FnMut(&str),
) -> Result<(u64, u32), GetterError> {
    let (host, page) = http_client::split_url(url)
        .ok_or_else(|| network_error("split_url", None, format!("no '/' in URL: {}", url)))?;

    for i in 0..decision.num_tasks as u64 {
        let min = i * decision.chunk_size;
        let max = (i + 1) * decision.chunk_size - 1;
        pool.submit(Task::new(host.to_string(), page.to_string(), port, min, max));
    }

    let mut failures = 0u32;
    for _ in 0..decision.num_tasks {
        let task = pool.reap();
        match task.result {
            Some(body) => {
                let content = http_client::get_content(&body);
                if let Err(e) = chunk::write_chunk(download_dir, task.min_range, content) {
                    log_err_fn(&format!("chunk write failed for {} at {}: {}", url, task.min_range, e));
                    failures += 1;
                }
            }
            None => {
                log_err_fn(&format!("range request failed for {} at {}", url, task.min_range));
                failures += 1;
            }
        }
    }

    let bytes = chunk::reassemble(download_dir, url, decision.chunk_size, decision.num_tasks)?;
    Ok((bytes, failures))
}
