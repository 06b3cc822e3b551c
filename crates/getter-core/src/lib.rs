//! Core library for getter: bounded queue, raw HTTP/1.0 client, sizing
//! policy, worker pool, and chunk reassembly. Used by the CLI binary.

pub mod chunk;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http_client;
pub mod report;
pub mod sizing;
pub mod task;
pub mod task_queue;
pub mod utils;

pub use config::Config;
pub use dispatcher::run as dispatch;
pub use error::GetterError;
pub use http_client::HttpClient;
pub use report::DownloadReport;
pub use sizing::SizingDecision;
pub use task::Task;
pub use task_queue::WorkerPool;
