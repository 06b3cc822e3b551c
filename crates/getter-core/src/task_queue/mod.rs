//! Bounded blocking queue and the worker pool built on top of it.

pub mod queue;
pub mod worker;

pub use queue::BoundedQueue;
pub use worker::WorkerPool;
