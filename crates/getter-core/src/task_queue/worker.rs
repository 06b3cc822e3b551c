//! Worker pool: spawns N threads draining `todo` and feeding `done`.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::http_client::HttpClient;
use crate::task::Task;
use crate::task_queue::queue::BoundedQueue;

/// A running pool of worker threads sharing one `todo`/`done` queue pair.
///
/// Lifecycle: `spawn` starts `worker_count` threads, each pulling from
/// `todo` until it observes a `None` sentinel. `shutdown` pushes one
/// sentinel per worker and joins every thread; it must be called exactly
/// once and only after all real work has been enqueued, or workers may
/// consume a sentinel intended to end the pool before their peers do.
pub struct WorkerPool {
    todo: Arc<BoundedQueue<Option<Task>>>,
    done: Arc<BoundedQueue<Task>>,
    handles: Vec<JoinHandle<()>>,
    worker_count: usize,
}

impl WorkerPool {
    /// Spawn `worker_count` workers sharing one client, each reading
    /// ranged tasks from a queue of capacity `2 * worker_count`.
    pub fn spawn(worker_count: usize, client: Arc<HttpClient>) -> Self {
        let worker_count = worker_count.max(1);
        let capacity = worker_count * 2;
        let todo: Arc<BoundedQueue<Option<Task>>> = Arc::new(BoundedQueue::alloc(capacity));
        let done: Arc<BoundedQueue<Task>> = Arc::new(BoundedQueue::alloc(capacity));

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let todo = Arc::clone(&todo);
            let done = Arc::clone(&done);
            let client = Arc::clone(&client);
            handles.push(thread::spawn(move || worker_loop(todo, done, client)));
        }

        Self { todo, done, handles, worker_count }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Enqueue a ranged task for the workers to pick up.
    pub fn submit(&self, task: Task) {
        self.todo.put(Some(task));
    }

    /// Block until one completed task is available.
    pub fn reap(&self) -> Task {
        self.done.get()
    }

    /// Push one sentinel per worker and join every thread. Consumes the
    /// pool; workers have no work left to do once this returns.
    pub fn shutdown(mut self) {
        for _ in 0..self.worker_count {
            self.todo.put(None);
        }
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    todo: Arc<BoundedQueue<Option<Task>>>,
    done: Arc<BoundedQueue<Task>>,
    client: Arc<HttpClient>,
) {
    loop {
        let mut task = match todo.get() {
            Some(task) => task,
            None => return,
        };
        let range = format!("{}-{}", task.min_range, task.max_range);
        task.result = client.get_range(&task.host, &task.page, task.port, &range);
        done.put(task);
    }
}
