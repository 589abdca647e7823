//! Queue of pending input files shared by all workers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use unify_ingest::Ingestor;

/// One input file together with the ingestor resolved for it.
#[derive(Clone)]
pub struct FileRef {
    path: PathBuf,
    ingestor: Arc<dyn Ingestor>,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>, ingestor: Arc<dyn Ingestor>) -> Self {
        Self {
            path: path.into(),
            ingestor,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ingestor(&self) -> &dyn Ingestor {
        self.ingestor.as_ref()
    }
}

impl fmt::Debug for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRef")
            .field("path", &self.path)
            .field("kind", &self.ingestor.kind())
            .finish()
    }
}

/// Multi-producer, multi-consumer queue with non-blocking dequeue.
///
/// Every enqueued file is handed to exactly one caller of
/// [`TaskQueue::dequeue`].
#[derive(Debug)]
pub struct TaskQueue {
    sender: Sender<FileRef>,
    receiver: Receiver<FileRef>,
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn enqueue(&self, file: FileRef) {
        // The queue owns a receiver, so the channel is never disconnected.
        let _ = self.sender.send(file);
    }

    /// Take the next file, or `None` if the queue is currently empty.
    pub fn dequeue(&self) -> Option<FileRef> {
        self.receiver.try_recv().ok()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Mutex;
    use unify_ingest::CsvIngestor;

    fn file(name: &str) -> FileRef {
        FileRef::new(name, Arc::new(CsvIngestor::default()))
    }

    #[test]
    fn dequeue_on_empty_queue_returns_none() {
        let queue = TaskQueue::new();
        assert!(queue.is_empty());
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn files_come_out_in_fifo_order() {
        let queue = TaskQueue::new();
        queue.enqueue(file("a.csv"));
        queue.enqueue(file("b.csv"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue().unwrap().path(), Path::new("a.csv"));
        assert_eq!(queue.dequeue().unwrap().path(), Path::new("b.csv"));
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn concurrent_consumers_receive_each_file_once() {
        let queue = TaskQueue::new();
        for idx in 0..500 {
            queue.enqueue(file(&format!("{idx}.csv")));
        }
        let seen = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    while let Some(file) = queue.dequeue() {
                        seen.lock().unwrap().push(file.path().to_path_buf());
                    }
                });
            }
        });

        let seen = seen.into_inner().unwrap();
        let unique: BTreeSet<_> = seen.iter().collect();
        assert_eq!(seen.len(), 500);
        assert_eq!(unique.len(), 500);
    }
}
