use super::StorePaths;
use crate::errors::StorageError;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};
use tickerbook_core::errors::{DatabaseError, Error, Result};

// Type alias for the job to be executed by the writer actor.
// It receives the ledger file paths and returns a core Result.
type Job<T> = Box<dyn FnOnce(&StorePaths) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // Each job is a boxed closure paired with a oneshot sender for the reply.
    // The Box<dyn Any + Send> erases the job's return type.
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer actor, after every job queued before it.
    ///
    /// Jobs never overlap, so a job may read a file, change the rows, and
    /// write it back without another writer interleaving.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&StorePaths) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |paths| job(paths).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| StorageError::WriterUnavailable("writer actor stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            StorageError::WriterUnavailable("writer actor dropped the reply".to_string())
        })??;

        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "unexpected writer actor result type".to_string(),
            ))
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer for the
/// ledger files in `paths`. Jobs are processed one at a time in arrival order.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_writer(paths: StorePaths) -> WriteHandle {
    // Bounded; senders wait when the queue is full.
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = job(&paths);

            // The requester may have gone away (cancelled request).
            let _ = reply_tx.send(result);
        }
        log::debug!("Writer actor for {} stopped", paths.data_dir.display());
    });

    WriteHandle { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_jobs_run_in_order_and_return_values() {
        let dir = tempfile::tempdir().unwrap();
        let writer = spawn_writer(StorePaths::new(dir.path()));
        let counter = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let writer = writer.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                writer
                    .exec(move |_| Ok(counter.fetch_add(1, Ordering::SeqCst)))
                    .await
                    .unwrap()
            }));
        }

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_job_error_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let writer = spawn_writer(StorePaths::new(dir.path()));

        let err = writer
            .exec(|_| -> Result<()> { Err(Error::not_found("row 7")) })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
