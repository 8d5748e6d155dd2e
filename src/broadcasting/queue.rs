//! Named, fire-and-forget broadcast queues.
//!
//! Every queue name gets its own unbounded channel and worker task, created
//! the first time something is pushed onto it. Workers deliver through the
//! shared [`Broadcaster`] and log failures; nothing is retried. A worker that
//! has died is replaced on the next push to its queue.

use std::sync::Arc;

use dashmap::DashMap;
use jiff::Timestamp;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::broadcasting::{BroadcastError, BroadcastResult, Broadcaster, PendingBroadcast};

/// A broadcast waiting on a named queue.
#[derive(Debug, Clone)]
pub struct QueuedBroadcast {
    pub id: Uuid,
    pub queue: String,
    pub broadcast: PendingBroadcast,
    pub queued_at: Timestamp,
}

#[derive(Clone)]
pub struct BroadcastQueue {
    broadcaster: Arc<dyn Broadcaster>,
    senders: Arc<DashMap<String, mpsc::UnboundedSender<QueuedBroadcast>>>,
}

impl BroadcastQueue {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            broadcaster,
            senders: Arc::new(DashMap::new()),
        }
    }

    /// Push a broadcast onto `queue` without waiting for delivery.
    ///
    /// Must be called from within a Tokio runtime; the first push to a queue
    /// spawns its worker.
    pub fn push(&self, queue: &str, broadcast: PendingBroadcast) -> BroadcastResult<Uuid> {
        let job = QueuedBroadcast {
            id: Uuid::new_v4(),
            queue: queue.to_string(),
            broadcast,
            queued_at: Timestamp::now(),
        };
        let id = job.id;

        let sender = self.sender_for(queue);
        let job = match sender.send(job) {
            Ok(()) => {
                tracing::debug!(queue, job_id = %id, "broadcast queued");
                return Ok(id);
            }
            Err(mpsc::error::SendError(job)) => job,
        };

        // The worker is gone. Replace it unless another push already has.
        tracing::warn!(queue, job_id = %id, "broadcast queue worker stopped, restarting");
        self.senders
            .remove_if(queue, |_, current| current.same_channel(&sender));
        self.sender_for(queue)
            .send(job)
            .map_err(|_| BroadcastError::QueueClosed(queue.to_string()))?;

        tracing::debug!(queue, job_id = %id, "broadcast queued");
        Ok(id)
    }

    /// Names of queues that have a running worker
    pub fn queues(&self) -> Vec<String> {
        self.senders.iter().map(|entry| entry.key().clone()).collect()
    }

    fn sender_for(&self, queue: &str) -> mpsc::UnboundedSender<QueuedBroadcast> {
        self.senders
            .entry(queue.to_string())
            .or_insert_with(|| self.spawn_worker(queue))
            .clone()
    }

    fn spawn_worker(&self, queue: &str) -> mpsc::UnboundedSender<QueuedBroadcast> {
        let (tx, rx) = mpsc::unbounded_channel();
        let broadcaster = Arc::clone(&self.broadcaster);
        tracing::debug!(queue, driver = broadcaster.name(), "starting broadcast queue worker");
        tokio::spawn(run_worker(broadcaster, rx));
        tx
    }
}

async fn run_worker(
    broadcaster: Arc<dyn Broadcaster>,
    mut rx: mpsc::UnboundedReceiver<QueuedBroadcast>,
) {
    while let Some(job) = rx.recv().await {
        let broadcast = &job.broadcast;
        match broadcaster
            .broadcast(
                broadcast.channels(),
                broadcast.event_name(),
                broadcast.payload(),
            )
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    queue = %job.queue,
                    job_id = %job.id,
                    broadcast_event = %broadcast.event_name(),
                    queued_at = %job.queued_at,
                    "queued broadcast delivered"
                );
            }
            Err(err) => {
                tracing::warn!(
                    queue = %job.queue,
                    job_id = %job.id,
                    broadcast_event = %broadcast.event_name(),
                    error = %err,
                    "queued broadcast failed"
                );
            }
        }
    }
}
