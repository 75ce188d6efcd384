//! In-process background task execution.
//!
//! Jobs are spawned onto the tokio runtime and tracked in a shared
//! [`TaskRegistry`] so API callers can poll their status by id. There is no
//! retry or timeout logic; a job runs once and settles as success or
//! failure.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, RwLock},
    time::Duration,
};

use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

pub const HEARTBEAT_TASK: &str = "sample_heartbeat";
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Started,
    Retry,
    Success,
    Failure,
}

#[derive(Clone, Debug)]
struct TaskRecord {
    status: TaskStatus,
    result: Option<Value>,
}

/// Shared registry of spawned tasks and their outcomes.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    inner: Arc<RwLock<HashMap<Uuid, TaskRecord>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `job` onto the runtime and track its lifecycle under a fresh
    /// task id. Returns the id together with the initial status.
    pub fn spawn<F>(&self, name: &'static str, job: F) -> (Uuid, TaskStatus)
    where
        F: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        let task_id = Uuid::new_v4();
        self.set(task_id, TaskStatus::Pending, None);
        let registry = self.clone();
        tokio::spawn(async move {
            registry.set(task_id, TaskStatus::Started, None);
            match job.await {
                Ok(result) => registry.set(task_id, TaskStatus::Success, Some(result)),
                Err(err) => {
                    error!(task = name, %task_id, "task failed: {err:#}");
                    registry.set(task_id, TaskStatus::Failure, None);
                }
            }
        });
        (task_id, TaskStatus::Pending)
    }

    /// Current status and result of a task. Ids the registry has no record
    /// of report `Pending`; they are indistinguishable from tasks not yet
    /// picked up.
    pub fn status(&self, task_id: Uuid) -> (TaskStatus, Option<Value>) {
        let guard = self.inner.read().expect("task registry lock poisoned");
        match guard.get(&task_id) {
            Some(record) => (record.status, record.result.clone()),
            None => (TaskStatus::Pending, None),
        }
    }

    fn set(&self, task_id: Uuid, status: TaskStatus, result: Option<Value>) {
        let mut guard = self.inner.write().expect("task registry lock poisoned");
        guard.insert(task_id, TaskRecord { status, result });
    }
}

/// Queue liveness probe. Logs that it ran and returns "ok".
pub async fn heartbeat() -> anyhow::Result<Value> {
    info!("heartbeat task executed");
    Ok(Value::String("ok".into()))
}

/// Re-spawn the heartbeat on a fixed interval for the life of the runtime.
/// Abort the returned handle to stop the schedule.
pub fn schedule_heartbeat(registry: TaskRegistry, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // the first tick completes immediately; consume it so the schedule
        // starts one full interval out
        ticker.tick().await;
        loop {
            ticker.tick().await;
            registry.spawn(HEARTBEAT_TASK, heartbeat());
        }
    })
}
