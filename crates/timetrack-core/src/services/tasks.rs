//! Task lifecycle: creation, start/stop and duration accounting.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use super::store_error;
use crate::{
  Error, Result,
  store::TrackerStore,
  task::{NewTask, Task, parse_timestamp},
};

pub struct TaskService<S, C> {
  store: Arc<S>,
  clock: Arc<C>,
}

impl<S, C> Clone for TaskService<S, C> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      clock: Arc::clone(&self.clock),
    }
  }
}

impl<S, C> TaskService<S, C>
where
  S: TrackerStore,
  C: Clock + Send + Sync,
{
  pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self { Self { store, clock } }

  /// Create a task for `user_id` with no start or end time.
  ///
  /// The user is referenced by id only; its existence is not checked.
  pub async fn add_task(&self, user_id: i64, description: String) -> Result<Task> {
    if user_id < 1 {
      warn!(user_id, "rejecting task for non-positive user id");
      return Err(Error::Validation(format!("invalid user id: {user_id}")));
    }

    let task = self
      .store
      .add_task(NewTask::new(user_id, description))
      .await
      .map_err(store_error)?;

    info!(user_id, task_id = task.id, "task created");
    Ok(task)
  }

  /// Stamp the task's start time with the current time.
  ///
  /// Restarting is allowed; the latest call wins and clears any end time.
  pub async fn start_task(&self, user_id: i64, task_id: i64) -> Result<Task> {
    let mut task = self.find(user_id, task_id).await?;
    task.start(self.clock.utc());

    let task = self.store.update_task(task).await.map_err(store_error)?;
    info!(user_id, task_id, "task started");
    Ok(task)
  }

  /// Stamp the task's end time and record the elapsed whole minutes.
  ///
  /// Fails with [`Error::Validation`] if the task has never been started.
  pub async fn end_task(&self, user_id: i64, task_id: i64) -> Result<Task> {
    let mut task = self.find(user_id, task_id).await?;
    if let Err(e) = task.end(self.clock.utc()) {
      warn!(user_id, task_id, error = %e, "cannot end task");
      return Err(e);
    }

    let task = self.store.update_task(task).await.map_err(store_error)?;
    info!(user_id, task_id, duration = task.duration, "task ended");
    Ok(task)
  }

  /// Tasks of `user_id` lying entirely inside `[start, end]`, longest first.
  ///
  /// Both bounds use the `YYYY-MM-DDTHH:MM:SS` format.
  pub async fn list_tasks_in_period(
    &self,
    user_id: i64,
    start: &str,
    end: &str,
  ) -> Result<Vec<Task>> {
    let from  = parse_timestamp(start, "start_date")?;
    let until = parse_timestamp(end, "end_date")?;

    let tasks = self
      .store
      .list_tasks_in_period(user_id, from, until)
      .await
      .map_err(store_error)?;

    debug!(user_id, %from, %until, count = tasks.len(), "fetched time entries");
    Ok(tasks)
  }

  async fn find(&self, user_id: i64, task_id: i64) -> Result<Task> {
    self
      .store
      .get_task(user_id, task_id)
      .await
      .map_err(store_error)?
      .ok_or_else(|| {
        Error::NotFound(format!("task {task_id} not found for user {user_id}"))
      })
  }
}
