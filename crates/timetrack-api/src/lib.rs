//! JSON REST API for the time-tracking service.
//!
//! Exposes an axum [`Router`] backed by any [`TrackerStore`], any
//! [`IdentityResolver`] and any [`Clock`]. TLS and auth are the caller's
//! responsibility.
//!
//! ```rust,ignore
//! let state = AppState::new(store, resolver, Arc::new(DefaultClock));
//! axum::serve(listener, timetrack_api::api_router(state)).await?;
//! ```

pub mod error;
pub mod people;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use mockable::Clock;
use timetrack_core::{
  resolver::IdentityResolver,
  services::{QueryService, TaskService, UserService},
  store::TrackerStore,
};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, R, C> {
  pub tasks: TaskService<S, C>,
  pub users: UserService<S, R>,
  pub query: QueryService<S>,
}

impl<S, R, C> Clone for AppState<S, R, C> {
  fn clone(&self) -> Self {
    Self {
      tasks: self.tasks.clone(),
      users: self.users.clone(),
      query: self.query.clone(),
    }
  }
}

impl<S, R, C> AppState<S, R, C>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  /// Wire the three services onto one shared store.
  pub fn new(store: Arc<S>, resolver: Arc<R>, clock: Arc<C>) -> Self {
    Self {
      tasks: TaskService::new(Arc::clone(&store), clock),
      users: UserService::new(Arc::clone(&store), resolver),
      query: QueryService::new(store),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, R, C>(state: AppState<S, R, C>) -> Router<()>
where
  S: TrackerStore + 'static,
  R: IdentityResolver + 'static,
  C: Clock + Send + Sync + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S, R, C>).post(users::create::<S, R, C>))
    .route("/users/{id}", put(users::update::<S, R, C>).delete(users::remove::<S, R, C>))
    // Tasks
    .route("/users/{id}/tasks", post(tasks::create::<S, R, C>))
    .route("/users/{id}/tasks/{task_id}/start", put(tasks::start::<S, R, C>))
    .route("/users/{id}/tasks/{task_id}/end", put(tasks::end::<S, R, C>))
    .route("/users/{id}/time-entries", get(tasks::time_entries::<S, R, C>))
    // Registry mirror
    .route("/api/info", get(people::info::<S, R, C>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
