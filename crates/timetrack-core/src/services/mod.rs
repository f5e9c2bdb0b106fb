//! Services: the operations exposed to the HTTP layer.
//!
//! Each service holds its collaborators behind `Arc`s and is cheap to clone.
//!
//! | Service | Operations |
//! |---------|------------|
//! | [`TaskService`]  | add, start, end, list-in-period |
//! | [`UserService`]  | enrol (passport → registry → user), update, delete |
//! | [`QueryService`] | filtered/paginated user listing, registry lookup |

mod query;
mod tasks;
mod users;

pub use query::QueryService;
pub use tasks::TaskService;
pub use users::UserService;

use crate::Error;

fn store_error<E: Into<Error>>(err: E) -> Error {
  let err = err.into();
  if let Error::Persistence(e) = &err {
    tracing::error!(error = %e, "store operation failed");
  }
  err
}
