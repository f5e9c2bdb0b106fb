//! Lookups against the external passport registry.

use std::future::Future;

use crate::{passport::PassportNumber, people::PersonDetails};

/// Resolves a passport to the registry's record of that person.
///
/// Implementations perform a single attempt; any failure (transport error,
/// non-success status, undecodable body) is reported as `Self::Error` and
/// surfaced by the services as [`crate::Error::Upstream`].
pub trait IdentityResolver: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn resolve(
    &self,
    passport: PassportNumber,
  ) -> impl Future<Output = Result<PersonDetails, Self::Error>> + Send + '_;
}
