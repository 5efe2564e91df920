use async_trait::async_trait;

use crate::error::Result;

/// External identity collaborator: maps a bearer credential to a user id.
/// The engine never parses tokens itself.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, bearer: &str) -> Result<String>;
}
