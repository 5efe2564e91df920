use std::sync::Arc;

use crate::error::Result;
use crate::ports::identity::IdentityVerifier;

/// Shared credential-resolution rule for transports: no credential means
/// anonymous, a present credential must verify. Token parsing stays with
/// the external identity collaborator.
pub struct AuthService {
    verifier: Arc<dyn IdentityVerifier>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { verifier }
    }

    pub async fn resolve_user(&self, bearer: Option<&str>) -> Result<Option<String>> {
        match bearer {
            None => Ok(None),
            Some(token) => {
                let user_id = self.verifier.verify(token).await?;
                Ok(Some(user_id))
            }
        }
    }
}
