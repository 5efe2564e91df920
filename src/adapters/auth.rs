use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{BookingError, Result};
use crate::ports::identity::IdentityVerifier;

/// Fixed bearer-token table. Stands in for the hosted identity service in
/// tests and local wiring.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, bearer: &str, user_id: &str) -> Self {
        self.tokens.insert(bearer.to_owned(), user_id.to_owned());
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, bearer: &str) -> Result<String> {
        self.tokens
            .get(bearer)
            .cloned()
            .ok_or_else(|| BookingError::Auth {
                reason: "unknown bearer credential".into(),
            })
    }
}
