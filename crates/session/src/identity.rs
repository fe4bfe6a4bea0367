use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Minimal authenticated-user record carried in the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: Arc<str>,
    #[serde(default)]
    pub roles: Vec<Arc<str>>,
}
