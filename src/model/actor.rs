use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried explicitly by the authenticated-actor context. Resolved once
/// at the identity boundary and passed as a value; the engine never re-derives
/// it from which store a record was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Client,
    Provider,
}

/// Authenticated caller, trusted as-is by the engine. Credential validation
/// happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn client(id: Uuid) -> Self {
        Self {
            id,
            role: ActorRole::Client,
        }
    }

    pub fn provider(id: Uuid) -> Self {
        Self {
            id,
            role: ActorRole::Provider,
        }
    }
}
