//! External service connection entity

use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};

/// Connection identifier (opaque, assigned at registration)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ConnectionId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Category of the connected service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Ai,
    Communication,
    Payment,
    Email,
    Development,
}

/// Whether the connection is currently usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// A registered external service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ConnectionKind,

    pub status: ConnectionStatus,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ConnectionKind,
        status: ConnectionStatus,
    ) -> Self {
        Self {
            id: ConnectionId::new(id),
            name: name.into(),
            kind,
            status,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

impl StorageEntity for Connection {
    type Key = ConnectionId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_serialization() {
        let connection = Connection::new(
            "1",
            "OpenAI API",
            ConnectionKind::Ai,
            ConnectionStatus::Connected,
        );

        let json = serde_json::to_string(&connection).unwrap();
        assert!(json.contains("\"type\":\"ai\""));
        assert!(json.contains("\"status\":\"connected\""));

        let decoded: Connection = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.name, "OpenAI API");
        assert!(decoded.is_connected());
    }

    #[test]
    fn test_disconnected_connection() {
        let connection = Connection::new(
            "3",
            "Stripe",
            ConnectionKind::Payment,
            ConnectionStatus::Disconnected,
        );
        assert!(!connection.is_connected());
    }
}
