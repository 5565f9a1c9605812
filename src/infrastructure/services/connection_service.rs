//! Connection service - read access to registered connections

use std::sync::Arc;

use crate::domain::connection::Connection;
use crate::domain::storage::{Storage, StorageKey};
use crate::domain::DomainError;

/// Read-side service over the connection registry
pub struct ConnectionService {
    storage: Arc<dyn Storage<Connection>>,
}

impl std::fmt::Debug for ConnectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionService").finish()
    }
}

impl ConnectionService {
    pub fn new(storage: Arc<dyn Storage<Connection>>) -> Self {
        Self { storage }
    }

    /// List all registered connections
    pub async fn list(&self) -> Result<Vec<Connection>, DomainError> {
        let mut connections = self.storage.list().await?;
        connections.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(connections)
    }

    /// Total number of registered connections
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    /// Number of connections currently reported as connected
    pub async fn connected_count(&self) -> Result<usize, DomainError> {
        let connections = self.storage.list().await?;
        Ok(connections.iter().filter(|c| c.is_connected()).count())
    }
}
