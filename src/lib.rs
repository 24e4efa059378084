//! # building-graph — read-side queries over a building property graph
//!
//! Buildings, their structural components, materials, and regulatory
//! context live in a property graph owned by an upstream loader. This crate
//! composes the multi-hop reads over that graph and shapes them into the
//! JSON payloads of a small read API.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `StorageBackend` is the contract between the query layer and storage
//! 2. **Clean DTOs**: `Node`, `Relationship`, `Value` cross all boundaries
//! 3. **Read-only**: every endpoint runs in one read-only transaction
//! 4. **Explicit handle**: the store is owned by a `BuildingGraph`, injected, and shut down explicitly
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use building_graph::BuildingGraph;
//!
//! # async fn example() -> building_graph::Result<()> {
//! let graph = BuildingGraph::open_memory();
//!
//! let detail = graph.building("way/4711").await?;
//! println!("{}", serde_json::to_string(&detail).unwrap_or_default());
//!
//! graph.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `ping` | `/ping` | `{status}` |
//! | `linked_osm_ids` | `/linked_osm_ids` | `{osm_ids}` |
//! | `building` | `/building?osm_id=` | `{found: false}` or the full detail |
//! | `component_info` | `/component-info?name=&cat_fields=` | `[ComponentInfo]` |
//! | `material_volume_all` | `/material-volume-all` | `[MaterialVolume]` |
//! | `material_volume_building` | `/material-volume-building?building_id=` | `[MaterialVolume]` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod tx;
pub mod query;
pub mod response;
pub mod service;
pub mod config;
pub mod telemetry;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Node, Relationship, Value, PropertyMap, props,
    NodeId, RelId, Direction,
};

pub use storage::{StorageBackend, MemoryBackend};

pub use tx::{Transaction, TxMode, TxId};

pub use query::FieldSelector;

pub use response::{
    BuildingDetail, BuildingResponse, ComponentInfo, ComponentSummary,
    LinkedOsmIds, MaterialVolume, Ping, Planning,
};

pub use service::BuildingGraph;

pub use config::{ConfigError, ServiceConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Transaction error: {0}")]
    TxError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The graph store failed during a request. Carries the upstream
    /// status code and message; surfaced to clients as HTTP 503.
    #[error("Service unavailable: {code}| {message}")]
    Unavailable { code: String, message: String },
}

impl Error {
    /// Neo4j-style status code for this error.
    pub fn code(&self) -> &str {
        match self {
            Error::StorageError(_) => "Neo.TransientError.General.DatabaseUnavailable",
            Error::TxError(_) => "Neo.ClientError.Transaction.ForbiddenDueToTransactionType",
            Error::NotFound(_) => "Neo.ClientError.Statement.EntityNotFound",
            Error::Unavailable { code, .. } => code,
        }
    }

    /// Wrap a failure from the store into `Unavailable`. Already-wrapped
    /// errors pass through unchanged.
    pub fn upstream(err: Error) -> Error {
        match err {
            Error::Unavailable { .. } => err,
            other => Error::Unavailable {
                code: other.code().to_owned(),
                message: other.to_string(),
            },
        }
    }

    /// HTTP status a host should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Unavailable { .. } => 503,
            Error::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Response body detail: `"Neo4jError: {code}| {message}"`.
    pub fn detail(&self) -> String {
        match self {
            Error::Unavailable { code, message } => format!("Neo4jError: {code}| {message}"),
            other => format!("Neo4jError: {}| {other}", other.code()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_wraps_once() {
        let err = Error::upstream(Error::StorageError("connection refused".into()));
        assert_eq!(err.http_status(), 503);
        assert_eq!(err.code(), "Neo.TransientError.General.DatabaseUnavailable");
        assert_eq!(
            err.detail(),
            "Neo4jError: Neo.TransientError.General.DatabaseUnavailable| Storage error: connection refused"
        );

        let again = Error::upstream(err);
        assert!(matches!(
            &again,
            Error::Unavailable { message, .. } if message == "Storage error: connection refused"
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::NotFound("x".into()).http_status(), 404);
        assert_eq!(Error::TxError("x".into()).http_status(), 500);
        assert_eq!(
            Error::TxError("tx-3 is read-only".into()).detail(),
            "Neo4jError: Neo.ClientError.Transaction.ForbiddenDueToTransactionType| \
             Transaction error: tx-3 is read-only"
        );
    }
}
