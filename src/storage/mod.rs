//! # Storage Backend Trait
//!
//! The contract between the query layer and whatever holds the graph.
//! The building queries only need a handful of primitives: label scans,
//! property lookups, and one-hop relationship expansion. Everything
//! multi-hop is composed on top of these in `crate::query`.
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryBackend` | `memory` | In-memory for testing/embedding |
//!
//! A networked driver plugs in by implementing [`StorageBackend`]; its
//! failures should come back as `Error::StorageError` (or any other
//! variant), which the service layer turns into `Error::Unavailable`.

pub mod memory;

use async_trait::async_trait;
use crate::model::*;
use crate::tx::{Transaction, TxMode};
use crate::Result;

pub use memory::MemoryBackend;

// ============================================================================
// StorageBackend Trait
// ============================================================================

/// The storage contract.
///
/// Ordering matters: `get_relationships` must return edges in a stable
/// order (the memory backend uses insertion order), and label scans must
/// be stable too. "First of several" choices in the query layer rely on it.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// The transaction type for this backend.
    type Tx: Transaction;

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Shut down the backend, releasing connections.
    async fn shutdown(&self) -> Result<()>;

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Begin a new transaction.
    async fn begin_tx(&self, mode: TxMode) -> Result<Self::Tx>;

    /// Commit a transaction.
    async fn commit_tx(&self, tx: Self::Tx) -> Result<()>;

    /// Roll back a transaction.
    async fn rollback_tx(&self, tx: Self::Tx) -> Result<()>;

    // ========================================================================
    // Writes (fixtures / embedding; the query layer never calls these)
    // ========================================================================

    /// Create a node with the given labels and properties.
    async fn create_node(
        &self,
        tx: &mut Self::Tx,
        labels: &[&str],
        props: PropertyMap,
    ) -> Result<NodeId>;

    /// Create a relationship between two nodes.
    async fn create_relationship(
        &self,
        tx: &mut Self::Tx,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        props: PropertyMap,
    ) -> Result<RelId>;

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a node by ID. Returns None if not found.
    async fn get_node(&self, tx: &Self::Tx, id: NodeId) -> Result<Option<Node>>;

    /// Get all relationships of a node, optionally filtered by direction and type.
    async fn get_relationships(
        &self,
        tx: &Self::Tx,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>>;

    /// Find all nodes with a given label.
    async fn nodes_by_label(&self, tx: &Self::Tx, label: &str) -> Result<Vec<Node>>;

    /// Find nodes by label + property value.
    async fn nodes_by_property(
        &self,
        tx: &Self::Tx,
        label: &str,
        key: &str,
        value: &Value,
    ) -> Result<Vec<Node>>;

    /// One-hop expansion: the nodes at the other end of `node`'s
    /// relationships of any of `rel_types`, restricted to nodes carrying
    /// `label` (if given). One entry per relationship, so a node reached
    /// over two edges appears twice.
    ///
    /// Default: `get_relationships` per type, then `get_node` per edge.
    async fn neighbors(
        &self,
        tx: &Self::Tx,
        node: NodeId,
        dir: Direction,
        rel_types: &[&str],
        label: Option<&str>,
    ) -> Result<Vec<Node>> {
        let mut result = Vec::new();
        for &rel_type in rel_types {
            let rels = self.get_relationships(tx, node, dir, Some(rel_type)).await?;
            for rel in rels {
                let Some(other) = rel.other_node(node) else { continue };
                let Some(next) = self.get_node(tx, other).await? else { continue };
                if label.is_none_or(|l| next.has_label(l)) {
                    result.push(next);
                }
            }
        }
        Ok(result)
    }
}
