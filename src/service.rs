//! Response Assembler — the `BuildingGraph` entry point.
//!
//! Each endpoint opens one read-only transaction, runs its traversals from
//! `crate::query`, and commits. Any failure on the way rolls back and comes
//! out as `Error::Unavailable`.

use tracing::{instrument, warn};

use crate::model::{Direction, Node};
use crate::query::{components, normalize, resolver, schema, volume, FieldSelector};
use crate::response::{
    BuildingDetail, BuildingResponse, ComponentInfo, LinkedOsmIds, MaterialVolume, Ping, Planning,
};
use crate::storage::{MemoryBackend, StorageBackend};
use crate::tx::{Transaction, TxMode};
use crate::{Error, Result};

/// The primary entry point. Owns the store handle; share it across request
/// tasks behind an `Arc` and call [`BuildingGraph::shutdown`] on exit.
pub struct BuildingGraph<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> BuildingGraph<B> {
    /// Create a handle over the given backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Release the store.
    pub async fn shutdown(self) -> Result<()> {
        self.backend.shutdown().await
    }

    /// Liveness probe. Does not touch the store.
    pub fn ping(&self) -> Ping {
        Ping { status: "ok" }
    }

    async fn begin(&self) -> Result<B::Tx> {
        self.backend.begin_tx(TxMode::ReadOnly).await.map_err(Error::upstream)
    }

    /// Commit on success; on failure roll back and report `Unavailable`.
    async fn finish<T>(&self, tx: B::Tx, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                self.backend.commit_tx(tx).await.map_err(Error::upstream)?;
                Ok(value)
            }
            Err(err) => {
                let tx_id = tx.id();
                if let Err(rollback) = self.backend.rollback_tx(tx).await {
                    warn!(%tx_id, error = %rollback, "rollback failed");
                }
                warn!(%tx_id, error = %err, "graph query failed");
                Err(Error::upstream(err))
            }
        }
    }

    /// `/linked_osm_ids`
    #[instrument(skip(self))]
    pub async fn linked_osm_ids(&self) -> Result<LinkedOsmIds> {
        let tx = self.begin().await?;
        let outcome = resolver::linked_osm_ids(&self.backend, &tx).await;
        self.finish(tx, outcome.map(|osm_ids| LinkedOsmIds { osm_ids })).await
    }

    /// `/building?osm_id=`
    #[instrument(skip(self))]
    pub async fn building(&self, osm_id: &str) -> Result<BuildingResponse> {
        let tx = self.begin().await?;
        let outcome = assemble_building(&self.backend, &tx, osm_id).await;
        self.finish(tx, outcome).await
    }

    /// `/component-info?name=&cat_fields=`
    #[instrument(skip(self))]
    pub async fn component_info(&self, name: &str, cat_fields: Option<&str>) -> Result<Vec<ComponentInfo>> {
        let selector = FieldSelector::parse(cat_fields);
        let tx = self.begin().await?;
        let outcome = components::lookup(&self.backend, &tx, name, &selector).await;
        self.finish(tx, outcome).await
    }

    /// `/material-volume-all`
    #[instrument(skip(self))]
    pub async fn material_volume_all(&self) -> Result<Vec<MaterialVolume>> {
        let tx = self.begin().await?;
        let outcome = volume::material_volumes(&self.backend, &tx, None).await;
        self.finish(tx, outcome).await
    }

    /// `/material-volume-building?building_id=`
    #[instrument(skip(self))]
    pub async fn material_volume_building(&self, building_id: &str) -> Result<Vec<MaterialVolume>> {
        let tx = self.begin().await?;
        let outcome = volume::material_volumes(&self.backend, &tx, Some(building_id)).await;
        self.finish(tx, outcome).await
    }
}

/// In-memory graph for testing and embedding.
impl BuildingGraph<MemoryBackend> {
    pub fn open_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }
}

/// First node reached from `main` over `rel_type`, optionally label-filtered.
async fn first_neighbor<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    main: &Node,
    rel_type: &str,
    label: Option<&str>,
) -> Result<Option<Node>> {
    let found = backend.neighbors(tx, main.id, Direction::Outgoing, &[rel_type], label).await?;
    Ok(found.into_iter().next())
}

/// Compose the `/building` payload.
pub async fn assemble_building<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    osm_id: &str,
) -> Result<BuildingResponse> {
    let Some(resolution) = resolver::resolve(backend, tx, osm_id).await? else {
        return Ok(BuildingResponse::not_found());
    };
    let main = &resolution.main;
    if main.properties.is_empty() {
        return Ok(BuildingResponse::not_found());
    }

    let classification = normalize::classify(backend, tx, main).await?;
    let mut properties = main.properties.clone();
    classification.apply(&mut properties);

    let location = first_neighbor(backend, tx, main, schema::HAS_LOCATION, None)
        .await?
        .map(|loc| loc.properties)
        .unwrap_or_default();

    let planning = first_neighbor(backend, tx, main, schema::REGULATED_BY, Some(schema::PLANNING_DOCUMENT))
        .await?
        .as_ref()
        .map(Planning::from);

    let district = backend
        .neighbors(tx, main.id, Direction::Outgoing, &[schema::IN_DISTRICT], Some(schema::DISTRICT))
        .await?
        .iter()
        .find_map(|d| d.get(schema::NAME).and_then(|n| n.as_label()));

    let aggregate = components::aggregate(backend, tx, main).await?;

    Ok(BuildingResponse::Found(Box::new(BuildingDetail {
        found: true,
        properties,
        part_properties: resolution.part_properties().cloned(),
        location,
        planning,
        materials: aggregate.materials,
        components: aggregate.names,
        component_info: aggregate.info,
        district,
    })))
}
