//! Building Resolver: external `osm_id` → entity, parent, main building.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{Direction, Node, PropertyMap, Value};
use crate::storage::StorageBackend;
use crate::Result;
use super::schema;

/// Outcome of resolving an external identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The Building or BuildingUnit carrying the identifier.
    pub entity: Node,
    /// The Building that has `entity` as a part, if any.
    pub parent: Option<Node>,
    /// `parent` if present, else `entity`.
    pub main: Node,
}

impl Resolution {
    pub fn from_parts(entity: Node, parent: Option<Node>) -> Self {
        let parent = parent.filter(|p| p.id != entity.id);
        let main = parent.clone().unwrap_or_else(|| entity.clone());
        Self { entity, parent, main }
    }

    pub fn is_part(&self) -> bool {
        self.main.id != self.entity.id
    }

    /// The entity's own properties when it is a part of a larger building;
    /// `None` when it is its own main building.
    pub fn part_properties(&self) -> Option<&PropertyMap> {
        self.is_part().then_some(&self.entity.properties)
    }
}

/// Find the Building/BuildingUnit with `osm_id`. Buildings are scanned
/// before units; the first hit wins.
pub async fn find_addressable<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    osm_id: &str,
) -> Result<Option<Node>> {
    let wanted = Value::from(osm_id);
    for label in schema::ADDRESSABLE {
        let hits = backend.nodes_by_property(tx, label, schema::OSM_ID, &wanted).await?;
        if let Some(node) = hits.into_iter().next() {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// First Building that has `node` as a part (incoming `dicer_hasPart`).
pub async fn parent_building<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    node: &Node,
) -> Result<Option<Node>> {
    let parents = backend
        .neighbors(tx, node.id, Direction::Incoming, &[schema::HAS_PART], Some(schema::BUILDING))
        .await?;
    Ok(parents.into_iter().find(|p| p.id != node.id))
}

/// Resolve `node` to its main building.
pub async fn main_building<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    node: Node,
) -> Result<Resolution> {
    let parent = parent_building(backend, tx, &node).await?;
    Ok(Resolution::from_parts(node, parent))
}

/// Resolve an external identifier. `None` when nothing carries it.
pub async fn resolve<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    osm_id: &str,
) -> Result<Option<Resolution>> {
    let Some(entity) = find_addressable(backend, tx, osm_id).await? else {
        debug!(osm_id, "no building or unit carries this osm_id");
        return Ok(None);
    };
    let resolution = main_building(backend, tx, entity).await?;
    debug!(
        osm_id,
        entity = %resolution.entity.id,
        main = %resolution.main.id,
        is_part = resolution.is_part(),
        "resolved main building"
    );
    Ok(Some(resolution))
}

/// Every distinct, non-empty `osm_id` on Buildings and BuildingUnits, in
/// first-encounter order (buildings first).
pub async fn linked_osm_ids<B: StorageBackend>(backend: &B, tx: &B::Tx) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for label in schema::ADDRESSABLE {
        for node in backend.nodes_by_label(tx, label).await? {
            let Some(id) = node.get(schema::OSM_ID).and_then(Value::as_label) else { continue };
            if !id.is_empty() && seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}
