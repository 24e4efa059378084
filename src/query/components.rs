//! Component Aggregator.
//!
//! Two views over the `dice_BuildingObject`s a main building owns:
//! the per-building denormalized list behind `/building`, and the
//! by-name lookup behind `/component-info`.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{Direction, Node, NodeId, PropertyMap, Value};
use crate::response::{ComponentInfo, ComponentSummary};
use crate::storage::StorageBackend;
use crate::Result;
use super::fields::FieldSelector;
use super::resolver;
use super::schema;

const WIDTH: &str = "width_mm";
const HEIGHT: &str = "height_mm";
const LENGTH: &str = "length_mm";

/// Components of one main building plus the two derived lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentAggregate {
    /// Full per-component records.
    pub info: Vec<ComponentSummary>,
    /// Display names, in `info` order.
    pub names: Vec<Option<String>>,
    /// Every component's materials concatenated, not de-duplicated.
    pub materials: Vec<Option<String>>,
}

impl ComponentAggregate {
    pub fn from_summaries(info: Vec<ComponentSummary>) -> Self {
        let names = info.iter().map(|c| c.name.clone()).collect();
        let materials = info.iter().flat_map(|c| c.materials.iter().cloned()).collect();
        Self { info, names, materials }
    }
}

fn dedup_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut seen = HashSet::new();
    nodes.into_iter().filter(|n| seen.insert(n.id)).collect()
}

/// Components owned by `main`: distinct `dicer_hasPart` targets, edge order.
pub async fn owned_components<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    main: &Node,
) -> Result<Vec<Node>> {
    let parts = backend
        .neighbors(tx, main.id, Direction::Outgoing, &[schema::HAS_PART], Some(schema::BUILDING_OBJECT))
        .await?;
    Ok(dedup_nodes(parts))
}

/// Material nodes linked to a component, one per `hasMaterial` edge.
async fn material_nodes<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    component: NodeId,
) -> Result<Vec<Node>> {
    backend
        .neighbors(tx, component, Direction::Outgoing, &[schema::HAS_MATERIAL], Some(schema::MATERIAL))
        .await
}

/// One display name per material; `None` when it has no `name`/`id`/`uuid`.
fn material_names(materials: &[Node]) -> Vec<Option<String>> {
    materials.iter().map(schema::entity_name).collect()
}

/// Aggregate every component of `main`. Materials keep one entry per
/// edge, so a material linked twice is listed twice.
pub async fn aggregate<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    main: &Node,
) -> Result<ComponentAggregate> {
    let mut info = Vec::new();
    for component in owned_components(backend, tx, main).await? {
        let materials = material_nodes(backend, tx, component.id).await?;
        info.push(ComponentSummary {
            name: schema::entity_name(&component),
            number: schema::component_count(&component),
            materials: material_names(&materials),
            width_mm: component.get_or_null(WIDTH),
            height_mm: component.get_or_null(HEIGHT),
            length_mm: component.get_or_null(LENGTH),
        });
    }
    debug!(main = %main.id, components = info.len(), "aggregated components");
    Ok(ComponentAggregate::from_summaries(info))
}

/// Categories attached to a component over any of the equivalent edge
/// kinds, either direction, distinct. Unnamed ones carry `None`.
async fn component_categories<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    component: NodeId,
) -> Result<Vec<(Option<String>, PropertyMap)>> {
    let categories = backend
        .neighbors(tx, component, Direction::Both, &schema::COMPONENT_CATEGORY_EDGES, Some(schema::CATEGORY))
        .await?;
    Ok(dedup_nodes(categories)
        .into_iter()
        .map(|c| (c.get(schema::NAME).and_then(Value::as_label), c.properties))
        .collect())
}

/// `{name, ...selected}` per named category; empty when nothing is selected.
pub fn category_props(
    categories: &[(Option<String>, PropertyMap)],
    selector: &FieldSelector,
) -> Vec<PropertyMap> {
    if selector.is_empty() {
        return Vec::new();
    }
    categories
        .iter()
        .filter_map(|(name, props)| {
            let name = name.as_deref().filter(|n| !n.is_empty())?;
            let mut payload = PropertyMap::new();
            payload.insert(schema::NAME.into(), Value::from(name));
            payload.extend(selector.project(props));
            Some(payload)
        })
        .collect()
}

/// Every component whose display name equals `name`, one record per
/// (main building, component) pair, ordered by building name with
/// unnamed buildings last.
pub async fn lookup<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    name: &str,
    selector: &FieldSelector,
) -> Result<Vec<ComponentInfo>> {
    let wanted = Value::from(name);
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for component in backend.nodes_by_label(tx, schema::BUILDING_OBJECT).await? {
        if schema::entity_name_value(&component) != Some(&wanted) {
            continue;
        }

        let owners = backend
            .neighbors(tx, component.id, Direction::Incoming, &[schema::HAS_PART], None)
            .await?;

        for owner in dedup_nodes(owners) {
            if !owner.has_any_label(&schema::ADDRESSABLE) {
                continue;
            }
            let main = resolver::main_building(backend, tx, owner).await?.main;
            if !seen.insert((main.id, component.id)) {
                continue;
            }

            let materials = dedup_nodes(material_nodes(backend, tx, component.id).await?);
            let categories = component_categories(backend, tx, component.id).await?;

            rows.push(ComponentInfo {
                building: schema::building_name(&main),
                building_id: main.get_or_null(schema::BUILDING_ID),
                osm_id: main.get_or_null(schema::OSM_ID),
                number: schema::component_count(&component),
                materials: material_names(&materials),
                categories: categories.iter().map(|(n, _)| n.clone()).collect(),
                category_props: category_props(&categories, selector),
                width_mm: component.get_or_null(WIDTH),
                length_mm: component.get_or_null(LENGTH),
                height_mm: component.get_or_null(HEIGHT),
            });
        }
    }

    // Stable: rows under the same building keep scan order.
    rows.sort_by(|a, b| match (&a.building, &b.building) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    debug!(name, rows = rows.len(), "component lookup");
    Ok(rows)
}
