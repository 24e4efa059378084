//! Attribute Normalizer.
//!
//! Three classification signals live on separate nodes around the main
//! building. They are collected here and laid over its raw properties as
//! `buildingClass`, `buildingType` and `structuralSystem`.

use tracing::debug;

use crate::model::{Direction, Node, PropertyMap, Value};
use crate::storage::StorageBackend;
use crate::Result;
use super::schema;

pub const BUILDING_CLASS_PREFIX: &str = "buildingClass";
pub const STRUCTURAL_SYSTEM_TYPE: &str = "structural_system";

pub const KEY_BUILDING_CLASS: &str = "buildingClass";
pub const KEY_BUILDING_TYPE: &str = "buildingType";
pub const KEY_STRUCTURAL_SYSTEM: &str = "structuralSystem";

/// Classification signals of one main building. Each is the first
/// candidate met in edge order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Name of a `dicv_Property` starting with `buildingClass`.
    pub building_class: Option<String>,
    /// Name of the linked `dice_Role`.
    pub role: Option<String>,
    /// Name of the linked `structural_system` Category.
    pub structural_system: Option<String>,
}

impl Classification {
    /// Overlay onto `props`. Existing keys are overwritten, nothing is removed.
    pub fn apply(&self, props: &mut PropertyMap) {
        if let Some(class) = self.building_class.as_deref().and_then(building_class_value) {
            props.insert(KEY_BUILDING_CLASS.into(), class);
        }
        if let Some(role) = non_empty(self.role.as_deref()) {
            props.insert(KEY_BUILDING_TYPE.into(), Value::from(role));
        }
        if let Some(system) = non_empty(self.structural_system.as_deref()) {
            props.insert(KEY_STRUCTURAL_SYSTEM.into(), Value::from(system));
        }
    }
}

/// Role and structural-system names go in as stored; only `""` is skipped.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// `buildingClass3` → `3`; any other `buildingClass…` name → the trimmed
/// name as a string. Names without the prefix yield `None`.
pub fn building_class_value(raw: &str) -> Option<Value> {
    let name = raw.trim();
    let tail = name.strip_prefix(BUILDING_CLASS_PREFIX)?.trim();
    let numeric = !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit());
    Some(
        numeric
            .then(|| tail.parse::<i64>().ok())
            .flatten()
            .map(Value::Int)
            .unwrap_or_else(|| Value::from(name)),
    )
}

/// First distinct string among `values`, skipping nulls and non-strings.
fn first_name<'a>(mut values: impl Iterator<Item = Option<&'a Value>>) -> Option<String> {
    values.find_map(|v| v.and_then(Value::as_str)).map(str::to_owned)
}

/// Collect the classification signals around `main`.
pub async fn classify<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    main: &Node,
) -> Result<Classification> {
    let properties = backend
        .neighbors(tx, main.id, Direction::Outgoing, &[schema::HAS_PROPERTY], Some(schema::CLASS_PROPERTY))
        .await?;
    let building_class = first_name(
        properties
            .iter()
            .map(|p| p.get(schema::NAME))
            .filter(|v| v.and_then(Value::as_str).is_some_and(|s| s.starts_with(BUILDING_CLASS_PREFIX))),
    );

    let roles = backend
        .neighbors(tx, main.id, Direction::Outgoing, &[schema::HAS_ROLE], Some(schema::ROLE))
        .await?;
    let role = first_name(roles.iter().map(|r| r.get(schema::NAME)));

    let categories = backend
        .neighbors(tx, main.id, Direction::Outgoing, &[schema::IS_CLASSIFIED_BY], Some(schema::CATEGORY))
        .await?;
    let structural_system = first_name(
        categories
            .iter()
            .filter(|c| c.get("Type").and_then(Value::as_str) == Some(STRUCTURAL_SYSTEM_TYPE))
            .map(|c| c.get(schema::NAME)),
    );

    let classification = Classification { building_class, role, structural_system };
    debug!(main = %main.id, ?classification, "classified main building");
    Ok(classification)
}
