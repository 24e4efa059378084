//! Response payloads, serialized with the field names clients expect.

use serde::Serialize;

use crate::model::{Node, PropertyMap, Value};

/// `/ping`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ping {
    pub status: &'static str,
}

/// `/linked_osm_ids`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedOsmIds {
    pub osm_ids: Vec<String>,
}

/// `/building`: either `{found: false}` or the full detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BuildingResponse {
    NotFound { found: bool },
    Found(Box<BuildingDetail>),
}

impl BuildingResponse {
    pub fn not_found() -> Self {
        BuildingResponse::NotFound { found: false }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, BuildingResponse::Found(_))
    }

    pub fn detail(&self) -> Option<&BuildingDetail> {
        match self {
            BuildingResponse::Found(detail) => Some(detail),
            BuildingResponse::NotFound { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDetail {
    /// Always `true`; present so the payload is self-describing.
    pub found: bool,
    /// Main building properties with the classification overlay applied.
    pub properties: PropertyMap,
    /// The requested entity's own properties when it is part of a larger building.
    pub part_properties: Option<PropertyMap>,
    pub location: PropertyMap,
    pub planning: Option<Planning>,
    pub materials: Vec<Option<String>>,
    pub components: Vec<Option<String>>,
    pub component_info: Vec<ComponentSummary>,
    pub district: Option<String>,
}

/// Planning document fields, passed through as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Planning {
    pub title: Value,
    pub url: Value,
    pub plan_no: Value,
    pub last_modified: Value,
}

impl From<&Node> for Planning {
    fn from(plan: &Node) -> Self {
        Self {
            title: plan.get_or_null("title"),
            url: plan.get_or_null("url"),
            plan_no: plan.get_or_null("planNo"),
            last_modified: plan.get_or_null("lastModified"),
        }
    }
}

/// One component of a main building (`componentInfo` entries).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub name: Option<String>,
    pub number: Value,
    pub materials: Vec<Option<String>>,
    pub width_mm: Value,
    pub height_mm: Value,
    pub length_mm: Value,
}

/// `/component-info` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInfo {
    pub building: Option<String>,
    pub building_id: Value,
    pub osm_id: Value,
    pub number: Value,
    pub materials: Vec<Option<String>>,
    pub categories: Vec<Option<String>>,
    #[serde(rename = "categoryProps")]
    pub category_props: Vec<PropertyMap>,
    pub width_mm: Value,
    pub length_mm: Value,
    pub height_mm: Value,
}

/// `/material-volume-*` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialVolume {
    pub material: Option<String>,
    pub volume_m3: Value,
}
