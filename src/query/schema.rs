//! Graph vocabulary: labels, relationship types, and the coalesce rules
//! used to derive display values from open property bags.

use crate::model::{Node, Value};

// Labels
pub const BUILDING: &str = "dice_Building";
pub const BUILDING_UNIT: &str = "dice_BuildingUnit";
pub const BUILDING_OBJECT: &str = "dice_BuildingObject";
pub const MATERIAL: &str = "dice_MaterialEntity";
pub const CLASS_PROPERTY: &str = "dicv_Property";
pub const QUANTITATIVE_PROPERTY: &str = "dicv_QuantitativeProperty";
pub const ROLE: &str = "dice_Role";
pub const CATEGORY: &str = "Category";
pub const PLANNING_DOCUMENT: &str = "PlanningDocument";
pub const DISTRICT: &str = "District";

/// Labels an `osm_id` lookup may land on.
pub const ADDRESSABLE: [&str; 2] = [BUILDING, BUILDING_UNIT];

// Relationship types
pub const HAS_PART: &str = "dicer_hasPart";
pub const HAS_MATERIAL: &str = "hasMaterial";
pub const HAS_PROPERTY: &str = "hasProperty";
pub const HAS_QUANTITATIVE_PROPERTY: &str = "hasQuantitativeProperty";
pub const HAS_ROLE: &str = "hasRole";
pub const IS_CLASSIFIED_BY: &str = "isClassifiedBy";
pub const HAS_LOCATION: &str = "hasLocation";
pub const REGULATED_BY: &str = "regulatedBy";
pub const IN_DISTRICT: &str = "inDistrict";

/// Edge kinds that attach a Category to a component; all equivalent.
pub const COMPONENT_CATEGORY_EDGES: [&str; 3] =
    [IS_CLASSIFIED_BY, "hasCategory", "dicer_isClassifiedBy"];

// Property keys
pub const OSM_ID: &str = "osm_id";
pub const BUILDING_ID: &str = "building_id";
pub const NAME: &str = "name";

const ENTITY_NAME_KEYS: [&str; 3] = ["name", "id", "uuid"];
const BUILDING_NAME_KEYS: [&str; 3] = ["name", "buildingName", "osm_name"];
const NUMBER: &str = "number";

/// Raw name value of a component or material (`name`, `id`, `uuid`).
pub fn entity_name_value(node: &Node) -> Option<&Value> {
    node.coalesce(&ENTITY_NAME_KEYS)
}

/// Display name of a component or material.
pub fn entity_name(node: &Node) -> Option<String> {
    entity_name_value(node).and_then(Value::as_label)
}

/// Display name of a main building (`name`, `buildingName`, `osm_name`).
pub fn building_name(node: &Node) -> Option<String> {
    node.coalesce(&BUILDING_NAME_KEYS).and_then(Value::as_label)
}

/// Component count: `number`, else `0`. A stray `count` key is not read.
pub fn component_count(node: &Node) -> Value {
    node.get(NUMBER).cloned().unwrap_or(Value::Int(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    #[test]
    fn test_coalesce_rules() {
        let wall = Node::new(NodeId(1)).with_property("id", "W-01").with_property("count", 4);
        assert_eq!(entity_name(&wall), Some("W-01".into()));
        assert_eq!(component_count(&wall), Value::Int(0));

        let beam = Node::new(NodeId(4)).with_property("number", 3).with_property("count", 9);
        assert_eq!(component_count(&beam), Value::Int(3));

        let bare = Node::new(NodeId(2));
        assert_eq!(entity_name(&bare), None);
        assert_eq!(component_count(&bare), Value::Int(0));

        let building = Node::new(NodeId(3))
            .with_property("osm_name", "Rathaus")
            .with_property("buildingName", "Town Hall");
        assert_eq!(building_name(&building), Some("Town Hall".into()));
    }
}
