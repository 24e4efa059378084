//! End-to-end tests for `/component-info`: lookup by component name,
//! owner resolution, categories, and the `cat_fields` selection.

use building_graph::{
    props, BuildingGraph, MemoryBackend, NodeId, PropertyMap, StorageBackend, TxMode, Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

async fn node(db: &MemoryBackend, labels: &[&str], properties: PropertyMap) -> NodeId {
    let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
    let id = db.create_node(&mut tx, labels, properties).await.unwrap();
    db.commit_tx(tx).await.unwrap();
    id
}

async fn link(db: &MemoryBackend, src: NodeId, rel_type: &str, dst: NodeId) {
    let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
    db.create_relationship(&mut tx, src, dst, rel_type, PropertyMap::new()).await.unwrap();
    db.commit_tx(tx).await.unwrap();
}

/// Two buildings ("Zeughaus", "Alte Brüderkirche") each owning a component
/// named "Column". The Zeughaus column hangs off a unit, not the building.
async fn setup_columns() -> BuildingGraph<MemoryBackend> {
    let db = MemoryBackend::new();

    let zeughaus = node(
        &db,
        &["dice_Building"],
        props([("name", "Zeughaus"), ("building_id", "B-2"), ("osm_id", "way/2")]),
    )
    .await;
    let wing = node(&db, &["dice_BuildingUnit"], props([("osm_id", "way/2a")])).await;
    link(&db, zeughaus, "dicer_hasPart", wing).await;

    let church = node(
        &db,
        &["dice_Building"],
        props([("buildingName", "Alte Brüderkirche"), ("building_id", "B-1"), ("osm_id", "way/1")]),
    )
    .await;

    let z_column = node(
        &db,
        &["dice_BuildingObject"],
        props([
            ("name", Value::from("Column")),
            ("number", Value::Int(12)),
            ("height_mm", Value::Int(4200)),
        ]),
    )
    .await;
    link(&db, wing, "dicer_hasPart", z_column).await;

    let c_column = node(&db, &["dice_BuildingObject"], props([("id", "Column")])).await;
    link(&db, church, "dicer_hasPart", c_column).await;

    let beam = node(&db, &["dice_BuildingObject"], props([("name", "Beam")])).await;
    link(&db, church, "dicer_hasPart", beam).await;

    let sandstone = node(&db, &["dice_MaterialEntity"], props([("name", "Sandstone")])).await;
    let oak = node(&db, &["dice_MaterialEntity"], props([("name", "Oak")])).await;
    link(&db, c_column, "hasMaterial", sandstone).await;
    link(&db, c_column, "hasMaterial", sandstone).await;
    link(&db, z_column, "hasMaterial", oak).await;

    let bearing = node(
        &db,
        &["Category"],
        props([("name", "Load-bearing"), ("Type", "function"), ("code", "LB")]),
    )
    .await;
    let vertical = node(&db, &["Category"], props([("name", "Vertical"), ("Type", "orientation")])).await;
    let unnamed = node(&db, &["Category"], props([("Type", "orientation")])).await;
    link(&db, c_column, "isClassifiedBy", bearing).await;
    link(&db, vertical, "hasCategory", c_column).await;
    link(&db, c_column, "dicer_isClassifiedBy", bearing).await;
    link(&db, c_column, "isClassifiedBy", unnamed).await;

    BuildingGraph::with_backend(db)
}

// ============================================================================
// 1. Lookup and ordering
// ============================================================================

#[tokio::test]
async fn test_name_owned_by_two_buildings() {
    let graph = setup_columns().await;

    let rows = graph.component_info("Column", None).await.unwrap();
    let buildings: Vec<Option<&str>> = rows.iter().map(|r| r.building.as_deref()).collect();
    assert_eq!(buildings, vec![Some("Alte Brüderkirche"), Some("Zeughaus")]);
}

#[tokio::test]
async fn test_unit_owner_reports_main_building() {
    let graph = setup_columns().await;

    let rows = graph.component_info("Column", None).await.unwrap();
    let zeughaus = &rows[1];
    assert_eq!(zeughaus.building_id, Value::from("B-2"));
    assert_eq!(zeughaus.osm_id, Value::from("way/2"));
    assert_eq!(zeughaus.number, Value::Int(12));
    assert_eq!(zeughaus.height_mm, Value::Int(4200));
    assert_eq!(zeughaus.materials, vec![Some("Oak".to_string())]);
    assert!(zeughaus.categories.is_empty());
}

#[tokio::test]
async fn test_unknown_component_is_empty() {
    let graph = setup_columns().await;
    assert!(graph.component_info("Window", Some("code")).await.unwrap().is_empty());
}

// ============================================================================
// 2. Materials, categories, and field selection
// ============================================================================

#[tokio::test]
async fn test_row_without_selected_fields() {
    let graph = setup_columns().await;

    let rows = graph.component_info("Column", None).await.unwrap();
    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(
        json,
        json!({
            "building": "Alte Brüderkirche",
            "building_id": "B-1",
            "osm_id": "way/1",
            "number": 0,
            "materials": ["Sandstone"],
            "categories": ["Load-bearing", null, "Vertical"],
            "categoryProps": [],
            "width_mm": null,
            "length_mm": null,
            "height_mm": null,
        })
    );
}

#[tokio::test]
async fn test_selected_category_fields() {
    let graph = setup_columns().await;

    let rows = graph.component_info("Column", Some(" code, Type ,missing")).await.unwrap();
    let json = serde_json::to_value(&rows[0].category_props).unwrap();
    assert_eq!(
        json,
        json!([
            { "name": "Load-bearing", "code": "LB", "Type": "function" },
            { "name": "Vertical", "Type": "orientation" },
        ])
    );
}

#[tokio::test]
async fn test_unnamed_material_and_category_stay_as_null() {
    let db = MemoryBackend::new();
    let depot = node(&db, &["dice_Building"], props([("name", "Depot"), ("osm_id", "way/9")])).await;
    let door = node(&db, &["dice_BuildingObject"], props([("name", "Door"), ("count", "7")])).await;
    link(&db, depot, "dicer_hasPart", door).await;

    let steel = node(&db, &["dice_MaterialEntity"], props([("name", "Steel")])).await;
    let unknown = node(&db, &["dice_MaterialEntity"], props([("density", 7.8)])).await;
    link(&db, door, "hasMaterial", unknown).await;
    link(&db, door, "hasMaterial", steel).await;

    let tagged = node(&db, &["Category"], props([("code", "T1")])).await;
    link(&db, door, "hasCategory", tagged).await;
    let graph = BuildingGraph::with_backend(db);

    let rows = graph.component_info("Door", Some("code")).await.unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["materials"], json!([null, "Steel"]));
    assert_eq!(json[0]["categories"], json!([null]));
    assert_eq!(json[0]["categoryProps"], json!([]));
    assert_eq!(json[0]["number"], json!(0));
}

#[tokio::test]
async fn test_blank_selection_behaves_like_none() {
    let graph = setup_columns().await;

    let rows = graph.component_info("Column", Some(" , ")).await.unwrap();
    assert!(rows.iter().all(|r| r.category_props.is_empty()));
}

#[tokio::test]
async fn test_repeated_lookup_is_byte_identical() {
    let graph = setup_columns().await;

    let a = serde_json::to_string(&graph.component_info("Column", Some("code")).await.unwrap()).unwrap();
    let b = serde_json::to_string(&graph.component_info("Column", Some("code")).await.unwrap()).unwrap();
    assert_eq!(a, b);
}
