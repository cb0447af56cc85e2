//! Existence checks, reference edges and location collection.

use crate::helpers::fixtures::*;
use propsight::{
    AnalysisConfig, Properties, PropertyStorage, ReferenceBuffer, ReferenceIndex,
};

// =============================================================================
// EXISTS - FOUND / NOT FOUND
// =============================================================================

#[test]
fn test_declared_property_exists() {
    init_tracing();
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    assert!(properties.property_exists("App\\Model::$id", None, None).unwrap());
    assert!(properties.property_exists("App\\User::$email", None, None).unwrap());
}

#[test]
fn test_inherited_and_trait_properties_exist() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    assert!(properties.property_exists("App\\Admin::$id", None, None).unwrap());
    assert!(properties.property_exists("App\\User::$createdAt", None, None).unwrap());
    assert!(properties.property_exists("App\\Admin::$createdAt", None, None).unwrap());
}

#[test]
fn test_missing_property_is_false_not_error() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    assert!(!properties.property_exists("App\\Model::$email", None, None).unwrap());
}

#[test]
fn test_leading_backslash_is_ignored() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    assert!(properties.property_exists("\\App\\Model::$id", None, None).unwrap());
}

// =============================================================================
// EXISTS - REFERENCE EDGES
// =============================================================================

#[test]
fn test_found_records_one_edge_to_declaring_class() {
    let store = hierarchy_store();
    let buffer = ReferenceBuffer::new();
    let properties = Properties::new(&store, &buffer);

    properties
        .property_exists("App\\Admin::$id", Some("App\\Controller::show"), None)
        .unwrap();

    let edges = buffer.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].0, "app\\controller::show");
    assert_eq!(edges[0].1, "app\\model::$id");
}

#[test]
fn test_trait_property_edge_targets_trait() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    properties
        .property_exists("App\\User::$createdAt", Some("report"), None)
        .unwrap();

    assert!(index.has_references("app\\hastimestamps::$createdAt"));
    assert!(!index.has_references("app\\user::$createdAt"));
}

#[test]
fn test_not_found_records_edge_to_queried_class() {
    let store = hierarchy_store();
    let buffer = ReferenceBuffer::new();
    let properties = Properties::new(&store, &buffer);

    let exists = properties
        .property_exists("App\\Admin::$nickname", Some("App\\Controller::show"), None)
        .unwrap();

    assert!(!exists);
    let edges = buffer.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].1, "app\\admin::$nickname");
}

#[test]
fn test_no_calling_method_records_nothing() {
    let store = hierarchy_store();
    let buffer = ReferenceBuffer::new();
    let properties = Properties::new(&store, &buffer);

    properties.property_exists("App\\Model::$id", None, None).unwrap();
    properties.property_exists("App\\Model::$nope", None, None).unwrap();
    properties.property_exists("App\\Model::$id", Some(""), None).unwrap();

    assert!(buffer.is_empty());
}

#[test]
fn test_edges_recorded_with_collection_off() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);
    assert!(!properties.collect_references());

    properties
        .property_exists("App\\Model::$id", Some("f"), Some(&location("a.php", 1)))
        .unwrap();

    assert_eq!(index.referencing_methods("app\\model::$id"), vec!["f"]);
}

// =============================================================================
// EXISTS - LOCATION COLLECTION
// =============================================================================

#[test]
fn test_collection_off_never_populates_locations() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    for line in 0..3 {
        properties
            .property_exists("App\\Model::$id", Some("f"), Some(&location("a.php", line)))
            .unwrap();
    }

    let storage = properties.property_storage("App\\Model::$id").unwrap();
    assert!(storage.referencing_locations().is_none());
}

#[test]
fn test_collection_on_appends_to_declaring_storage() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let config = AnalysisConfig::new().with_collect_references(true);
    let properties = Properties::with_config(&store, &index, config);

    properties
        .property_exists("App\\Admin::$id", None, Some(&location("src/admin.php", 4)))
        .unwrap();
    properties
        .property_exists("App\\Model::$id", None, Some(&location("src/model.php", 7)))
        .unwrap();
    properties
        .property_exists("App\\User::$id", None, Some(&location("src/admin.php", 9)))
        .unwrap();

    let locations = properties
        .referencing_locations("App\\Model::$id")
        .unwrap()
        .unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations["src/admin.php"].len(), 2);
    assert_eq!(locations["src/model.php"][0].span.start.line, 7);
}

#[test]
fn test_collection_on_without_location_leaves_storage_untouched() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let config = AnalysisConfig::new().with_collect_references(true);
    let properties = Properties::with_config(&store, &index, config);

    properties.property_exists("App\\Model::$id", Some("f"), None).unwrap();

    assert!(
        properties
            .referencing_locations("App\\Model::$id")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_trait_property_locations_live_on_trait() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let config = AnalysisConfig::new().with_collect_references(true);
    let properties = Properties::with_config(&store, &index, config);

    properties
        .property_exists("App\\User::$createdAt", None, Some(&location("u.php", 2)))
        .unwrap();

    let storage = properties
        .property_storage("App\\HasTimestamps::$createdAt")
        .unwrap();
    assert_eq!(storage.referencing_locations().unwrap()["u.php"].len(), 1);
}

#[test]
fn test_toggle_mid_run_only_affects_later_calls() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let mut properties = Properties::new(&store, &index);

    properties
        .property_exists("App\\Model::$table", None, Some(&location("a.php", 1)))
        .unwrap();
    assert!(
        properties
            .referencing_locations("App\\Model::$table")
            .unwrap()
            .is_none()
    );

    properties.set_collect_references(true);
    properties
        .property_exists("App\\Model::$table", None, Some(&location("a.php", 2)))
        .unwrap();

    properties.set_collect_references(false);
    properties
        .property_exists("App\\Model::$table", None, Some(&location("a.php", 3)))
        .unwrap();

    let storage: std::sync::Arc<PropertyStorage> =
        properties.property_storage("App\\Model::$table").unwrap();
    let lines: Vec<usize> = storage.referencing_locations().unwrap()["a.php"]
        .iter()
        .map(|l| l.span.start.line)
        .collect();
    assert_eq!(lines, vec![2]);
}

#[test]
fn test_missing_property_never_collects() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let config = AnalysisConfig::new().with_collect_references(true);
    let properties = Properties::with_config(&store, &index, config);

    let exists = properties
        .property_exists("App\\Model::$ghost", None, Some(&location("a.php", 1)))
        .unwrap();
    assert!(!exists);
}
