//! Error propagation and classification.

use crate::helpers::fixtures::*;
use crate::helpers::stores::CountingStore;
use propsight::codebase::ErrorSeverity;
use propsight::{Properties, PropertyError, ReferenceBuffer, ReferenceIndex};
use rstest::rstest;

// =============================================================================
// MALFORMED IDENTIFIERS
// =============================================================================

#[rstest]
#[case("Foo")]
#[case("App\\Model::id")]
#[case("App\\Model::$id::$x")]
fn test_malformed_fails_every_operation_before_lookup(#[case] raw: &str) {
    let store = CountingStore::new(hierarchy_store());
    let buffer = ReferenceBuffer::new();
    let properties = Properties::new(&store, &buffer);

    let results = [
        properties.property_exists(raw, Some("f"), None).map(|_| ()),
        properties.declaring_class_for_property(raw).map(|_| ()),
        properties.appearing_class_for_property(raw).map(|_| ()),
        properties.property_storage(raw).map(|_| ()),
        properties.property_type(raw, false).map(|_| ()),
        properties.property_type(raw, true).map(|_| ()),
        properties.referencing_locations(raw).map(|_| ()),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, PropertyError::MalformedIdentifier { .. }));
        assert_eq!(err.severity(), ErrorSeverity::ContractViolation);
    }
    assert_eq!(store.lookups(), 0);
    assert!(buffer.is_empty());
}

// =============================================================================
// CLASS NOT FOUND
// =============================================================================

#[test]
fn test_unknown_class_propagates_from_every_operation() {
    let store = hierarchy_store();
    let buffer = ReferenceBuffer::new();
    let properties = Properties::new(&store, &buffer);
    let id = "App\\Missing::$id";
    let expected = PropertyError::class_not_found("App\\Missing");

    assert_eq!(properties.property_exists(id, Some("f"), None).unwrap_err(), expected);
    assert_eq!(properties.declaring_class_for_property(id).unwrap_err(), expected);
    assert_eq!(properties.appearing_class_for_property(id).unwrap_err(), expected);
    assert_eq!(properties.property_storage(id).unwrap_err(), expected);
    assert_eq!(properties.property_type(id, false).unwrap_err(), expected);
    assert_eq!(expected.severity(), ErrorSeverity::Diagnostic);

    // A missing owning class is not an unknown property; no edge is recorded.
    assert!(buffer.is_empty());
}

#[test]
fn test_class_lookup_is_case_sensitive() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    let err = properties
        .property_exists("app\\model::$id", None, None)
        .unwrap_err();
    assert!(matches!(err, PropertyError::ClassNotFound { .. }));
}

#[test]
fn test_missing_declaring_class_propagates_from_storage() {
    let store = broken_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    assert_eq!(
        properties.property_storage("Orphan::$x").unwrap_err(),
        PropertyError::class_not_found("Nowhere")
    );
    // Existence only needs the queried class.
    assert!(properties.property_exists("Orphan::$x", None, None).unwrap());
}

// =============================================================================
// INTERNAL INCONSISTENCY
// =============================================================================

#[test]
fn test_declaring_map_without_storage_is_inconsistent() {
    let store = broken_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    let err = properties.property_storage("Broken::$ghost").unwrap_err();
    assert_eq!(
        err,
        PropertyError::InternalInconsistency {
            property_id: "Broken::$ghost".to_string(),
            declaring_class: "Broken".into(),
        }
    );
    assert_eq!(err.severity(), ErrorSeverity::UnitFatal);

    let err = properties.property_type("Broken::$ghost", false).unwrap_err();
    assert!(matches!(err, PropertyError::InternalInconsistency { .. }));
}

#[test]
fn test_inconsistency_surfaces_when_collecting() {
    let store = broken_store();
    let index = ReferenceIndex::new();
    let mut properties = Properties::new(&store, &index);

    // Without collection, existence does not touch storage.
    assert!(properties.property_exists("Broken::$ghost", None, Some(&location("a.php", 1))).unwrap());

    properties.set_collect_references(true);
    let err = properties
        .property_exists("Broken::$ghost", None, Some(&location("a.php", 1)))
        .unwrap_err();
    assert!(matches!(err, PropertyError::InternalInconsistency { .. }));
}

#[test]
fn test_override_chain_to_undeclared_ancestor_fails() {
    let store = broken_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    let err = properties.property_type("Dangling::$p", false).unwrap_err();
    assert_eq!(err, PropertyError::property_not_found("A::$missing"));
    assert_eq!(err.severity(), ErrorSeverity::UnitFatal);
}

#[test]
fn test_unit_fatal_error_does_not_poison_other_queries() {
    let store = broken_store();
    let index = ReferenceIndex::new();
    let properties = Properties::new(&store, &index);

    assert!(properties.property_type("Broken::$ghost", false).is_err());
    assert_eq!(properties.property_type("LoopB::$p", false).unwrap(), None);
}
