//! Workers sharing one read-only store, each with its own reference buffer.

use crate::helpers::fixtures::*;
use propsight::{AnalysisConfig, Properties, ReferenceBuffer, ReferenceIndex};
use rayon::prelude::*;

#[test]
fn test_buffered_workers_merge_into_index() {
    let store = hierarchy_store();
    let units: Vec<(String, &str)> = (0..16)
        .map(|i| {
            let property_id = if i % 2 == 0 { "App\\Admin::$id" } else { "App\\User::$nope" };
            (format!("App\\Job{i}::handle"), property_id)
        })
        .collect();

    let buffers: Vec<ReferenceBuffer> = units
        .par_iter()
        .map(|(method, property_id)| {
            let buffer = ReferenceBuffer::new();
            {
                let properties = Properties::new(&store, &buffer);
                properties
                    .property_exists(property_id, Some(method.as_str()), None)
                    .unwrap();
            }
            buffer
        })
        .collect();

    let index = ReferenceIndex::new();
    for buffer in buffers {
        index.absorb(buffer);
    }

    assert_eq!(index.len(), 16);
    assert_eq!(index.referencing_methods("app\\model::$id").len(), 8);
    assert_eq!(index.referencing_methods("app\\user::$nope").len(), 8);
    assert!(index.referencing_methods("app\\model::$id").contains(&"app\\job0::handle".into()));
}

#[test]
fn test_workers_share_index_and_collect_locations() {
    let store = hierarchy_store();
    let index = ReferenceIndex::new();
    let config = AnalysisConfig::new().with_collect_references(true);

    (0..32usize).into_par_iter().for_each(|line| {
        let properties = Properties::with_config(&store, &index, config);
        let file = format!("src/unit{}.php", line % 4);
        properties
            .property_exists("App\\User::$createdAt", Some("shared::run"), Some(&location(&file, line)))
            .unwrap();
    });

    assert_eq!(index.len(), 1);

    let reader = Properties::new(&store, &index);
    let locations = reader
        .referencing_locations("App\\HasTimestamps::$createdAt")
        .unwrap()
        .unwrap();
    assert_eq!(locations.len(), 4);
    assert_eq!(locations.values().map(Vec::len).sum::<usize>(), 32);
}
