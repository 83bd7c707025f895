//! A built graph is shared read-only across threads.

use std::sync::Arc;

use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;
use protograph::{Entity, Graph};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_graph_is_send_and_sync() {
    assert_send_sync::<Graph>();
    assert_send_sync::<protograph::graph::Message<'static>>();
    assert_send_sync::<protograph::AnyEntity<'static>>();
}

#[test]
fn test_concurrent_first_access_agrees() {
    let graph = build(&kitchen_files());
    let fqns = [
        ".google.protobuf.Timestamp",
        ".kitchen.Material",
        ".kitchen.Sink",
        ".kitchen.Kitchen",
    ];

    let results: Vec<Vec<Vec<String>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let graph = &graph;
                scope.spawn(move || {
                    fqns.iter()
                        .map(|fqn| {
                            let message = graph.message(fqn).unwrap();
                            let mut names: Vec<String> = message
                                .dependents()
                                .iter()
                                .map(|e| e.fully_qualified_name().to_string())
                                .collect();
                            names.extend(
                                message
                                    .dependencies()
                                    .iter()
                                    .map(|m| m.fully_qualified_name().to_string()),
                            );
                            names.sort();
                            names
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    let sink = graph.message(".kitchen.Sink").unwrap();
    assert_eq!(results[0][2].len(), sink.dependents().len() + sink.dependencies().len());
}

#[test]
fn test_graph_behind_arc() {
    let graph = Arc::new(build(&kitchen_files()));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            std::thread::spawn(move || {
                let finish = graph.enumeration(".kitchen.Material.Finish").unwrap();
                finish.dependents().len()
            })
        })
        .collect();
    for worker in workers {
        assert_eq!(worker.join().unwrap(), 4);
    }
}
