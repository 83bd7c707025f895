//! Graph construction and assertion helpers.

use protograph::descriptor::FileDescriptorProto;
use protograph::{Diagnostic, DiagnosticCollector, DiagnosticSink, Entity, Graph, GraphBuilder};

/// Build a graph where every file is a target, returning the sink alongside.
pub fn build_with_sink(files: &[FileDescriptorProto]) -> (Graph, DiagnosticCollector) {
    let mut sink = DiagnosticCollector::new();
    let targets: Vec<&str> = files.iter().map(|f| f.name()).collect();
    let graph = GraphBuilder::new(&mut sink).build_files(files, &targets);
    (graph, sink)
}

/// Build a graph and assert construction reported no errors.
pub fn build(files: &[FileDescriptorProto]) -> Graph {
    let (graph, sink) = build_with_sink(files);
    assert_no_errors(&sink);
    graph
}

/// Build with every dependency closure computed during construction.
pub fn build_indexed(files: &[FileDescriptorProto]) -> Graph {
    let mut sink = DiagnosticCollector::new();
    let targets: Vec<&str> = files.iter().map(|f| f.name()).collect();
    let graph = GraphBuilder::new(&mut sink)
        .index_dependents(true)
        .build_files(files, &targets);
    assert_no_errors(&sink);
    graph
}

pub fn assert_no_errors(sink: &DiagnosticCollector) {
    assert!(
        !sink.failed(),
        "Expected no errors, got:\n{}",
        sink.diagnostics()
            .iter()
            .map(|d| format!("  [{}] {}", d.code.as_deref().unwrap_or("-"), d.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Codes of every diagnostic, in report order.
pub fn codes(sink: &DiagnosticCollector) -> Vec<&str> {
    sink.diagnostics()
        .iter()
        .filter_map(|d: &Diagnostic| d.code.as_deref())
        .collect()
}

/// Fully-qualified names of `entities`, sorted.
pub fn sorted_names<'g, E: Entity<'g>>(entities: &[E]) -> Vec<&'g str> {
    let mut names: Vec<&str> = entities.iter().map(|e| e.fully_qualified_name()).collect();
    names.sort_unstable();
    names
}

/// Fully-qualified names of `entities`, in order.
pub fn names<'g, E: Entity<'g>>(entities: &[E]) -> Vec<&'g str> {
    entities.iter().map(|e| e.fully_qualified_name()).collect()
}
