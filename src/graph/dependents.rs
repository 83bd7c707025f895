//! Dependency indexer.
//!
//! Hydration leaves every entity with its *direct* dependents and
//! dependencies. This module computes the transitive closures on top of them,
//! memoized per entity in `OnceCell`s so that each closure is computed at
//! most once even under concurrent readers.
//!
//! Closures are depth-first, never re-expand an entity already in the result
//! (so reference cycles terminate), are deduplicated by fully-qualified name
//! (paths, for files) and never contain the entity they were computed for.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::base::EntityId;
use crate::graph::entity::{EntityData, EntityKind};
use crate::graph::views::AnyEntity;
use crate::graph::Graph;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Dependents,
    Dependencies,
}

impl Direction {
    fn edges(self, data: &EntityData) -> &[EntityId] {
        match self {
            Direction::Dependents => &data.dependents,
            Direction::Dependencies => &data.dependencies,
        }
    }
}

/// Accumulates ids, deduplicated by FQN.
struct ClosureSet<'a> {
    graph: &'a Graph,
    seen: FxHashSet<&'a str>,
    ids: Vec<EntityId>,
}

impl<'a> ClosureSet<'a> {
    fn new(graph: &'a Graph, exclude_fqn: &'a str) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(exclude_fqn);
        Self {
            graph,
            seen,
            ids: Vec::new(),
        }
    }

    /// Insert `id`; false if an entity of the same FQN is already present.
    fn insert(&mut self, id: EntityId) -> bool {
        let fqn: &'a str = &self.graph.data(id).fqn;
        if self.seen.insert(fqn) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    /// Depth-first walk of `direction` edges starting from `roots`.
    fn walk(&mut self, roots: &[EntityId], direction: Direction) {
        let mut stack: Vec<EntityId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.insert(id) {
                stack.extend(direction.edges(self.graph.data(id)).iter().rev());
            }
        }
    }
}

impl Graph {
    /// Transitive dependents of an entity.
    ///
    /// Messages and files walk their dependent edges (a file's dependents are
    /// its importers). An enum also counts its parent (message or file) and
    /// everything depending on that parent.
    pub(crate) fn dependents_of(&self, id: EntityId) -> &[EntityId] {
        let data = self.data(id);
        data.dependents_closure.get_or_init(|| match data.entity_kind() {
            EntityKind::Enum => {
                let roots: Vec<EntityId> = data
                    .parent
                    .into_iter()
                    .chain(data.dependents.iter().copied())
                    .collect();
                self.flatten_dependents(&roots, &data.fqn)
            }
            _ => {
                let mut set = ClosureSet::new(self, &data.fqn);
                set.walk(&data.dependents, Direction::Dependents);
                set.ids
            }
        })
    }

    /// Transitive dependencies of an entity: the message and enum types of a
    /// message's fields, a service's method messages, or a file's imports
    /// and file-level extension types, each followed by what it depends on.
    pub(crate) fn dependencies_of(&self, id: EntityId) -> &[EntityId] {
        let data = self.data(id);
        data.dependencies_closure.get_or_init(|| {
            let mut set = ClosureSet::new(self, &data.fqn);
            set.walk(&data.dependencies, Direction::Dependencies);
            set.ids
        })
    }

    /// Each of `direct` followed by its own transitive dependents.
    fn flatten_dependents(&self, direct: &[EntityId], exclude_fqn: &str) -> Vec<EntityId> {
        let mut set = ClosureSet::new(self, exclude_fqn);
        for &id in direct {
            set.insert(id);
            for &dependent in self.dependents_of(id) {
                set.insert(dependent);
            }
        }
        set.ids
    }

    /// Fill every closure cell now rather than on first access.
    ///
    /// Cells are filled in parallel. Only enum closures read other cells
    /// (those of their parent and direct dependents, never enums), so no two
    /// initializations wait on each other.
    pub(crate) fn index_dependents(&self) {
        debug!(entities = self.entities.len(), "indexing dependents");
        self.entities
            .par_iter()
            .enumerate()
            .for_each(|(index, data)| {
                let id = EntityId::new(index);
                match data.entity_kind() {
                    EntityKind::Message | EntityKind::Enum | EntityKind::File => {
                        self.dependents_of(id);
                        self.dependencies_of(id);
                    }
                    EntityKind::Service => {
                        self.dependencies_of(id);
                    }
                    _ => {}
                }
            });
    }
}

/// Flatten a list of direct dependents and each one's transitive dependents
/// into one list, deduplicated by fully-qualified name, without
/// `exclude_fqn` (normally the entity the list is being built for).
/// Handles that do not belong to `graph` are ignored.
pub fn get_dependents<'g>(
    graph: &'g Graph,
    direct: &[EntityId],
    exclude_fqn: &str,
) -> Vec<AnyEntity<'g>> {
    let direct: Vec<EntityId> = direct
        .iter()
        .copied()
        .filter(|id| id.index() < graph.entities.len())
        .collect();
    graph
        .flatten_dependents(&direct, exclude_fqn)
        .into_iter()
        .map(|id| AnyEntity::new(graph, id))
        .collect()
}
