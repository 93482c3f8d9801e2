//! Family tree queries over parent links

use ahash::AHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed, Topo};
use petgraph::Direction;

use crate::pet::{Pet, PetId};

/// Directed parent -> child graph built from a set of pets
///
/// Parents missing from the set (released pets) are left out, so their
/// children count as founders.
pub struct FamilyTree {
    graph: DiGraph<PetId, ()>,
    nodes: AHashMap<PetId, NodeIndex>,
    generations: AHashMap<PetId, u32>,
}

impl FamilyTree {
    pub fn new(pets: &[Pet]) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = AHashMap::with_capacity(pets.len());

        for pet in pets {
            nodes.entry(pet.id).or_insert_with(|| graph.add_node(pet.id));
        }

        for pet in pets {
            let Some(parents) = pet.parent_ids else {
                continue;
            };
            let child = nodes[&pet.id];
            for parent in parents {
                if let Some(&parent_idx) = nodes.get(&parent) {
                    graph.update_edge(parent_idx, child, ());
                }
            }
        }

        let mut generations = AHashMap::with_capacity(pets.len());
        let mut topo = Topo::new(&graph);
        while let Some(node) = topo.next(&graph) {
            let generation = graph
                .neighbors_directed(node, Direction::Incoming)
                .filter_map(|parent| generations.get(&graph[parent]).copied())
                .max()
                .map_or(0, |deepest: u32| deepest + 1);
            generations.insert(graph[node], generation);
        }

        Self {
            graph,
            nodes,
            generations,
        }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: PetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Parents present in the tree, ordered by id
    pub fn parents(&self, id: PetId) -> Vec<PetId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Children present in the tree, ordered by id
    pub fn children(&self, id: PetId) -> Vec<PetId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Every ancestor, ordered by id
    pub fn ancestors(&self, id: PetId) -> Vec<PetId> {
        let Some(&start) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let reversed = Reversed(&self.graph);
        let mut bfs = Bfs::new(reversed, start);
        let mut found = Vec::new();
        while let Some(node) = bfs.next(reversed) {
            if node != start {
                found.push(self.graph[node]);
            }
        }
        found.sort();
        found
    }

    /// Every descendant, ordered by id
    pub fn descendants(&self, id: PetId) -> Vec<PetId> {
        let Some(&start) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut found = Vec::new();
        while let Some(node) = bfs.next(&self.graph) {
            if node != start {
                found.push(self.graph[node]);
            }
        }
        found.sort();
        found
    }

    /// 0 for founders, otherwise one more than the deepest parent
    pub fn generation(&self, id: PetId) -> Option<u32> {
        self.generations.get(&id).copied()
    }

    fn neighbors(&self, id: PetId, direction: Direction) -> Vec<PetId> {
        let Some(&node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let mut found: Vec<PetId> = self
            .graph
            .neighbors_directed(node, direction)
            .map(|idx| self.graph[idx])
            .collect();
        found.sort();
        found
    }
}
