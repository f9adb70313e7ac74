//! Forest builder: materializes nested category trees from a flat scan.
//!
//! A node N belongs under P when `N.parent == P.id`; N is a root when it has
//! no parent. Children keep the order in which they appeared in the scan.
//! Records whose parent id matches nothing are dropped along with their
//! subtree; the builder partitions, it does not validate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::domain::entities::{Category, CategoryId, CategoryStatus};

/// One node of the rendered forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    pub status: CategoryStatus,
    pub subcategories: Vec<CategoryNode>,
}

impl CategoryNode {
    fn leaf(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            status: category.status,
            subcategories: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including self.
    pub fn len(&self) -> usize {
        1 + self.subcategories.iter().map(CategoryNode::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.subcategories.is_empty()
    }

    /// Depth-first search for `id` within this subtree.
    pub fn find(&self, id: &CategoryId) -> Option<&CategoryNode> {
        if &self.id == id {
            return Some(self);
        }
        self.subcategories.iter().find_map(|c| c.find(id))
    }
}

/// Ordered sequence of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    pub roots: Vec<CategoryNode>,
}

impl Forest {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes across all trees.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(CategoryNode::len).sum()
    }

    pub fn find(&self, id: &CategoryId) -> Option<&CategoryNode> {
        self.roots.iter().find_map(|r| r.find(id))
    }

    /// Pre-order walk yielding `(depth, node)`.
    pub fn walk(&self) -> Vec<(usize, &CategoryNode)> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack: Vec<(usize, &CategoryNode)> =
            self.roots.iter().rev().map(|n| (0, n)).collect();
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.subcategories.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}

/// Builds forests from flat category scans.
///
/// Holds the parent-id index between the indexing and assembly phases of a
/// single call; the index is rebuilt on every `build`.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    children_of: HashMap<CategoryId, Vec<usize>>,
    roots: Vec<usize>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the forest in O(n) using a parent-id → children index.
    #[instrument(level = "debug", skip_all, fields(n = categories.len()))]
    pub fn build(&mut self, categories: &[Category]) -> Forest {
        self.index(categories);

        // Breadth-first discovery from the roots. Anything not reached here
        // hangs off a dangling parent (or a cycle) and is left out.
        let mut order: Vec<usize> = Vec::with_capacity(categories.len());
        order.extend(self.roots.iter().copied());
        let mut cursor = 0;
        while cursor < order.len() {
            let idx = order[cursor];
            if let Some(children) = self.children_of.get(&categories[idx].id) {
                order.extend(children.iter().copied());
            }
            cursor += 1;
        }
        trace!(
            reachable = order.len(),
            omitted = categories.len().saturating_sub(order.len()),
            "indexed forest"
        );

        // Assemble bottom-up so every child is finished before its parent.
        let mut built: HashMap<usize, CategoryNode> = HashMap::with_capacity(order.len());
        for &idx in order.iter().rev() {
            let category = &categories[idx];
            let mut node = CategoryNode::leaf(category);
            if let Some(children) = self.children_of.get(&category.id) {
                node.subcategories = children
                    .iter()
                    .filter_map(|child| built.remove(child))
                    .collect();
            }
            built.insert(idx, node);
        }

        let roots = self
            .roots
            .iter()
            .filter_map(|idx| built.remove(idx))
            .collect();
        Forest { roots }
    }

    /// Build the forest by re-filtering the full set for every node, O(n²).
    ///
    /// Produces the same output as [`ForestBuilder::build`].
    pub fn build_naive(categories: &[Category]) -> Forest {
        fn level(categories: &[Category], parent: Option<&CategoryId>) -> Vec<CategoryNode> {
            categories
                .iter()
                .filter(|c| c.parent.as_ref() == parent)
                .map(|c| CategoryNode {
                    subcategories: level(categories, Some(&c.id)),
                    ..CategoryNode::leaf(c)
                })
                .collect()
        }

        Forest {
            roots: level(categories, None),
        }
    }

    fn index(&mut self, categories: &[Category]) {
        self.children_of.clear();
        self.roots.clear();

        for (idx, category) in categories.iter().enumerate() {
            match &category.parent {
                None => self.roots.push(idx),
                Some(parent) => self
                    .children_of
                    .entry(parent.clone())
                    .or_default()
                    .push(idx),
            }
        }
    }
}
