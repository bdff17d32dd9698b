// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Octree colour quantisation.
//
// A colour's path through the tree interleaves its channel bits from the most
// significant down: at level `l` the child index is `r_bit << 2 | g_bit << 1 |
// b_bit` for bit `7 - l`. Nodes at `LEAF_DEPTH` accumulate colours. When the
// leaf count exceeds the budget, the deepest inner node is folded into a leaf.

use std::collections::HashMap;

use chromadump_core::{PaletteEntry, PaletteMethod, Rgb};
use tracing::debug;

use super::{PaletteExtractor, mean_color, sort_by_population};

const LEAF_DEPTH: usize = 7;
const ROOT: usize = 0;

/// Octree quantiser with a bounded number of leaves.
#[derive(Debug, Clone, Copy)]
pub struct Octree {
    pub max_leaves: usize,
}

impl Default for Octree {
    fn default() -> Self {
        Self { max_leaves: 16 }
    }
}

impl PaletteExtractor for Octree {
    fn method(&self) -> PaletteMethod {
        PaletteMethod::Octree
    }

    fn extract(&self, pixels: &[Rgb], colors: usize) -> Vec<PaletteEntry> {
        if pixels.is_empty() || colors == 0 {
            return Vec::new();
        }

        let mut tree = Tree::new();
        for pixel in pixels {
            tree.insert(*pixel);
            while tree.leaf_count > self.max_leaves.max(1) && tree.reduce() {}
        }
        debug!(leaves = tree.leaf_count, nodes = tree.nodes.len(), "Octree built");

        let mut entries = tree.leaf_colors();
        entries.truncate(colors);
        entries
    }
}

#[derive(Debug, Default)]
struct Node {
    children: [Option<usize>; 8],
    is_leaf: bool,
    sum: [u64; 3],
    count: u64,
}

/// Arena-backed octree. Inner nodes are queued per level for reduction,
/// newest last.
struct Tree {
    nodes: Vec<Node>,
    reducible: [Vec<usize>; LEAF_DEPTH],
    leaf_count: usize,
}

impl Tree {
    fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            reducible: Default::default(),
            leaf_count: 0,
        }
    }

    fn add_node(&mut self, level: usize) -> usize {
        let id = self.nodes.len();
        let is_leaf = level == LEAF_DEPTH;
        self.nodes.push(Node {
            is_leaf,
            ..Node::default()
        });
        if is_leaf {
            self.leaf_count += 1;
        } else {
            self.reducible[level].push(id);
        }
        id
    }

    fn insert(&mut self, color: Rgb) {
        let mut node = ROOT;
        let mut level = 0;
        while !self.nodes[node].is_leaf {
            let slot = child_index(color, level);
            node = match self.nodes[node].children[slot] {
                Some(child) => child,
                None => {
                    let child = self.add_node(level + 1);
                    self.nodes[node].children[slot] = Some(child);
                    child
                }
            };
            level += 1;
        }
        let leaf = &mut self.nodes[node];
        for (acc, channel) in leaf.sum.iter_mut().zip(color.0) {
            *acc += channel as u64;
        }
        leaf.count += 1;
    }

    /// Fold the newest inner node of the deepest populated level into a leaf.
    /// Returns false when nothing is left to fold.
    fn reduce(&mut self) -> bool {
        let Some(id) = self.reducible.iter_mut().rev().find_map(|level| level.pop()) else {
            return false;
        };

        let children = std::mem::take(&mut self.nodes[id].children);
        let mut sum = [0u64; 3];
        let mut count = 0;
        for child in children.into_iter().flatten() {
            let child = &self.nodes[child];
            for (acc, channel) in sum.iter_mut().zip(child.sum) {
                *acc += channel;
            }
            count += child.count;
            self.leaf_count -= 1;
        }

        let node = &mut self.nodes[id];
        node.is_leaf = true;
        node.sum = sum;
        node.count = count;
        self.leaf_count += 1;
        true
    }

    /// Averaged leaf colours, identical colours merged, most populous first.
    fn leaf_colors(&self) -> Vec<PaletteEntry> {
        let mut populations: HashMap<Rgb, usize> = HashMap::new();
        let mut order: Vec<Rgb> = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_leaf {
                let color = mean_color(node.sum, node.count);
                let population = populations.entry(color).or_insert_with(|| {
                    order.push(color);
                    0
                });
                *population += node.count as usize;
            } else {
                stack.extend(node.children.iter().rev().flatten());
            }
        }

        let mut entries: Vec<PaletteEntry> = order
            .into_iter()
            .map(|color| PaletteEntry {
                color,
                population: populations[&color],
            })
            .collect();
        sort_by_population(&mut entries);
        entries
    }
}

fn child_index(color: Rgb, level: usize) -> usize {
    let bit = 7 - level;
    let [r, g, b] = color.0.map(|c| ((c >> bit) & 1) as usize);
    (r << 2) | (g << 1) | b
}
