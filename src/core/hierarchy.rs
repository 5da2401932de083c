//! core::hierarchy
//!
//! Flattening of the category tree into fully-qualified entries.
//!
//! # Architecture
//!
//! The categories endpoint returns a flat list where each record points at
//! its parent by id. Flattening folds every ancestor into the record itself:
//! - the name becomes the full path, `"Grandparent > Parent > Child"`
//! - the slug list becomes the path back to the top, `[child, parent, grandparent]`
//!
//! Records live in an index-addressable arena with an explicit `resolved`
//! flag. A pass resolves every record whose parent was already resolved when
//! the pass started, so one ancestor level is folded in per pass. Passes
//! repeat until nothing changes.
//!
//! # Invariants
//!
//! - A resolved record never changes again
//! - A pass that resolves nothing ends the loop; whatever is still
//!   unresolved (missing parent or a cycle) is reported as an orphan
//! - Orphans are excluded from the entries, never fatal
//!
//! # Example
//!
//! ```
//! use wooflat::core::hierarchy::flatten;
//! use wooflat::core::types::RawCategory;
//!
//! let report = flatten(&[
//!     RawCategory::new(1, "Clothing", "clothing", 0),
//!     RawCategory::new(2, "Shirts", "shirts", 1),
//! ]);
//!
//! assert_eq!(report.entries[1].label, "Clothing > Shirts");
//! assert_eq!(
//!     report.entries[1].slugs().collect::<Vec<_>>(),
//!     vec!["shirts", "clothing"]
//! );
//! assert!(report.orphans.is_empty());
//! ```

use std::collections::HashMap;

use super::collate::sort_by_collation;
use super::types::{CategoryId, FlatEntry, RawCategory, SlugRef};

/// Separator placed between ancestor names in a label.
pub const LABEL_SEPARATOR: &str = " > ";

/// A category whose ancestor chain could not be resolved.
///
/// Either its parent does not exist or it sits on a cycle; the two cases
/// are not told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub id: CategoryId,
    pub name: String,
    pub parent: CategoryId,
}

/// Result of flattening a category list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Resolved categories, sorted by label.
    pub entries: Vec<FlatEntry>,
    /// Categories left unresolved, in input order.
    pub orphans: Vec<Orphan>,
    /// Number of passes that ran.
    pub passes: usize,
}

impl FlattenReport {
    pub fn has_orphans(&self) -> bool {
        !self.orphans.is_empty()
    }

    /// Names of the orphaned categories, in input order.
    pub fn orphan_names(&self) -> Vec<&str> {
        self.orphans.iter().map(|o| o.name.as_str()).collect()
    }
}

/// A category being flattened.
#[derive(Debug, Clone)]
struct Node {
    id: CategoryId,
    name: String,
    parent: CategoryId,
    slugs: Vec<String>,
    resolved: bool,
}

/// Arena of categories indexed by id.
#[derive(Debug, Default)]
pub struct CategoryHierarchy {
    nodes: Vec<Node>,
    index: HashMap<CategoryId, usize>,
}

impl CategoryHierarchy {
    /// Load categories into the arena.
    ///
    /// Top-level categories start out resolved.
    pub fn new(categories: &[RawCategory]) -> Self {
        let mut nodes = Vec::with_capacity(categories.len());
        let mut index = HashMap::with_capacity(categories.len());

        for (position, category) in categories.iter().enumerate() {
            if index.insert(category.id, position).is_some() {
                tracing::warn!(id = %category.id, "duplicate category id; later record wins");
            }
            nodes.push(Node {
                id: category.id,
                name: category.name.clone(),
                parent: category.parent,
                slugs: vec![category.slug.clone()],
                resolved: category.is_top_level(),
            });
        }

        Self { nodes, index }
    }

    /// Number of categories not yet resolved.
    pub fn unresolved_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.resolved).count()
    }

    /// Run one pass, returning how many categories it resolved.
    ///
    /// Parents are looked up among the categories that were resolved when
    /// the pass started, so a category resolved during this pass cannot
    /// serve as a parent until the next one.
    pub fn resolve_pass(&mut self) -> usize {
        let resolved_at_start: Vec<bool> = self.nodes.iter().map(|n| n.resolved).collect();

        let updates: Vec<(usize, String, Vec<String>)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.resolved)
            .filter_map(|(position, node)| {
                let parent_pos = *self.index.get(&node.parent)?;
                if !resolved_at_start[parent_pos] {
                    return None;
                }
                let parent = &self.nodes[parent_pos];
                let name = format!("{}{}{}", parent.name, LABEL_SEPARATOR, node.name);
                let mut slugs = node.slugs.clone();
                slugs.extend(parent.slugs.iter().cloned());
                Some((position, name, slugs))
            })
            .collect();

        let resolved = updates.len();
        for (position, name, slugs) in updates {
            let node = &mut self.nodes[position];
            node.name = name;
            node.slugs = slugs;
            node.resolved = true;
        }
        resolved
    }

    /// Resolve until a fixed point and project into a report.
    pub fn into_report(mut self) -> FlattenReport {
        let mut passes = 0;
        let mut unresolved = self.unresolved_count();

        while unresolved > 0 {
            self.resolve_pass();
            passes += 1;

            let remaining = self.unresolved_count();
            tracing::debug!(pass = passes, remaining, "flattening pass finished");
            if remaining == unresolved {
                break;
            }
            unresolved = remaining;
        }

        let orphans: Vec<Orphan> = self
            .nodes
            .iter()
            .filter(|n| !n.resolved)
            .map(|n| Orphan {
                id: n.id,
                name: n.name.clone(),
                parent: n.parent,
            })
            .collect();

        if !orphans.is_empty() {
            tracing::debug!(
                count = orphans.len(),
                names = ?orphans.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
                "subcategories without a resolvable parent"
            );
        }

        let mut entries: Vec<FlatEntry> = self
            .nodes
            .into_iter()
            .filter(|n| n.resolved)
            .map(|n| FlatEntry {
                label: n.name,
                value: n.slugs.into_iter().map(SlugRef::new).collect(),
            })
            .collect();
        sort_by_collation(&mut entries, |e| e.label.as_str());

        FlattenReport {
            entries,
            orphans,
            passes,
        }
    }
}

/// Flatten a category list into sorted, fully-qualified entries.
pub fn flatten(categories: &[RawCategory]) -> FlattenReport {
    CategoryHierarchy::new(categories).into_report()
}
