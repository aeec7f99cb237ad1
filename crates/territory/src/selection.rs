//! Cascading selection over a territory tree.
//!
//! Checking a territory grants its entire subtree: the checked node becomes
//! an *explicit* entry and every descendant is carried along as a
//! *non-explicit* entry. Non-explicit entries exist solely to render checked
//! (and disabled) state for descendants; they are never submitted, because
//! granting a parent level already implies the whole subtree and flattening
//! to leaves would change the grant's meaning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use terragate_core::{DomainError, DomainResult, TerritoryId};

use crate::node::{TerritoryKind, TerritoryTree};

/// One selected territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub ref_id: TerritoryId,
    /// Upper-cased kind label, the wire form of the granted level.
    pub access_level: String,
    pub name: String,
    pub kind: TerritoryKind,
    /// `true` when the user directly checked this node. `false` entries are
    /// implied purely by an ancestor and must never be submitted.
    pub explicit: bool,
}

/// The current selection, keyed by territory id.
///
/// # Invariants
/// - Every explicit entry's full descendant set is present as non-explicit
///   entries.
/// - Removing an explicit entry removes every descendant entry that existed
///   only because of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    entries: BTreeMap<TerritoryId, SelectionEntry>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &TerritoryId) -> Option<&SelectionEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &TerritoryId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by territory id.
    pub fn entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values()
    }

    /// The entries the user directly checked. This is the only part of the
    /// selection that may be handed to the grant-submission collaborator.
    pub fn explicit_entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values().filter(|e| e.explicit)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn insert(&mut self, entry: SelectionEntry) {
        self.entries.insert(entry.ref_id.clone(), entry);
    }

    fn remove(&mut self, id: &TerritoryId) -> Option<SelectionEntry> {
        self.entries.remove(id)
    }
}

/// Cascading checked/disabled state over a [`TerritoryTree`].
///
/// Single-writer and synchronous; snapshots of the selection are handed out
/// as owned copies, so no shared mutable state crosses the component
/// boundary.
#[derive(Debug)]
pub struct SelectionEngine<'t> {
    tree: &'t TerritoryTree,
    selection: SelectionSet,
}

impl<'t> SelectionEngine<'t> {
    pub fn new(tree: &'t TerritoryTree) -> Self {
        Self {
            tree,
            selection: SelectionSet::new(),
        }
    }

    /// Resume from a previously captured selection (e.g. editing an existing
    /// grant).
    pub fn with_selection(tree: &'t TerritoryTree, selection: SelectionSet) -> Self {
        Self { tree, selection }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Hand the selection to the caller, consuming the engine.
    pub fn into_selection(self) -> SelectionSet {
        self.selection
    }

    /// Drop the whole selection (form reset).
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Whether the node renders as checked.
    pub fn is_selected(&self, id: &TerritoryId) -> bool {
        self.selection.contains(id)
    }

    /// Whether the node renders as checked but locked: a non-explicit member
    /// of the set, implied by an explicit ancestor.
    pub fn is_disabled(&self, id: &TerritoryId) -> bool {
        self.selection.get(id).is_some_and(|e| !e.explicit)
    }

    /// Flip the selection state of `id`, cascading over its subtree.
    ///
    /// Total over any input: unknown ids and disabled nodes are no-ops, so a
    /// caller racing a stale render cannot corrupt the selection.
    pub fn toggle(&mut self, id: &TerritoryId) {
        let Some(territory) = self.tree.get(id) else {
            tracing::debug!(territory = %id, "toggle on unknown territory ignored");
            return;
        };

        if self.is_disabled(id) {
            tracing::debug!(territory = %id, "toggle on implied territory ignored");
            return;
        }

        if self.selection.contains(id) {
            self.selection.remove(id);
            for descendant in self.tree.descendants(id) {
                self.selection.remove(&descendant);
            }
            return;
        }

        self.selection.insert(SelectionEntry {
            ref_id: id.clone(),
            access_level: territory.kind().access_level().to_string(),
            name: territory.name().to_string(),
            kind: territory.kind(),
            explicit: true,
        });
        for descendant in self.tree.descendants(id) {
            // The walk only yields ids the tree itself produced.
            let Some(node) = self.tree.get(&descendant) else {
                continue;
            };
            self.selection.insert(SelectionEntry {
                ref_id: descendant,
                access_level: node.kind().access_level().to_string(),
                name: node.name().to_string(),
                kind: node.kind(),
                explicit: false,
            });
        }
    }

    /// Check the selection invariants hold against the tree.
    ///
    /// Every explicit entry's descendants must be present and non-explicit,
    /// and every non-explicit entry must be covered by an explicit ancestor.
    pub fn verify_invariants(&self) -> DomainResult<()> {
        for entry in self.selection.entries() {
            if entry.explicit {
                for descendant in self.tree.descendants(&entry.ref_id) {
                    match self.selection.get(&descendant) {
                        Some(d) if !d.explicit => {}
                        Some(_) => {
                            return Err(DomainError::invariant(format!(
                                "descendant '{descendant}' of explicit '{}' is itself explicit",
                                entry.ref_id
                            )));
                        }
                        None => {
                            return Err(DomainError::invariant(format!(
                                "descendant '{descendant}' of explicit '{}' is missing",
                                entry.ref_id
                            )));
                        }
                    }
                }
            } else {
                let covered = self.explicit_ancestor_of(&entry.ref_id);
                if !covered {
                    return Err(DomainError::invariant(format!(
                        "non-explicit entry '{}' has no explicit ancestor",
                        entry.ref_id
                    )));
                }
            }
        }
        Ok(())
    }

    fn explicit_ancestor_of(&self, id: &TerritoryId) -> bool {
        let mut current = self.tree.get(id).and_then(|t| t.parent().cloned());
        while let Some(ancestor) = current {
            if self.selection.get(&ancestor).is_some_and(|e| e.explicit) {
                return true;
            }
            current = self.tree.get(&ancestor).and_then(|t| t.parent().cloned());
        }
        false
    }
}
