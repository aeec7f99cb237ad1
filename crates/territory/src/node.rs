//! The six-level territory hierarchy.
//!
//! Territories arrive from the master-data collaborator as a nested node
//! listing and are validated into an immutable, id-indexed [`TerritoryTree`].
//! Depth strictly corresponds to kind order and ids are unique within one
//! tree; both are enforced at construction so every consumer downstream can
//! treat the tree as well-formed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use terragate_core::{DomainError, DomainResult, TerritoryId};

/// Level of a node in the territory hierarchy.
///
/// The order of the variants is the depth order of the tree: islands at the
/// root, IUPs at the leaves. Kind is metadata attached to a node; tree walks
/// never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerritoryKind {
    Island,
    Group,
    Area,
    IupZone,
    IupSegmentation,
    Iup,
}

impl TerritoryKind {
    /// Depth at which nodes of this kind must appear (root = 0).
    pub const fn depth(self) -> usize {
        match self {
            TerritoryKind::Island => 0,
            TerritoryKind::Group => 1,
            TerritoryKind::Area => 2,
            TerritoryKind::IupZone => 3,
            TerritoryKind::IupSegmentation => 4,
            TerritoryKind::Iup => 5,
        }
    }

    /// Kind expected at a given depth, if any.
    pub const fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(TerritoryKind::Island),
            1 => Some(TerritoryKind::Group),
            2 => Some(TerritoryKind::Area),
            3 => Some(TerritoryKind::IupZone),
            4 => Some(TerritoryKind::IupSegmentation),
            5 => Some(TerritoryKind::Iup),
            _ => None,
        }
    }

    /// Upper-cased wire label used as the access level of a grant entry.
    pub const fn access_level(self) -> &'static str {
        match self {
            TerritoryKind::Island => "ISLAND",
            TerritoryKind::Group => "GROUP",
            TerritoryKind::Area => "AREA",
            TerritoryKind::IupZone => "IUP_ZONE",
            TerritoryKind::IupSegmentation => "IUP_SEGMENTATION",
            TerritoryKind::Iup => "IUP",
        }
    }

    /// Whether this kind sits at the bottom of the hierarchy.
    pub const fn is_leaf_level(self) -> bool {
        matches!(self, TerritoryKind::Iup)
    }
}

impl core::fmt::Display for TerritoryKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.access_level())
    }
}

/// One node of the hierarchy as delivered by the master-data collaborator.
///
/// This is the construction-time shape; after validation the tree is stored
/// flattened and indexed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryNode {
    pub id: TerritoryId,
    pub name: String,
    pub kind: TerritoryKind,
    #[serde(default)]
    pub children: Vec<TerritoryNode>,
}

impl TerritoryNode {
    pub fn new(id: impl Into<TerritoryId>, name: impl Into<String>, kind: TerritoryKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TerritoryNode>) -> Self {
        self.children = children;
        self
    }
}

/// Indexed view of one territory inside a validated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    name: String,
    kind: TerritoryKind,
    parent: Option<TerritoryId>,
    children: Vec<TerritoryId>,
}

impl Territory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TerritoryKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&TerritoryId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[TerritoryId] {
        &self.children
    }
}

/// Immutable, validated territory hierarchy.
///
/// # Invariants
/// - Every node's kind matches its depth (roots are islands, their children
///   groups, and so on down to IUPs).
/// - Ids are unique across the whole tree.
/// - Acyclic: built from an owned nested listing, stored as child id lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerritoryTree {
    roots: Vec<TerritoryId>,
    nodes: HashMap<TerritoryId, Territory>,
}

impl TerritoryTree {
    /// Validate and index a nested node listing.
    pub fn from_roots(roots: Vec<TerritoryNode>) -> DomainResult<Self> {
        let mut tree = Self {
            roots: roots.iter().map(|r| r.id.clone()).collect(),
            nodes: HashMap::new(),
        };
        for root in roots {
            tree.index_node(root, None, 0)?;
        }
        Ok(tree)
    }

    fn index_node(
        &mut self,
        node: TerritoryNode,
        parent: Option<TerritoryId>,
        depth: usize,
    ) -> DomainResult<()> {
        if node.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "territory '{}' has an empty name",
                node.id
            )));
        }
        if node.kind.depth() != depth {
            return Err(DomainError::invariant(format!(
                "territory '{}' is {} but sits at depth {depth}",
                node.id, node.kind
            )));
        }
        if self.nodes.contains_key(&node.id) {
            return Err(DomainError::conflict(format!(
                "duplicate territory id '{}'",
                node.id
            )));
        }

        let id = node.id;
        self.nodes.insert(
            id.clone(),
            Territory {
                name: node.name,
                kind: node.kind,
                parent,
                children: node.children.iter().map(|c| c.id.clone()).collect(),
            },
        );

        for child in node.children {
            self.index_node(child, Some(id.clone()), depth + 1)?;
        }
        Ok(())
    }

    pub fn roots(&self) -> &[TerritoryId] {
        &self.roots
    }

    pub fn get(&self, id: &TerritoryId) -> Option<&Territory> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &TerritoryId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of territories in the tree (all levels).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All ids beneath `id`, in depth-first preorder.
    ///
    /// One generic recursive walk over the `children` lists; every level of
    /// the hierarchy descends the same way. Unknown ids yield an empty set.
    pub fn descendants(&self, id: &TerritoryId) -> Vec<TerritoryId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: &TerritoryId, out: &mut Vec<TerritoryId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        for child in &node.children {
            out.push(child.clone());
            self.collect_descendants(child, out);
        }
    }

    /// All ids in the tree, in depth-first preorder starting from the roots.
    pub fn ids(&self) -> Vec<TerritoryId> {
        let mut out = Vec::new();
        for root in &self.roots {
            out.push(root.clone());
            self.collect_descendants(root, &mut out);
        }
        out
    }
}
