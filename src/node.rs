//! Arena nodes for the radix tally.
//!
//! Each node tracks the weight accumulated at its own prefix (`local`), the
//! two bit-children, and a back-reference to its parent. Nodes live in the
//! tree's arena and refer to each other by stable [`NodeId`] indices, so
//! parent links cost nothing to maintain and freed slots can be recycled.
//!
//! A node's `local` is nonzero in two cases: the full key of some `add`
//! ended here, or pruned descendants were folded in. A *terminal* node has
//! a nonzero `local` and no children; it represents a prefix whose finer
//! detail has been shed (or never existed) and is the unit the prune
//! selector works with.

use crate::weight::Weight;

/// Stable index of a node within the tree's arena.
///
/// Index 0 is always the root. Ids are only meaningful for the tree that
/// issued them; a pruned node's id may be reissued for a later allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root's arena slot.
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single trie node.
///
/// Copying is deliberately unsupported: a node is identified by its
/// position in the tree, and duplicating parent back-links has no coherent
/// meaning. The type derives neither `Clone` nor `Copy`.
#[derive(Debug)]
pub struct Node<W> {
    parent: Option<NodeId>,
    child0: Option<NodeId>,
    child1: Option<NodeId>,
    local: W,
    dirty: bool,
}

impl<W: Weight> Node<W> {
    /// A node with no parent and no children. Used for the root and for
    /// resetting freed arena slots.
    pub(crate) fn detached() -> Self {
        Self {
            parent: None,
            child0: None,
            child1: None,
            local: W::zero(),
            dirty: false,
        }
    }

    pub(crate) fn with_parent(parent: NodeId) -> Self {
        Self {
            parent: Some(parent),
            ..Self::detached()
        }
    }

    /// The weight stored at this node alone, excluding descendants.
    pub fn local(&self) -> W {
        self.local
    }

    /// Fold weight into `local` without touching the dirty flag. Dirty
    /// propagation is the tree's job; pruning folds counts without marking
    /// anything dirty because subtree sums are unchanged.
    pub(crate) fn absorb(&mut self, w: W) {
        self.local = self.local.add(w);
    }

    /// Number of present children: 0, 1, or 2.
    pub fn children_count(&self) -> usize {
        usize::from(self.child0.is_some()) + usize::from(self.child1.is_some())
    }

    /// A terminal node has a nonzero count and no children.
    pub fn is_terminal(&self) -> bool {
        !self.local.is_zero() && self.child0.is_none() && self.child1.is_none()
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn child0(&self) -> Option<NodeId> {
        self.child0
    }

    pub(crate) fn child1(&self) -> Option<NodeId> {
        self.child1
    }

    /// Child for the given key bit.
    pub(crate) fn child(&self, bit: bool) -> Option<NodeId> {
        if bit {
            self.child1
        } else {
            self.child0
        }
    }

    pub(crate) fn set_child(&mut self, bit: bool, id: NodeId) {
        if bit {
            self.child1 = Some(id);
        } else {
            self.child0 = Some(id);
        }
    }

    pub(crate) fn clear_child(&mut self, bit: bool) {
        if bit {
            self.child1 = None;
        } else {
            self.child0 = None;
        }
    }

    pub(crate) fn dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}
