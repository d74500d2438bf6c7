use super::handle::Handle;

/// Node color for red-black rebalancing.
///
/// The invariants the engine maintains:
/// - a red node never has a red child;
/// - every root-to-null path crosses the same number of black nodes;
/// - the root is always black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A single tree node: the key, the balancing metadata, and a handle into
/// the separate value arena.
///
/// `left` and `right` are ownership edges in spirit (a subtree is reachable
/// only through its parent); `parent` is a plain back index, so the
/// reference cycle never becomes an ownership cycle. Values live in their
/// own arena (see `RawTree`), which lets the mutable iterators lend out
/// `&mut V` while traversal still reads node links.
#[derive(Clone)]
pub(crate) struct Node<K> {
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    color: Color,
    key: K,
    value: Handle,
}

impl<K> Node<K> {
    /// Creates a detached red node; insertion always attaches red leaves.
    pub(crate) const fn new(key: K, value: Handle) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            key,
            value,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value_handle(&self) -> Handle {
        self.value
    }

    /// Consumes the node, returning its key and value handle.
    pub(crate) fn into_payload(self) -> (K, Handle) {
        (self.key, self.value)
    }

    /// Swaps payloads with another node, leaving links and colors in place.
    /// This is how a two-child erase reduces to the at-most-one-child case.
    pub(crate) fn swap_payload(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.key, &mut other.key);
        core::mem::swap(&mut self.value, &mut other.value);
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Returns the child on the given side.
    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Sets the child on the given side.
    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Which child slot of a parent a node occupies.
///
/// The insertion and deletion fixups are written once over `Side` and its
/// mirror instead of duplicating the left/right case bodies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn mirror(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
