use core::borrow::Borrow;
use core::cmp::Ordering;
use core::marker::PhantomData;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// The red-black tree engine backing `RBTreeMap`, `RBTreeSet`, and
/// `RBTreeMultiset`.
///
/// Keys and balancing metadata live in the node arena; values live in their
/// own arena and are reached through a per-node handle. The split keeps
/// mutable value borrows disjoint from link traversal, which is what makes
/// the raw-pointer mutable iterators sound.
///
/// There is no materialized sentinel node: the empty tree is `root: None`,
/// and the past-the-end position is the exhausted cursor state. The root's
/// parent is always `None` and the root is always black.
pub(crate) struct RawTree<K, V> {
    nodes: Arena<Node<K>>,
    values: Arena<V>,
    root: Option<Handle>,
    len: usize,
}

impl<K: Clone, V: Clone> Clone for RawTree<K, V> {
    fn clone(&self) -> Self {
        // Slot-for-slot arena copies keep every handle valid, so the clone
        // is a structurally identical tree with freshly owned payloads.
        Self {
            nodes: self.nodes.clone(),
            values: self.values.clone(),
            root: self.root,
            len: self.len,
        }
    }
}

impl<K, V> RawTree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// The theoretical element limit: the arena handle space.
    pub(crate) const fn max_size() -> usize {
        Handle::MAX
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(self.nodes.get(handle).value_handle())
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        let vh = self.nodes.get(handle).value_handle();
        self.values.get_mut(vh)
    }

    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get(node.value_handle()))
    }

    /// Reads a node's key and a mutable reference to its value through a raw
    /// tree pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawTree<K, V>` that outlives
    ///   `'a`.
    /// - The caller must have logical exclusive access to the value at
    ///   `handle` for `'a`.
    pub(crate) unsafe fn entry_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> (&'a K, &'a mut V) {
        // SAFETY: The node access is shared and never aliases a value; the
        // exclusive value borrow targets the separate value arena.
        unsafe {
            let node = Arena::get_ptr(core::ptr::addr_of!((*ptr).nodes), handle);
            let value = Arena::get_mut_ptr(core::ptr::addr_of_mut!((*ptr).values), node.value_handle());
            (node.key(), value)
        }
    }

    /// Descends to the extreme node of a subtree on the given side.
    fn extremum(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// The leftmost node: smallest key, `begin()` of the ordered walk.
    pub(crate) fn first_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.extremum(root, Side::Left))
    }

    /// The rightmost node: largest key, the predecessor of the end position.
    pub(crate) fn last_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.extremum(root, Side::Right))
    }

    /// In-order successor; `None` past the maximum.
    pub(crate) fn next_handle(&self, handle: Handle) -> Option<Handle> {
        // SAFETY: `self` is a valid shared reference for the whole call.
        unsafe { Self::next_handle_ptr(self, handle) }
    }

    /// In-order predecessor; `None` before the minimum.
    pub(crate) fn prev_handle(&self, handle: Handle) -> Option<Handle> {
        // SAFETY: `self` is a valid shared reference for the whole call.
        unsafe { Self::prev_handle_ptr(self, handle) }
    }

    /// Successor computed through a raw tree pointer, for the mutable
    /// iterators which cannot hold `&self` while values are borrowed.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawTree<K, V>`.
    pub(crate) unsafe fn next_handle_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: Only shared node references are formed; values are never
        // touched.
        unsafe {
            let nodes = core::ptr::addr_of!((*ptr).nodes);
            let node = Arena::get_ptr(nodes, handle);
            // A right subtree exists: the successor is its leftmost node.
            if let Some(mut current) = node.right() {
                loop {
                    match Arena::get_ptr(nodes, current).left() {
                        Some(left) => current = left,
                        None => return Some(current),
                    }
                }
            }
            // Otherwise ascend until an ancestor is reached via a left edge.
            let mut current = handle;
            let mut parent = node.parent();
            while let Some(p) = parent {
                let parent_node = Arena::get_ptr(nodes, p);
                if parent_node.right() == Some(current) {
                    current = p;
                    parent = parent_node.parent();
                } else {
                    return Some(p);
                }
            }
            None
        }
    }

    /// Mirror of [`Self::next_handle_ptr`].
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawTree<K, V>`.
    pub(crate) unsafe fn prev_handle_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: Only shared node references are formed; values are never
        // touched.
        unsafe {
            let nodes = core::ptr::addr_of!((*ptr).nodes);
            let node = Arena::get_ptr(nodes, handle);
            if let Some(mut current) = node.left() {
                loop {
                    match Arena::get_ptr(nodes, current).right() {
                        Some(right) => current = right,
                        None => return Some(current),
                    }
                }
            }
            let mut current = handle;
            let mut parent = node.parent();
            while let Some(p) = parent {
                let parent_node = Arena::get_ptr(nodes, p);
                if parent_node.left() == Some(current) {
                    current = p;
                    parent = parent_node.parent();
                } else {
                    return Some(p);
                }
            }
            None
        }
    }

    /// Drains the tree into an ascending `Vec` of payloads.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        let mut out = Vec::with_capacity(self.len);
        // The stack holds the unvisited left spine, so its depth is bounded
        // by the tree height (at most 2·log2(n + 1)).
        let mut spine: SmallVec<[Handle; 64]> = SmallVec::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                spine.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = spine.pop() else { break };
            current = self.nodes.get(handle).right();
            let (key, vh) = self.nodes.take(handle).into_payload();
            out.push((key, self.values.take(vh)));
        }
        self.root = None;
        self.len = 0;
        out
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes.get(h).is_red())
    }

    /// Absent children count as black (they stand in for the null leaves).
    fn is_black(&self, handle: Option<Handle>) -> bool {
        !self.is_red(handle)
    }

    /// Re-points `parent`'s slot for `old` (or the root reference) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left() == Some(old) {
                    parent_node.set_left(new);
                } else {
                    parent_node.set_right(new);
                }
            }
        }
    }

    /// Rotates `x` down toward `side`, promoting its opposite child.
    /// `rotate(x, Side::Left)` is the classic left rotation.
    fn rotate(&mut self, x: Handle, side: Side) {
        let up = side.mirror();
        let y = self.nodes.get(x).child(up).expect("rotation requires a child to promote");

        // The promoted child's inner subtree crosses over to `x`.
        let inner = self.nodes.get(y).child(side);
        self.nodes.get_mut(x).set_child(up, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(x));
        }

        // Re-seat `y` where `x` was.
        let parent = self.nodes.get(x).parent();
        self.nodes.get_mut(y).set_parent(parent);
        self.replace_child(parent, x, Some(y));

        self.nodes.get_mut(y).set_child(side, Some(x));
        self.nodes.get_mut(x).set_parent(Some(y));
    }

    /// Restores the red-black invariants after attaching the red leaf `x`.
    fn fix_insert(&mut self, mut x: Handle) {
        while let Some(p) = self.nodes.get(x).parent() {
            if !self.nodes.get(p).is_red() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let g = self.nodes.get(p).parent().expect("red parent has a grandparent");
            let p_side = if self.nodes.get(g).left() == Some(p) { Side::Left } else { Side::Right };
            let uncle = self.nodes.get(g).child(p_side.mirror());

            if self.is_red(uncle) {
                // Red uncle: recolor and continue from the grandparent.
                self.nodes.get_mut(p).set_color(Color::Black);
                self.nodes.get_mut(uncle.expect("red uncle exists")).set_color(Color::Black);
                self.nodes.get_mut(g).set_color(Color::Red);
                x = g;
            } else {
                // Black or absent uncle: one or two rotations terminate.
                if self.nodes.get(p).child(p_side.mirror()) == Some(x) {
                    // Inner grandchild: rotate the parent first.
                    self.rotate(p, p_side);
                    x = p;
                }
                let p = self.nodes.get(x).parent().expect("rotated child keeps a parent");
                self.nodes.get_mut(p).set_color(Color::Black);
                self.nodes.get_mut(g).set_color(Color::Red);
                self.rotate(g, p_side.mirror());
                break;
            }
        }
        let root = self.root.expect("fixup runs on a non-empty tree");
        self.nodes.get_mut(root).set_color(Color::Black);
    }

    /// Restores the black-height after a childless black node was unlinked.
    ///
    /// `x` carries the "extra black" deficit. It is `None` immediately after
    /// the removal (the deficit sits on a null position under `parent`) and
    /// becomes the ancestor chain as the deficit is pushed up.
    fn fix_remove(&mut self, mut x: Option<Handle>, mut parent: Handle) {
        while x != self.root && self.is_black(x) {
            let side = if self.nodes.get(parent).left() == x { Side::Left } else { Side::Right };
            // The deficit side is one black short, so a sibling must exist.
            let mut s = self.nodes.get(parent).child(side.mirror()).expect("deficit node has a sibling");

            if self.nodes.get(s).is_red() {
                // Red sibling: rotate it above the parent, exposing one of
                // its black children as the new sibling.
                self.nodes.get_mut(s).set_color(Color::Black);
                self.nodes.get_mut(parent).set_color(Color::Red);
                self.rotate(parent, side);
                s = self.nodes.get(parent).child(side.mirror()).expect("rotation preserves the sibling");
            }

            let near = self.nodes.get(s).child(side);
            let far = self.nodes.get(s).child(side.mirror());

            if self.is_black(near) && self.is_black(far) {
                // Both nephews black: push the deficit to the parent. A red
                // parent absorbs it on the next loop test.
                self.nodes.get_mut(s).set_color(Color::Red);
                x = Some(parent);
                match self.nodes.get(parent).parent() {
                    Some(p) => parent = p,
                    None => break,
                }
            } else {
                let s = if self.is_black(far) {
                    // Near nephew red, far black: rotate at the sibling to
                    // make the far nephew red.
                    let near = near.expect("near nephew is red");
                    self.nodes.get_mut(near).set_color(Color::Black);
                    self.nodes.get_mut(s).set_color(Color::Red);
                    self.rotate(s, side.mirror());
                    self.nodes.get(parent).child(side.mirror()).expect("rotation preserves the sibling")
                } else {
                    s
                };
                // Far nephew red: terminal case.
                let far = self.nodes.get(s).child(side.mirror()).expect("far nephew is red");
                let parent_color = self.nodes.get(parent).color();
                self.nodes.get_mut(s).set_color(parent_color);
                self.nodes.get_mut(parent).set_color(Color::Black);
                self.nodes.get_mut(far).set_color(Color::Black);
                self.rotate(parent, side);
                x = self.root;
                break;
            }
        }
        if let Some(x) = x {
            self.nodes.get_mut(x).set_color(Color::Black);
        }
    }
}

impl<K: Ord, V> RawTree<K, V> {
    /// Binary-search descent. With duplicates present this lands on *some*
    /// matching node, not necessarily the first in order.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match key.cmp(node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(handle),
            }
        }
        None
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| self.value(h))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.value_mut(handle))
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| self.entry(h))
    }

    /// The first node whose key is not ordered before `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.key().borrow() < key {
                current = node.right();
            } else {
                candidate = Some(handle);
                current = node.left();
            }
        }
        candidate
    }

    /// The first node whose key is ordered strictly after `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.key().borrow() > key {
                candidate = Some(handle);
                current = node.left();
            } else {
                current = node.right();
            }
        }
        candidate
    }

    /// Number of nodes whose key equals `key`.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.lower_bound(key);
        while let Some(handle) = current {
            if self.nodes.get(handle).key().borrow() != key {
                break;
            }
            count += 1;
            current = self.next_handle(handle);
        }
        count
    }

    /// The contiguous run of nodes whose key equals `key`, as a double-ended
    /// iterator over `(&K, &V)`.
    pub(crate) fn equal_range<Q>(&self, key: &Q) -> RawRange<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let front = self.lower_bound(key);
        let upper = self.upper_bound(key);
        let back = match upper {
            Some(handle) => self.prev_handle(handle),
            None => self.last_handle(),
        };
        let finished = front.is_none() || front == upper;
        RawRange {
            tree: self,
            front,
            back,
            finished,
        }
    }

    /// Unique-key insertion. Returns the handle of the affected node and
    /// whether an insertion took place; an equal key aborts the insert and
    /// leaves the existing node untouched.
    pub(crate) fn insert_unique(&mut self, key: K, value: V) -> (Handle, bool) {
        let Some(root) = self.root else {
            return (self.attach_root(key, value), true);
        };

        let mut current = root;
        let (parent, side) = loop {
            let node = self.nodes.get(current);
            match key.cmp(node.key()) {
                Ordering::Less => match node.left() {
                    Some(left) => current = left,
                    None => break (current, Side::Left),
                },
                Ordering::Greater => match node.right() {
                    Some(right) => current = right,
                    None => break (current, Side::Right),
                },
                Ordering::Equal => return (current, false),
            }
        };
        (self.attach(key, value, parent, side), true)
    }

    /// Duplicate-permitting insertion: equal keys descend to the right, so a
    /// run of duplicates stays contiguous in traversal order.
    pub(crate) fn insert_multi(&mut self, key: K, value: V) -> Handle {
        let Some(root) = self.root else {
            return self.attach_root(key, value);
        };

        let mut current = root;
        let (parent, side) = loop {
            let node = self.nodes.get(current);
            if key < *node.key() {
                match node.left() {
                    Some(left) => current = left,
                    None => break (current, Side::Left),
                }
            } else {
                match node.right() {
                    Some(right) => current = right,
                    None => break (current, Side::Right),
                }
            }
        };
        self.attach(key, value, parent, side)
    }

    /// Plants the very first node, which is forced black.
    fn attach_root(&mut self, key: K, value: V) -> Handle {
        let vh = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new(key, vh));
        self.nodes.get_mut(handle).set_color(Color::Black);
        self.root = Some(handle);
        self.len = 1;
        handle
    }

    /// Attaches a red leaf at the discovered position and rebalances.
    fn attach(&mut self, key: K, value: V, parent: Handle, side: Side) -> Handle {
        let vh = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new(key, vh));
        self.nodes.get_mut(handle).set_parent(Some(parent));
        self.nodes.get_mut(parent).set_child(side, Some(handle));
        self.len += 1;
        self.fix_insert(handle);
        handle
    }

    pub(crate) fn remove_key<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.remove_at(handle))
    }

    /// Unlinks one node and returns its payload.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> (K, V) {
        let mut target = handle;

        // Two children: swap payloads with the in-order predecessor (the
        // rightmost node of the left subtree) and delete that node instead.
        // The predecessor has no right child by construction.
        let node = self.nodes.get(target);
        if let (Some(left), Some(_)) = (node.left(), node.right()) {
            let pred = self.extremum(left, Side::Right);
            let (a, b) = self.nodes.get2_mut(target, pred);
            a.swap_payload(b);
            target = pred;
        }

        let node = self.nodes.get(target);
        let parent = node.parent();
        let child = node.left().or(node.right());
        let was_black = !node.is_red();

        match child {
            Some(child) => {
                // An only child is always red: splice it up, paint it black.
                self.nodes.get_mut(child).set_parent(parent);
                self.nodes.get_mut(child).set_color(Color::Black);
                self.replace_child(parent, target, Some(child));
            }
            None => {
                self.replace_child(parent, target, None);
                // Removing a childless black node leaves a deficit.
                if was_black && let Some(parent) = parent {
                    self.fix_remove(None, parent);
                }
            }
        }

        self.len -= 1;
        let (key, vh) = self.nodes.take(target).into_payload();
        (key, self.values.take(vh))
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.first_handle()?;
        Some(self.remove_at(handle))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.last_handle()?;
        Some(self.remove_at(handle))
    }
}

/// Borrowing in-order iterator over `(&K, &V)`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct RawIter<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        Self {
            tree,
            front: tree.first_handle(),
            back: tree.last_handle(),
            remaining: tree.len(),
        }
    }
}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for RawIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.next_handle(handle);
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for RawIter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.prev_handle(handle);
        Some(self.tree.entry(handle))
    }
}

impl<K, V> ExactSizeIterator for RawIter<'_, K, V> {}
impl<K, V> core::iter::FusedIterator for RawIter<'_, K, V> {}

/// Mutable in-order iterator over `(&K, &mut V)`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct RawIterMut<'a, K, V> {
    tree: *mut RawTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a mut RawTree<K, V>>,
}

// SAFETY: RawIterMut behaves as &mut RawTree<K, V>, so it is Send when K and
// V are Send. It is not Sync: mutable iterators are not shared.
unsafe impl<K: Send, V: Send> Send for RawIterMut<'_, K, V> {}

impl<'a, K, V> RawIterMut<'a, K, V> {
    pub(crate) fn new(tree: &'a mut RawTree<K, V>) -> Self {
        let front = tree.first_handle();
        let back = tree.last_handle();
        let remaining = tree.len();
        Self {
            tree: &raw mut *tree,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for RawIterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        // SAFETY: `self.tree` is valid for 'a, each handle is yielded at
        // most once, and navigation only reads nodes, never values.
        unsafe {
            self.front = RawTree::next_handle_ptr(self.tree, handle);
            Some(RawTree::entry_mut_ptr(self.tree, handle))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for RawIterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        // SAFETY: As in `next`.
        unsafe {
            self.back = RawTree::prev_handle_ptr(self.tree, handle);
            Some(RawTree::entry_mut_ptr(self.tree, handle))
        }
    }
}

impl<K, V> ExactSizeIterator for RawIterMut<'_, K, V> {}
impl<K, V> core::iter::FusedIterator for RawIterMut<'_, K, V> {}

/// Iterator over a contiguous key run, bounded inclusively by `back`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct RawRange<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    /// Set once the cursors cross; distinguishes "exhausted" from the
    /// front == back single-element state.
    finished: bool,
}

impl<K, V> Clone for RawRange<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            finished: self.finished,
        }
    }
}

impl<'a, K, V> Iterator for RawRange<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let handle = self.front.expect("unfinished range has a front");
        if self.front == self.back {
            self.finished = true;
        } else {
            self.front = self.tree.next_handle(handle);
        }
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (1, Some(self.tree.len()))
        }
    }
}

impl<K, V> DoubleEndedIterator for RawRange<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let handle = self.back.expect("unfinished range has a back");
        if self.front == self.back {
            self.finished = true;
        } else {
            self.back = self.tree.prev_handle(handle);
        }
        Some(self.tree.entry(handle))
    }
}

impl<K, V> core::iter::FusedIterator for RawRange<'_, K, V> {}
