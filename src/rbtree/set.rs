use std::fmt;
use std::marker::PhantomData;
use compare::{Compare, Natural, natural};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use rbtree::tree;

/// An ordered set implemented by a red-black tree.
///
/// A red-black tree is a binary search tree in which every node carries a
/// color tag. The tree keeps itself balanced by maintaining two rules: a red
/// node never has a red child, and every path from the root to an absent
/// child passes through the same number of black nodes. Together the rules
/// bound the height to twice the logarithm of the number of entries, so
/// lookups and insertions stay logarithmic.
///
/// Entries are ordered by a comparator fixed at construction; the plain
/// constructor uses the natural order of the entry type. Equal entries are
/// kept: inserting a duplicate places it after the entries it equals, and
/// removing an entry removes a single occurrence.
///
/// Removal splices the target out and sends the entries of its detached
/// left subtree back through the insertion path. The set therefore remains
/// a valid search tree after every operation, but the coloring rules are
/// only guaranteed until the first removal.
///
/// # Examples
/// ```
/// use balanced_collections::rbtree::RedBlackSet;
///
/// let mut t = RedBlackSet::new();
/// t.insert(3);
/// t.insert(0);
/// t.insert(3);
///
/// assert_eq!(t.size(), 3);
/// assert_eq!(t.min(), Some(&0));
///
/// assert_eq!(t.remove(&3), true);
/// assert_eq!(t.contains(&3), true);
/// assert_eq!(t.remove(&1), false);
/// ```
pub struct RedBlackSet<T, C = Natural<T>>
where
    C: Compare<T>,
{
    nodes: tree::Nodes<T>,
    root: tree::Link,
    cmp: C,
    size: usize,
}

impl<T: Ord> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>` ordered by the natural
    /// order of its entries.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_cmp(natural())
    }
}

impl<T, C> RedBlackSet<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `RedBlackSet<T, C>` ordered by `cmp`.
    ///
    /// # Examples
    /// ```
    /// # extern crate compare;
    /// # extern crate balanced_collections;
    /// # fn main() {
    /// use balanced_collections::rbtree::RedBlackSet;
    /// use compare::{Compare, natural};
    ///
    /// let mut t = RedBlackSet::with_cmp(natural().rev());
    /// t.insert(1);
    /// t.insert(3);
    /// t.insert(2);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), Some(&1));
    /// # }
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        RedBlackSet {
            nodes: tree::Nodes::new(),
            root: None,
            cmp,
            size: 0,
        }
    }

    /// Inserts an entry into the set. An entry equal to one already present
    /// is kept as well and ordered after it.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// t.insert(1);
    /// assert_eq!(t.size(), 2);
    /// ```
    pub fn insert(&mut self, entry: T) {
        let &mut RedBlackSet { ref mut nodes, ref mut root, ref cmp, ref mut size } = self;
        tree::insert(nodes, root, entry, cmp);
        *size += 1;
    }

    /// Removes a single occurrence of an entry from the set. Returns `true`
    /// if an entry was removed and `false` if no equal entry was present.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// assert_eq!(t.remove(&1), true);
    /// assert_eq!(t.remove(&1), false);
    /// ```
    pub fn remove<Q>(&mut self, entry: &Q) -> bool
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        let &mut RedBlackSet { ref mut nodes, ref mut root, ref cmp, ref mut size } = self;
        match tree::remove(nodes, root, entry, cmp) {
            Some(_) => {
                *size -= 1;
                true
            },
            None => false,
        }
    }

    /// Checks if an entry exists in the set.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// assert_eq!(t.contains(&0), false);
    /// assert_eq!(t.contains(&1), true);
    /// ```
    pub fn contains<Q>(&self, entry: &Q) -> bool
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        let &RedBlackSet { ref nodes, ref root, ref cmp, .. } = self;
        tree::find(nodes, *root, entry, cmp).is_some()
    }

    /// Returns the size of the set, counting duplicates.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// assert_eq!(t.size(), 1);
    /// ```
    pub fn size(&self) -> usize {
        let &RedBlackSet { ref size, .. } = self;
        *size
    }

    /// Returns the first entry of the set under its ordering. Returns
    /// `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// t.insert(3);
    /// assert_eq!(t.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        let &RedBlackSet { ref nodes, ref root, .. } = self;
        tree::min(nodes, *root)
    }

    /// Returns the last entry of the set under its ordering. Returns `None`
    /// if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// t.insert(3);
    /// assert_eq!(t.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        let &RedBlackSet { ref nodes, ref root, .. } = self;
        tree::max(nodes, *root)
    }

    /// Removes all entries from the set.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// t.insert(2);
    /// t.clear();
    /// assert_eq!(t.size(), 0);
    /// assert_eq!(t.contains(&1), false);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.size = 0;
    }

    /// Returns a reference to the set's comparator.
    ///
    /// # Examples
    /// ```
    /// # extern crate compare;
    /// # extern crate balanced_collections;
    /// # fn main() {
    /// use balanced_collections::rbtree::RedBlackSet;
    /// use compare::Compare;
    ///
    /// let t: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(t.cmp().compares_lt(&1, &2));
    /// # }
    /// ```
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Returns an iterator over the set. The iterator will yield entries
    /// using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use balanced_collections::rbtree::RedBlackSet;
    ///
    /// let mut t = RedBlackSet::new();
    /// t.insert(1);
    /// t.insert(3);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<T> {
        let &RedBlackSet { ref nodes, ref root, .. } = self;
        RedBlackSetIter {
            nodes,
            current: *root,
            stack: Vec::new(),
        }
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C>
where
    C: Compare<T>,
{
    type Item = T;
    type IntoIter = RedBlackSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let RedBlackSet { nodes, root, .. } = self;
        RedBlackSetIntoIter {
            nodes,
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T: 'a, C> IntoIterator for &'a RedBlackSet<T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;
    type IntoIter = RedBlackSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T, C>`
///
/// This iterator traverses the entries of the set in-order and yields owned
/// entries.
pub struct RedBlackSetIntoIter<T> {
    nodes: tree::Nodes<T>,
    current: tree::Link,
    stack: Vec<usize>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.nodes.get(index).left;
        }
        self.stack.pop().map(|index| {
            let node = self.nodes.free(index);
            self.current = node.right;
            node.entry
        })
    }
}

/// An iterator for `RedBlackSet<T, C>`
///
/// This iterator traverses the entries of the set in-order and yields
/// immutable references.
pub struct RedBlackSetIter<'a, T: 'a> {
    nodes: &'a tree::Nodes<T>,
    current: tree::Link,
    stack: Vec<usize>,
}

impl<'a, T: 'a> Iterator for RedBlackSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.nodes.get(index).left;
        }
        self.stack.pop().map(|index| {
            let node = self.nodes.get(index);
            self.current = node.right;
            &node.entry
        })
    }
}

impl<T, C> Default for RedBlackSet<T, C>
where
    C: Compare<T> + Default,
{
    fn default() -> Self {
        Self::with_cmp(C::default())
    }
}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for RedBlackSet<T, C>
where
    T: PartialEq,
    C: Compare<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, C> Serialize for RedBlackSet<T, C>
where
    T: Serialize,
    C: Compare<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, T, C> Deserialize<'de> for RedBlackSet<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RedBlackSetVisitor { phantom: PhantomData })
    }
}

struct RedBlackSetVisitor<T, C> {
    phantom: PhantomData<(T, C)>,
}

impl<'de, T, C> Visitor<'de> for RedBlackSetVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    type Value = RedBlackSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::with_cmp(C::default());
        while let Some(entry) = seq.next_element()? {
            set.insert(entry);
        }
        Ok(set)
    }
}
