use crate::avl_tree::iter::{AvlTreeIntoIter, InOrderIter, PostOrderIter, PreOrderIter};
use crate::avl_tree::tree;
use crate::avl_tree::validator::{AcceptAll, Validator};
use crate::avl_tree::{Error, Result};
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set of values implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Every insertion and deletion
/// rebalances each ancestor of the modified node with rotations.
///
/// Values are checked by a `Validator` before they are inserted. The default validator,
/// `AcceptAll`, accepts every value.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.add(10).unwrap();
/// tree.add(20).unwrap();
/// tree.add(30).unwrap();
///
/// assert_eq!(tree.root(), Some(&20));
/// assert_eq!(tree.in_order_traversal().collect::<Vec<&u32>>(), vec![&10, &20, &30]);
///
/// tree.delete_node(&20);
/// assert!(!tree.contains(&20));
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Clone)]
pub struct AvlTree<T, V = AcceptAll> {
    tree: tree::Tree<T>,
    len: usize,
    validator: V,
}

impl<T> AvlTree<T, AcceptAll> {
    /// Constructs a new, empty `AvlTree<T>` that accepts every value.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_validator(AcceptAll)
    }
}

impl<T, V> AvlTree<T, V> {
    /// Constructs a new, empty `AvlTree<T, V>` that only accepts values allowed by `validator`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, Error, RejectDefault};
    ///
    /// let mut tree = AvlTree::with_validator(RejectDefault);
    /// assert_eq!(tree.add(0), Err(Error::InvalidValue));
    /// assert_eq!(tree.add(1), Ok(()));
    /// ```
    pub fn with_validator(validator: V) -> Self {
        AvlTree {
            tree: None,
            len: 0,
            validator,
        }
    }

    /// Returns the validator of the tree.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the tree, removing all values.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// tree.add(2).unwrap();
    /// tree.clear();
    /// assert_eq!(tree.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the height of the tree. An empty tree has a height of zero.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.height(), 0);
    /// for value in 1..8 {
    ///     tree.add(value).unwrap();
    /// }
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns the value stored at the root of the tree. Returns `None` if the tree is empty.
    pub fn root(&self) -> Option<&T> {
        self.tree.as_ref().map(|node| &node.value)
    }

    /// Returns the minimum value of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// tree.add(3).unwrap();
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the maximum value of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// tree.add(3).unwrap();
    /// assert_eq!(tree.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Returns an iterator over the tree. The iterator will yield values using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// tree.add(3).unwrap();
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> InOrderIter<T> {
        InOrderIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Returns an iterator that visits the left subtree, then the root, then the right subtree of
    /// every node. Values are yielded in ascending order.
    pub fn in_order_traversal(&self) -> InOrderIter<T> {
        self.iter()
    }

    /// Returns an iterator that visits the root, then the left subtree, then the right subtree of
    /// every node.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for value in &[30, 10, 20] {
    ///     tree.add(*value).unwrap();
    /// }
    /// assert_eq!(tree.pre_order_traversal().collect::<Vec<&u32>>(), vec![&20, &10, &30]);
    /// ```
    pub fn pre_order_traversal(&self) -> PreOrderIter<T> {
        PreOrderIter {
            stack: self.tree.as_ref().map(|node| &**node).into_iter().collect(),
        }
    }

    /// Returns an iterator that visits the left subtree, then the right subtree, then the root of
    /// every node.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for value in &[30, 10, 20] {
    ///     tree.add(*value).unwrap();
    /// }
    /// assert_eq!(tree.post_order_traversal().collect::<Vec<&u32>>(), vec![&10, &30, &20]);
    /// ```
    pub fn post_order_traversal(&self) -> PostOrderIter<T> {
        PostOrderIter {
            stack: self.tree.as_ref().map(|node| (&**node, false)).into_iter().collect(),
        }
    }
}

impl<T, V> AvlTree<T, V>
where
    T: Ord,
{
    /// Removes a value from the tree. Removing a value that does not exist is a no-op.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// tree.delete_node(&1);
    /// tree.delete_node(&1);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete_node<Q>(&mut self, value: &Q)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(value);
    }

    /// Removes a value from the tree. Returns `true` if the value existed in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let AvlTree {
            ref mut tree,
            ref mut len,
            ..
        } = self;
        match tree::remove(tree, value) {
            Some(_) => {
                *len -= 1;
                true
            },
            None => false,
        }
    }

    /// Checks if a value exists in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(value).is_some()
    }

    /// Returns a reference to the value in the tree that is equal to `value`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(String::from("a")).unwrap();
    /// assert_eq!(tree.get("a"), Some(&String::from("a")));
    /// assert_eq!(tree.get("b"), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::get(&self.tree, value)
    }

    /// Returns a value in the tree that is less than or equal to a particular value. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// assert_eq!(tree.floor(&0), None);
    /// assert_eq!(tree.floor(&2), Some(&1));
    /// ```
    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::floor(&self.tree, value)
    }

    /// Returns a value in the tree that is greater than or equal to a particular value. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// assert_eq!(tree.ceil(&0), Some(&1));
    /// assert_eq!(tree.ceil(&2), None);
    /// ```
    pub fn ceil<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::ceil(&self.tree, value)
    }

    /// Recomputes the height of every node and returns `true` if the values are strictly
    /// ascending in-order, every node is balanced, every stored height is correct, and the length
    /// matches the number of nodes.
    pub fn check_invariants(&self) -> bool {
        tree::check(&self.tree, None, None).is_some() && self.iter().count() == self.len
    }
}

impl<T, V> AvlTree<T, V>
where
    T: Ord,
    V: Validator<T>,
{
    /// Inserts a value into the tree. Inserting a value that already exists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidValue` without modifying the tree if the validator rejects `value`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1).unwrap();
    /// tree.add(1).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn add(&mut self, value: T) -> Result<()> {
        self.insert(value).map(|_| ())
    }

    /// Inserts a value into the tree. Returns `true` if the value did not already exist in the
    /// tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidValue` without modifying the tree if the validator rejects `value`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(1), Ok(true));
    /// assert_eq!(tree.insert(1), Ok(false));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<bool> {
        if !self.validator.is_valid(&value) {
            debug!("value refused by the validator");
            return Err(Error::InvalidValue);
        }

        let inserted = tree::insert(&mut self.tree, value);
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }
}

impl<T, V> AvlTree<T, V>
where
    T: Ord,
    V: Validator<T> + Default,
{
    /// Constructs a tree with the default validator from the values of an iterator. Stops at the
    /// first value that is rejected by the validator.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, Error, RejectDefault};
    ///
    /// let tree: AvlTree<&str> = AvlTree::try_from_iter(vec!["b", "a", "c"]).unwrap();
    /// assert_eq!(tree.root(), Some(&"b"));
    ///
    /// let rejected = AvlTree::<&str, RejectDefault>::try_from_iter(vec!["a", ""]);
    /// assert_eq!(rejected.err(), Some(Error::InvalidValue));
    /// ```
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::default();
        for value in iter {
            tree.add(value)?;
        }
        Ok(tree)
    }
}

impl<T> FromIterator<T> for AvlTree<T, AcceptAll>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for AvlTree<T, AcceptAll>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            if tree::insert(&mut self.tree, value) {
                self.len += 1;
            }
        }
    }
}

impl<T, V> IntoIterator for AvlTree<T, V> {
    type Item = T;
    type IntoIter = AvlTreeIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, V> IntoIterator for &'a AvlTree<T, V>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = InOrderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, V> Default for AvlTree<T, V>
where
    V: Default,
{
    fn default() -> Self {
        Self::with_validator(V::default())
    }
}

impl<T, V> PartialEq for AvlTree<T, V>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, V> Eq for AvlTree<T, V> where T: Eq {}

impl<T, V> fmt::Debug for AvlTree<T, V>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlTree;
    use crate::avl_tree::{Error, RejectDefault};

    fn child_values(tree: &AvlTree<u32>) -> (Option<u32>, Option<u32>) {
        let node = tree.tree.as_ref().unwrap();
        (
            node.left.as_ref().map(|child| child.value),
            node.right.as_ref().map(|child| child.value),
        )
    }

    fn from_values(values: &[u32]) -> AvlTree<u32> {
        let mut tree = AvlTree::new();
        for value in values {
            tree.add(*value).unwrap();
            assert!(tree.check_invariants());
        }
        tree
    }

    #[test]
    fn test_len_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_is_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_empty_traversals() {
        let mut tree: AvlTree<u32> = AvlTree::new();
        tree.delete_node(&1);
        assert!(tree.is_empty());
        assert_eq!(tree.in_order_traversal().next(), None);
        assert_eq!(tree.pre_order_traversal().next(), None);
        assert_eq!(tree.post_order_traversal().next(), None);
    }

    #[test]
    fn test_insert() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert(1), Ok(true));
        assert!(tree.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = from_values(&[2, 1, 3]);
        assert_eq!(tree.insert(1), Ok(false));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    }

    #[test]
    fn test_zero_is_valid_by_default() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.add(0), Ok(()));
        assert!(tree.contains(&0));
    }

    #[test]
    fn test_reject_default() {
        let mut tree = AvlTree::with_validator(RejectDefault);
        tree.add(1).unwrap();
        assert_eq!(tree.add(0), Err(Error::InvalidValue));
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(&0));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_closure_validator() {
        let mut tree = AvlTree::with_validator(|value: &String| !value.is_empty());
        assert_eq!(tree.add(String::new()), Err(Error::InvalidValue));
        assert_eq!(tree.add(String::from("b")), Ok(()));
        assert_eq!(tree.add(String::from("a")), Ok(()));
        assert_eq!(tree.iter().collect::<Vec<&String>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_single_left_rotation() {
        let tree = from_values(&[10, 20, 30]);
        assert_eq!(tree.root(), Some(&20));
        assert_eq!(child_values(&tree), (Some(10), Some(30)));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&10, &20, &30]);
    }

    #[test]
    fn test_single_right_rotation() {
        let tree = from_values(&[30, 20, 10]);
        assert_eq!(tree.root(), Some(&20));
        assert_eq!(child_values(&tree), (Some(10), Some(30)));
    }

    #[test]
    fn test_left_right_rotation() {
        let tree = from_values(&[30, 10, 20]);
        assert_eq!(tree.root(), Some(&20));
        assert_eq!(child_values(&tree), (Some(10), Some(30)));
    }

    #[test]
    fn test_right_left_rotation() {
        let tree = from_values(&[10, 30, 20]);
        assert_eq!(tree.root(), Some(&20));
        assert_eq!(child_values(&tree), (Some(10), Some(30)));
    }

    #[test]
    fn test_delete_two_children() {
        let mut tree = from_values(&[20, 10, 30, 5, 15, 25, 35]);
        tree.delete_node(&20);

        assert_eq!(tree.root(), Some(&25));
        assert_eq!(
            tree.iter().collect::<Vec<&u32>>(),
            vec![&5, &10, &15, &25, &30, &35],
        );
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_delete_leaf_and_one_child() {
        let mut tree = from_values(&[20, 10, 30, 5]);

        tree.delete_node(&5);
        assert_eq!(child_values(&tree), (Some(10), Some(30)));

        tree.add(35).unwrap();
        tree.delete_node(&30);
        assert_eq!(child_values(&tree), (Some(10), Some(35)));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_delete_rebalances() {
        let mut tree = from_values(&[20, 10, 30, 25]);
        tree.delete_node(&10);

        assert_eq!(tree.root(), Some(&25));
        assert_eq!(child_values(&tree), (Some(20), Some(30)));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_delete_missing() {
        let mut tree = from_values(&[2, 1, 3]);
        assert!(!tree.remove(&4));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_min_max() {
        let tree = from_values(&[1, 3, 5]);
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&5));
    }

    #[test]
    fn test_floor_ceil() {
        let tree = from_values(&[1, 3, 5]);

        assert_eq!(tree.floor(&0), None);
        assert_eq!(tree.floor(&2), Some(&1));
        assert_eq!(tree.floor(&4), Some(&3));
        assert_eq!(tree.floor(&6), Some(&5));

        assert_eq!(tree.ceil(&0), Some(&1));
        assert_eq!(tree.ceil(&2), Some(&3));
        assert_eq!(tree.ceil(&4), Some(&5));
        assert_eq!(tree.ceil(&6), None);
    }

    #[test]
    fn test_traversals() {
        let tree = from_values(&[20, 10, 30, 5, 15, 25, 35]);

        assert_eq!(
            tree.in_order_traversal().cloned().collect::<Vec<u32>>(),
            vec![5, 10, 15, 20, 25, 30, 35],
        );
        assert_eq!(
            tree.pre_order_traversal().cloned().collect::<Vec<u32>>(),
            vec![20, 10, 5, 15, 30, 25, 35],
        );
        assert_eq!(
            tree.post_order_traversal().cloned().collect::<Vec<u32>>(),
            vec![5, 15, 10, 25, 35, 30, 20],
        );
    }

    #[test]
    fn test_traversal_is_restartable() {
        let tree = from_values(&[2, 1, 3]);
        let first = tree.pre_order_traversal().collect::<Vec<&u32>>();
        let second = tree.pre_order_traversal().collect::<Vec<&u32>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_iter() {
        let tree = from_values(&[1, 5, 3]);
        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_from_iter() {
        let tree: AvlTree<u32> = vec![3, 1, 2, 1].into_iter().collect();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), Some(&2));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_eq_ignores_shape() {
        let left = from_values(&[1, 2, 3, 4]);
        let right = from_values(&[4, 3, 2, 1]);
        assert_eq!(left, right);
        assert_ne!(left, from_values(&[1, 2, 3]));
    }

    #[test]
    fn test_debug() {
        let tree = from_values(&[2, 1]);
        assert_eq!(format!("{:?}", tree), "{1, 2}");
    }

    #[test]
    fn test_clear() {
        let mut tree = from_values(&[1, 2]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }
}
