use crate::avl_tree::node::Node;
use crate::avl_tree::tree;

/// An owning iterator for `AvlTree<T, V>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned values.
pub struct AvlTreeIntoIter<T> {
    pub(super) current: tree::Tree<T>,
    pub(super) stack: Vec<Node<T>>,
}

impl<T> Iterator for AvlTreeIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { value, right, .. } = node;
            self.current = right;
            value
        })
    }
}

/// An iterator for `AvlTree<T, V>`.
///
/// This iterator traverses the elements of the tree in-order (left, root, right) and yields
/// immutable references.
pub struct InOrderIter<'a, T>
where
    T: 'a,
{
    pub(super) current: &'a tree::Tree<T>,
    pub(super) stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for InOrderIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.value
        })
    }
}

/// A pre-order iterator for `AvlTree<T, V>`.
///
/// This iterator visits a node before either of its subtrees (root, left, right).
pub struct PreOrderIter<'a, T>
where
    T: 'a,
{
    pub(super) stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for PreOrderIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|node| {
            if let Some(ref right) = node.right {
                self.stack.push(right);
            }
            if let Some(ref left) = node.left {
                self.stack.push(left);
            }
            &node.value
        })
    }
}

/// A post-order iterator for `AvlTree<T, V>`.
///
/// This iterator visits a node after both of its subtrees (left, right, root).
pub struct PostOrderIter<'a, T>
where
    T: 'a,
{
    // The flag is set once the children of a node have been pushed.
    pub(super) stack: Vec<(&'a Node<T>, bool)>,
}

impl<'a, T> Iterator for PostOrderIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(&node.value);
            }
            self.stack.push((node, true));
            if let Some(ref right) = node.right {
                self.stack.push((&**right, false));
            }
            if let Some(ref left) = node.left {
                self.stack.push((&**left, false));
            }
        }
        None
    }
}
