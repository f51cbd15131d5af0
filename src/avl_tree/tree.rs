use crate::avl_tree::node::Node;
use log::trace;
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Recomputes the height of the root of `tree` and restores the balance invariant there. Callers
// invoke this at every level on the way back up from a mutation.
fn balance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance() < 0 {
                trace!("left-right imbalance at height {}", node.height);
                node.left = Some(rotate_left(child));
            } else {
                trace!("left-left imbalance at height {}", node.height);
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance() > 0 {
                trace!("right-left imbalance at height {}", node.height);
                node.right = Some(rotate_right(child));
            } else {
                trace!("right-right imbalance at height {}", node.height);
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: there exists a minimum node in the tree
//
// Unlinks the minimum node, which has no left child and is therefore a leaf or has exactly one
// child, and rebalances every ancestor on the way back up.
fn remove_min<T>(tree: &mut Tree<T>) -> T {
    if let Some(ref mut node) = tree {
        if node.left.is_some() {
            let ret = remove_min(&mut node.left);
            balance(tree);
            return ret;
        }
    }

    match tree.take() {
        Some(node) => {
            let Node { value, right, .. } = *node;
            *tree = right;
            value
        },
        None => unreachable!(),
    }
}

/// Inserts `value` into `tree`. Returns `false` and leaves the tree untouched if an equal value is
/// already present.
pub fn insert<T>(tree: &mut Tree<T>, value: T) -> bool
where
    T: Ord,
{
    let ret = match tree {
        Some(ref mut node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return true;
        },
    };

    balance(tree);
    ret
}

/// Removes the value equal to `key` from `tree` and returns it.
///
/// A node with two children takes the value of its in-order successor, and the successor's node is
/// then deleted from the right subtree.
pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ret = match tree.take() {
        Some(mut node) => match key.cmp(node.value.borrow()) {
            Ordering::Less => {
                let ret = remove(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                if node.left.is_some() && node.right.is_some() {
                    let successor = remove_min(&mut node.right);
                    let ret = mem::replace(&mut node.value, successor);
                    *tree = Some(node);
                    Some(ret)
                } else {
                    let Node { value, left, right, .. } = *node;
                    *tree = left.or(right);
                    Some(value)
                }
            },
        },
        None => return None,
    };

    balance(tree);
    ret
}

pub fn get<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.value.borrow()) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.value),
    })
}

pub fn ceil<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.value.borrow()) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.value),
            res => res,
        },
        Ordering::Equal => Some(&node.value),
    })
}

pub fn floor<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.value.borrow()) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.value),
            res => res,
        },
        Ordering::Equal => Some(&node.value),
    })
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}

/// Recomputes the height of `tree` from scratch, verifying the ordering, balance, and stored
/// height of every node along the way. Returns `None` if any of them do not hold.
pub fn check<T>(tree: &Tree<T>, lower: Option<&T>, upper: Option<&T>) -> Option<usize>
where
    T: Ord,
{
    let node = match tree {
        Some(ref node) => node,
        None => return Some(0),
    };

    if lower.map_or(false, |lower| node.value <= *lower) {
        return None;
    }
    if upper.map_or(false, |upper| node.value >= *upper) {
        return None;
    }

    let left_height = check(&node.left, lower, Some(&node.value))?;
    let right_height = check(&node.right, Some(&node.value), upper)?;
    let actual_height = cmp::max(left_height, right_height) + 1;

    if (left_height as i64 - right_height as i64).abs() > 1 || node.height != actual_height {
        return None;
    }

    Some(actual_height)
}
