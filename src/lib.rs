//! Classic data structures, starting with a self-balancing binary search tree.

pub mod avl_tree;
