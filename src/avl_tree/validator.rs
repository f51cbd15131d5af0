/// A policy that decides whether a value may be inserted into an `AvlTree`.
///
/// Any closure of type `Fn(&T) -> bool` is also a validator.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::{AcceptAll, RejectDefault, Validator};
///
/// assert!(AcceptAll.is_valid(&0));
/// assert!(!RejectDefault.is_valid(&0));
/// assert!(!RejectDefault.is_valid(&String::new()));
///
/// let is_even = |value: &u32| value % 2 == 0;
/// assert!(is_even.is_valid(&2));
/// ```
pub trait Validator<T> {
    /// Returns `true` if `value` may be stored in the tree.
    fn is_valid(&self, value: &T) -> bool;
}

/// Accepts every value. This is the validator used by `AvlTree::new`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<T> Validator<T> for AcceptAll {
    fn is_valid(&self, _: &T) -> bool {
        true
    }
}

/// Rejects the default value of a type, such as `0` for integers or the empty string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RejectDefault;

impl<T> Validator<T> for RejectDefault
where
    T: Default + PartialEq,
{
    fn is_valid(&self, value: &T) -> bool {
        *value != T::default()
    }
}

impl<T, F> Validator<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_valid(&self, value: &T) -> bool {
        self(value)
    }
}
