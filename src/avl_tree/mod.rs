//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod iter;
mod node;
mod serialize;
mod set;
mod tree;
mod validator;

pub use self::iter::{AvlTreeIntoIter, InOrderIter, PostOrderIter, PreOrderIter};
pub use self::set::AvlTree;
pub use self::validator::{AcceptAll, RejectDefault, Validator};

use std::error;
use std::fmt;
use std::result;

/// The error returned when a value is refused by the validator of an `AvlTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    InvalidValue,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidValue => write!(f, "Please provide a valid value"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
