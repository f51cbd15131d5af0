use crate::avl_tree::{AvlTree, Validator};
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

// Trees are written as the in-order sequence of their values, so the shape is not part of the
// serialized form.
impl<T, V> Serialize for AvlTree<T, V>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T, V> Deserialize<'de> for AvlTree<T, V>
where
    T: Deserialize<'de> + Ord,
    V: Validator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlTreeVisitor {
            marker: PhantomData,
        })
    }
}

struct AvlTreeVisitor<T, V> {
    marker: PhantomData<fn() -> AvlTree<T, V>>,
}

impl<'de, T, V> Visitor<'de> for AvlTreeVisitor<T, V>
where
    T: Deserialize<'de> + Ord,
    V: Validator<T> + Default,
{
    type Value = AvlTree<T, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of values")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut tree = AvlTree::default();
        while let Some(value) = seq.next_element()? {
            tree.add(value).map_err(de::Error::custom)?;
        }
        Ok(tree)
    }
}
