//! Serde support: a tree serializes as a map in ascending key order.
//!
//! Deserialization orders keys by [`NaturalOrder`]; a tree meant for another
//! comparator must be rebuilt by the caller.

use super::compare::NaturalOrder;
use super::node::Tree;
use super::transient::TransientTree;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<K: Serialize, V: Serialize> Serialize for Tree<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.size()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TreeVisitor<K, V> {
    key_marker: PhantomData<K>,
    value_marker: PhantomData<V>,
}

impl<K, V> TreeVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: PhantomData,
            value_marker: PhantomData,
        }
    }
}

impl<'de, K, V> Visitor<'de> for TreeVisitor<K, V>
where
    K: Deserialize<'de> + Clone + Ord,
    V: Deserialize<'de> + Clone,
{
    type Value = Tree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut transient = TransientTree::new();
        while let Some((key, value)) = access.next_entry()? {
            transient.insert(key, value, &NaturalOrder);
        }
        Ok(transient.persistent())
    }
}

impl<'de, K, V> Deserialize<'de> for Tree<K, V>
where
    K: Deserialize<'de> + Clone + Ord,
    V: Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeVisitor::new())
    }
}
