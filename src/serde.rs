//! Serialization and Deserialization implementation. Both structures are written as a plain map
//! from prefix to value; the tree shape is not part of the format.

use std::collections::HashMap;

use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::*;

impl<P: Serialize, T: Serialize> Serialize for PrefixTreap<P, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<P: JointPrefix + Serialize, T: Serialize> Serialize for PrefixTable<P, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de, P, T> Deserialize<'de> for PrefixTreap<P, T>
where
    P: Prefix + Clone + Deserialize<'de> + Eq + std::hash::Hash,
    T: Clone + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: HashMap<P, T> = HashMap::deserialize(deserializer)?;
        Ok(Self::from_iter(map))
    }
}

impl<'de, P, T> Deserialize<'de> for PrefixTable<P, T>
where
    P: JointPrefix + Deserialize<'de> + Eq + std::hash::Hash,
    T: Clone + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: HashMap<P, T> = HashMap::deserialize(deserializer)?;
        Ok(Self::from_iter(map))
    }
}
