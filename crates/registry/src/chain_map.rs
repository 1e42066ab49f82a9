//! Insertion-ordered mapping keyed by [`Network`].
//!
//! The key set is fixed when the map is built; there is no insert or remove
//! afterwards. Serialised as a map keyed by network name, in insertion order.

use crate::{RegistryError, Result};
use config::Network;
use serde::{Deserialize, Serialize};

/// Ordered `Network -> V` mapping with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMap<V> {
    entries: Vec<(Network, V)>,
}

impl<V> ChainMap<V> {
    /// Build a map from `(network, value)` pairs, keeping their order.
    ///
    /// Fails if a network appears more than once.
    pub fn try_from_entries(entries: impl IntoIterator<Item = (Network, V)>) -> Result<Self> {
        let mut map = Self {
            entries: Vec::new(),
        };
        for (network, value) in entries {
            if map.contains(network) {
                return Err(RegistryError::Config(format!(
                    "network {network} listed more than once"
                )));
            }
            map.entries.push((network, value));
        }
        Ok(map)
    }

    pub fn get(&self, network: Network) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(key, value)| (*key == network).then_some(value))
    }

    pub fn get_mut(&mut self, network: Network) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find_map(|(key, value)| (*key == network).then_some(value))
    }

    pub fn contains(&self, network: Network) -> bool {
        self.entries.iter().any(|(key, _)| *key == network)
    }

    /// Networks in insertion order.
    pub fn networks(&self) -> impl Iterator<Item = Network> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// `(network, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Network, &V)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = (Network, &mut V)> {
        self.entries.iter_mut().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for ChainMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> IntoIterator for ChainMap<V> {
    type Item = (Network, V);
    type IntoIter = std::vec::IntoIter<(Network, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for ChainMap<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (network, value) in self.entries() {
            map.serialize_entry(&network, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for ChainMap<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        use std::{fmt, marker::PhantomData};

        struct ChainMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for ChainMapVisitor<V> {
            type Value = ChainMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of network names to values")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(network) = access.next_key::<Network>()? {
                    let value = access.next_value()?;
                    entries.push((network, value));
                }
                ChainMap::try_from_entries(entries).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(ChainMapVisitor(PhantomData))
    }
}
