//! Objects whose keys are data (country names, IATA codes, flight ids, dates) rather than
//! field names. They are read as ordered `(key, value)` pairs so the key can be copied into
//! the flattened record and document order is kept. A repeated key keeps its first position
//! and its last value.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

pub type Keyed<T> = Vec<(String, T)>;

struct KeyedVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedVisitor<T> {
    type Value = Keyed<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object keyed by identifier")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries: Keyed<T> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut positions = HashMap::<String, usize>::new();

        while let Some((key, value)) = map.next_entry::<String, T>()? {
            match positions.get(&key) {
                Some(&i) => entries[i].1 = value,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }
        Ok(entries)
    }
}

/// `deserialize_with` target for key-as-data objects.
pub fn entries<'de, D, T>(deserializer: D) -> Result<Keyed<T>, D::Error>
    where D: Deserializer<'de>, T: Deserialize<'de>
{
    deserializer.deserialize_map(KeyedVisitor(PhantomData))
}
