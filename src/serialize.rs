use std::fmt;
use std::marker::PhantomData;

use serde::{
  Deserialize, Deserializer, Serialize, Serializer,
  de::{MapAccess, Visitor},
  ser::SerializeMap,
};

use crate::RadixTree;

impl<V: Serialize> Serialize for RadixTree<V> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    // A flat map of full keys, so the output nesting never follows node depth.
    let mut map = serializer.serialize_map(Some(self.len()))?;
    for (key, value) in self.iter() {
      map.serialize_entry(&key, value)?;
    }
    map.end()
  }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for RadixTree<V> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct RadixTreeVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for RadixTreeVisitor<V> {
      type Value = RadixTree<V>;

      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of non-empty string keys to values")
      }

      fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
      where
        A: MapAccess<'de>,
      {
        // Rebuilt through insert, so the node layout and the length always agree.
        let mut tree = RadixTree::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
          tree.insert(&key, value).map_err(serde::de::Error::custom)?;
        }
        Ok(tree)
      }
    }

    deserializer.deserialize_map(RadixTreeVisitor(PhantomData))
  }
}
