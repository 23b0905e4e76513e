//! Serde support.

use serde::{de, Serialize, Serializer};

use crate::{PeekInterface, Secret, Strategy};

/// Marker trait for secret types which may be [`Serialize`]-d by `serde`.
///
/// Types must opt in before a `Secret` wrapping them serializes its inner
/// value, preventing accidental exfiltration of secrets that were never
/// meant to leave the process. All types implementing `DeserializeOwned`
/// receive a [`de::Deserialize`] impl unconditionally.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for String {}
impl SerializableSecret for serde_json::Value {}

impl<'de, T, I> de::Deserialize<'de> for Secret<T, I>
where
    T: de::DeserializeOwned + Sized,
    I: Strategy<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}

impl<T, I> Serialize for Secret<T, I>
where
    T: SerializableSecret + Serialize + Sized,
    I: Strategy<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.peek().serialize(serializer)
    }
}
