pub mod blogs;
pub mod login;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Keeps `null` distinguishable from a missing field.
/// Use together with `#[serde(default)]`:
/// - missing: None
/// - null: Some(None)
/// - value: Some(Some(v))
pub(crate) fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
