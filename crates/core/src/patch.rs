//! Tri-state fields for partial updates.
//!
//! A PUT body distinguishes three cases per field: the key is absent (keep
//! the stored value), the key is `null` (clear it), or the key carries a value
//! (set it). Plain `Option<Option<T>>` cannot tell the first two apart under
//! serde, so fields use:
//!
//! ```ignore
//! #[serde(default, deserialize_with = "atividades_core::patch::present")]
//! pub observacao: Option<Option<String>>,
//! ```
//!
//! With `default`, an absent key stays `None`; a present key (including
//! `null`) always becomes `Some(..)`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present key into `Some(value)`, where `value` may be `None`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
