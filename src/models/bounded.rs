//! Length-bounded values
//!
//! Every string and list stored by the registry has a fixed capacity. The
//! wrappers here check it once at construction, so a value that exists is
//! always within bounds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// Rejected construction of a bounded value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("text is {len} characters long, maximum is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("list has {len} entries, maximum is {max}")]
    TooManyEntries { len: usize, max: usize },
}

/// A string of at most `N` characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedText<const N: usize>(String);

impl<const N: usize> BoundedText<N> {
    pub fn new(text: impl Into<String>) -> Result<Self, BoundsError> {
        let text = text.into();
        let len = text.chars().count();
        if len > N {
            return Err(BoundsError::TextTooLong { len, max: N });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> TryFrom<&str> for BoundedText<N> {
    type Error = BoundsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<String> for BoundedText<N> {
    type Error = BoundsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> Serialize for BoundedText<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, const N: usize> Deserialize<'de> for BoundedText<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(text).map_err(serde::de::Error::custom)
    }
}

/// An ordered list of at most `N` entries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedList<T, const N: usize>(Vec<T>);

impl<T, const N: usize> BoundedList<T, N> {
    pub fn new(items: Vec<T>) -> Result<Self, BoundsError> {
        if items.len() > N {
            return Err(BoundsError::TooManyEntries {
                len: items.len(),
                max: N,
            });
        }
        Ok(Self(items))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }
}

impl<const N: usize, const M: usize> BoundedList<BoundedText<M>, N> {
    /// Build a list of bounded text entries, checking both the list and every entry
    pub fn from_strs<S: AsRef<str>>(items: &[S]) -> Result<Self, BoundsError> {
        let entries = items
            .iter()
            .map(|item| BoundedText::new(item.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    pub fn contains_str(&self, needle: &str) -> bool {
        self.0.iter().any(|entry| entry.as_str() == needle)
    }
}

impl<T, const N: usize> Default for BoundedList<T, N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, const N: usize> Deref for BoundedList<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedList<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for BoundedList<T, N> {
    type Error = BoundsError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T: Serialize, const N: usize> Serialize for BoundedList<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for BoundedList<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::new(items).map_err(serde::de::Error::custom)
    }
}

/// Skin type, concern or goal label
pub type Attribute = BoundedText<20>;
/// Up to five profile or routine attributes
pub type AttributeList = BoundedList<Attribute, 5>;
/// Reference list of allowed attributes
pub type ValidityList = BoundedList<Attribute, 10>;

pub type Credentials = BoundedText<500>;
pub type RoutineName = BoundedText<100>;
pub type Description = BoundedText<500>;
pub type ProductType = BoundedText<50>;
pub type Instructions = BoundedText<200>;
pub type Comments = BoundedText<300>;

pub type StepList = BoundedList<crate::models::RoutineStep, 10>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bounds() {
        assert!(Attribute::new("combination").is_ok());
        assert!(Attribute::new("a".repeat(20)).is_ok());
        assert_eq!(
            Attribute::new("a".repeat(21)),
            Err(BoundsError::TextTooLong { len: 21, max: 20 })
        );
    }

    #[test]
    fn test_text_counts_characters_not_bytes() {
        // 20 two-byte characters
        assert!(Attribute::new("é".repeat(20)).is_ok());
    }

    #[test]
    fn test_list_bounds() {
        assert!(AttributeList::from_strs(&["acne", "redness"]).is_ok());
        assert_eq!(
            AttributeList::from_strs(&["a", "b", "c", "d", "e", "f"]),
            Err(BoundsError::TooManyEntries { len: 6, max: 5 })
        );
    }

    #[test]
    fn test_list_entry_bounds_checked() {
        let long = "x".repeat(21);
        assert!(AttributeList::from_strs(&["acne", long.as_str()]).is_err());
    }

    #[test]
    fn test_deserialize_rejects_oversized_values() {
        let ok: Attribute = serde_json::from_str("\"oily\"").unwrap();
        assert_eq!(ok.as_str(), "oily");

        let too_long = format!("\"{}\"", "x".repeat(21));
        assert!(serde_json::from_str::<Attribute>(&too_long).is_err());

        let too_many = r#"["a","b","c","d","e","f"]"#;
        assert!(serde_json::from_str::<AttributeList>(too_many).is_err());
    }
}
