//! Normalized collections of model inputs.
//!
//! Models that aggregate several inputs (radiators, heat sources, power
//! demands) accept a single item, an ordered sequence, or a keyed mapping.
//! [`Members`] is the one shape all of those normalize to: an ordered
//! sequence in which each entry may carry a name.
//!
//! ```
//! use std::collections::BTreeMap;
//! use spacecraft_thermal::support::members::Members;
//!
//! let single = Members::from(1.0_f64);
//! let listed = Members::from(vec![1.0, 2.0]);
//! let keyed = Members::from(BTreeMap::from([("b".to_owned(), 2.0), ("a".to_owned(), 1.0)]));
//!
//! assert_eq!(single.len(), 1);
//! assert_eq!(listed.iter().copied().sum::<f64>(), 3.0);
//! assert_eq!(keyed.get("b"), Some(&2.0));
//! assert_eq!(keyed.names().collect::<Vec<_>>(), [Some("a"), Some("b")]);
//! ```

use std::collections::BTreeMap;

use uom::si::f64::Power;

/// An ordered collection whose entries may be named.
#[derive(Debug, Clone, PartialEq)]
pub struct Members<T> {
    entries: Vec<(Option<String>, T)>,
}

impl<T> Members<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an unnamed entry.
    #[must_use]
    pub fn with(mut self, item: T) -> Self {
        self.entries.push((None, item));
        self
    }

    /// Appends a named entry.
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, item: T) -> Self {
        self.entries.push((Some(name.into()), item));
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, item)| item)
    }

    /// Iterates mutably over entries in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, item)| item)
    }

    /// Iterates over entry names in order (`None` for unnamed entries).
    pub fn names(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|(name, _)| name.as_deref())
    }

    /// Iterates over `(name, entry)` pairs in order.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&str>, &T)> {
        self.entries
            .iter()
            .map(|(name, item)| (name.as_deref(), item))
    }

    /// Returns the first entry with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, item)| item)
    }

    /// Returns the first entry with the given name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, item)| item)
    }
}

impl<T> Default for Members<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Members<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            entries: items.into_iter().map(|item| (None, item)).collect(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Members<T> {
    fn from(items: [T; N]) -> Self {
        Vec::from(items).into()
    }
}

/// Keyed entries are ordered by key.
impl<T> From<BTreeMap<String, T>> for Members<T> {
    fn from(items: BTreeMap<String, T>) -> Self {
        Self {
            entries: items
                .into_iter()
                .map(|(name, item)| (Some(name), item))
                .collect(),
        }
    }
}

impl<T> FromIterator<T> for Members<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

/// Implements `From<Item>` for `Members<Item>` so a lone item is accepted
/// wherever a collection is.
macro_rules! impl_from_single {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::support::members::Members<$ty> {
                fn from(item: $ty) -> Self {
                    Self::new().with(item)
                }
            }
        )*
    };
}

pub(crate) use impl_from_single;

impl_from_single!(f64, Power);
