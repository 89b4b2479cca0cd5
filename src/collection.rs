use crate::compat::{Box, Vec};
use crate::error::{Error, Result};
use core::borrow::Borrow;
use core::str::FromStr;

/// Ordered offset-keyed storage shared by collection-like URL components.
///
/// Offsets are unique and keep insertion order, which concrete components
/// rely on when re-serializing. Lookups are linear: components hold a
/// handful of entries and the order has to be kept anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Collection<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Wrap entries already known to have unique offsets.
    pub(crate) fn from_unique(entries: Vec<(K, V)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(offset, value)` pairs in storage order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: PartialEq, V> Collection<K, V> {
    /// Materialize key/value data into a collection.
    ///
    /// Accepts any finite source of pairs, including another collection or
    /// a `Vec` of tuples. A repeated offset keeps the position of its first
    /// occurrence and takes the value of its last one.
    pub fn validate_source<I>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(K, V)> = Vec::new();
        for (key, value) in data {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }

    pub fn get<Q>(&self, offset: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == offset)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, offset: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries.iter().any(|(k, _)| k.borrow() == offset)
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for Collection<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::validate_source(iter)
    }
}

impl<K, V> IntoIterator for Collection<K, V> {
    type Item = (K, V);
    type IntoIter = crate::compat::VecIntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Collection<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the entries of a [`Collection`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Offsets to drop in [`Component::without`].
pub enum Selector<'a, K> {
    /// Remove every offset the predicate accepts
    Predicate(Box<dyn Fn(&K) -> bool + 'a>),
    /// Remove exactly these offsets
    Offsets(Vec<K>),
}

impl<'a, K> Selector<'a, K> {
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&K) -> bool + 'a,
    {
        Self::Predicate(Box::new(predicate))
    }
}

impl<K> From<Vec<K>> for Selector<'_, K> {
    fn from(offsets: Vec<K>) -> Self {
        Self::Offsets(offsets)
    }
}

impl<K: Clone> From<&[K]> for Selector<'_, K> {
    fn from(offsets: &[K]) -> Self {
        Self::Offsets(offsets.to_vec())
    }
}

impl<K, const N: usize> From<[K; N]> for Selector<'_, K> {
    fn from(offsets: [K; N]) -> Self {
        Self::Offsets(offsets.into_iter().collect())
    }
}

impl<K: core::fmt::Debug> core::fmt::Debug for Selector<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Offsets(offsets) => f.debug_tuple("Offsets").field(offsets).finish(),
        }
    }
}

/// What a [`Filter`] predicate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Value,
    Offset,
}

impl FilterMode {
    /// Numeric flag form: `1` for values, `2` for offsets.
    pub fn flag(self) -> u8 {
        match self {
            Self::Value => 1,
            Self::Offset => 2,
        }
    }
}

impl TryFrom<u8> for FilterMode {
    type Error = Error;

    fn try_from(flag: u8) -> Result<Self> {
        match flag {
            1 => Ok(Self::Value),
            2 => Ok(Self::Offset),
            _ => Err(Error::InvalidArgument),
        }
    }
}

impl FromStr for FilterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "value" => Ok(Self::Value),
            "offset" | "key" => Ok(Self::Offset),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Entry predicate for [`Component::filter`].
///
/// An offset predicate only ever sees the offset, never the value stored
/// under it.
pub enum Filter<'a, K, V> {
    Value(Box<dyn Fn(&V) -> bool + 'a>),
    Offset(Box<dyn Fn(&K) -> bool + 'a>),
}

impl<'a, K, V> Filter<'a, K, V> {
    pub fn by_value<F>(predicate: F) -> Self
    where
        F: Fn(&V) -> bool + 'a,
    {
        Self::Value(Box::new(predicate))
    }

    pub fn by_offset<F>(predicate: F) -> Self
    where
        F: Fn(&K) -> bool + 'a,
    {
        Self::Offset(Box::new(predicate))
    }

    pub fn mode(&self) -> FilterMode {
        match self {
            Self::Value(_) => FilterMode::Value,
            Self::Offset(_) => FilterMode::Offset,
        }
    }
}

impl<K, V> core::fmt::Debug for Filter<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Filter({:?})", self.mode())
    }
}

/// Collection behavior for URL components.
///
/// Implementors expose their storage through [`Component::collection`] and
/// build derived values through [`Component::new_instance`], so every value
/// returned by [`Component::without`] or [`Component::filter`] passes the
/// component's own construction rules again. Offsets given by callers go
/// through [`Component::validate_offset`] before any lookup or removal.
pub trait Component: Sized {
    type Offset: Clone + PartialEq;
    type Value: Clone;

    fn collection(&self) -> &Collection<Self::Offset, Self::Value>;

    /// Build a new value of the implementing type from retained entries.
    fn new_instance(&self, data: Collection<Self::Offset, Self::Value>) -> Result<Self>;

    /// Normalize or reject a caller-supplied offset. Identity by default.
    fn validate_offset(&self, offset: &Self::Offset) -> Result<Self::Offset> {
        Ok(offset.clone())
    }

    fn count(&self) -> usize {
        self.collection().len()
    }

    fn iter(&self) -> Iter<'_, Self::Offset, Self::Value> {
        self.collection().iter()
    }

    /// Snapshot of the entries in storage order.
    fn to_vec(&self) -> Vec<(Self::Offset, Self::Value)> {
        self.collection().as_slice().to_vec()
    }

    fn has_offset(&self, offset: &Self::Offset) -> Result<bool> {
        let offset = self.validate_offset(offset)?;
        Ok(self.collection().contains_key(&offset))
    }

    fn offsets(&self) -> Vec<Self::Offset> {
        self.collection().keys().cloned().collect()
    }

    /// Offsets whose value equals `value`, in storage order.
    fn offsets_of(&self, value: &Self::Value) -> Vec<Self::Offset>
    where
        Self::Value: PartialEq,
    {
        self.iter()
            .filter(|(_, v)| *v == value)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Return a copy without the selected offsets.
    ///
    /// Every offset to remove, whether listed or matched by a predicate, is
    /// validated first; a rejected offset aborts the call.
    fn without<'a, S>(&self, selector: S) -> Result<Self>
    where
        S: Into<Selector<'a, Self::Offset>>,
        Self::Offset: 'a,
    {
        let selected: Vec<Self::Offset> = match selector.into() {
            Selector::Predicate(predicate) => self
                .collection()
                .keys()
                .filter(|k| predicate(*k))
                .cloned()
                .collect(),
            Selector::Offsets(offsets) => offsets,
        };

        let removed = selected
            .iter()
            .map(|offset| self.validate_offset(offset))
            .collect::<Result<Vec<_>>>()?;

        let data = self
            .iter()
            .filter(|(k, _)| !removed.contains(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        self.new_instance(Collection::from_unique(data))
    }

    /// Return a copy holding only the entries accepted by `filter`.
    fn filter(&self, filter: Filter<'_, Self::Offset, Self::Value>) -> Result<Self> {
        let data = match filter {
            Filter::Value(predicate) => self
                .iter()
                .filter(|(_, v)| predicate(*v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Filter::Offset(predicate) => self
                .iter()
                .filter(|(k, _)| predicate(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        self.new_instance(Collection::from_unique(data))
    }
}
