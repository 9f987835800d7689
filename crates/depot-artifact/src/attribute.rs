//! Typed attribute side-table
//!
//! Provides [`AttributeKey`], a typed token identified by name plus value
//! type, and [`AttributeCollection`], a heterogeneous map keyed by such
//! tokens. Keys with the same name but different value types address
//! different slots, so unrelated side-data never collides.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

/// Typed attribute token
///
/// Two keys are equal when both the name and the value type match. This lets
/// one collection carry heterogeneous typed side-data without a shared base
/// type for the values.
pub struct AttributeKey<T> {
    name: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> AttributeKey<T> {
    /// Create a key from a static name
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _marker: PhantomData,
        }
    }

    /// Create a key from a runtime name
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _marker: PhantomData,
        }
    }

    /// Key name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type-erased form used as the map key
    #[inline]
    #[must_use]
    pub fn erased(&self) -> ErasedKey {
        ErasedKey {
            name: self.name.clone().into_owned(),
            type_id: TypeId::of::<T>(),
        }
    }
}

impl<T> Clone for AttributeKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> PartialEq for AttributeKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: 'static> Eq for AttributeKey<T> {}

impl<T> Debug for AttributeKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeKey")
            .field("name", &self.name)
            .finish()
    }
}

/// Type-erased attribute key: name plus value `TypeId`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErasedKey {
    name: String,
    type_id: TypeId,
}

impl ErasedKey {
    /// Key name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `TypeId` of the value type this key addresses
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// Mutation attempted on an immutable/absent sentinel container
#[derive(Debug, Clone, thiserror::Error)]
#[error("mutation attempted on the absent {target} sentinel")]
pub struct UnsupportedMutation {
    /// Which sentinel refused the mutation
    pub target: &'static str,
}

/// Clonable type-erased attribute value
trait AttributeValue: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn AttributeValue>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Send + Sync + Clone> AttributeValue for T {
    fn clone_box(&self) -> Box<dyn AttributeValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Heterogeneous typed attribute map
///
/// The `with` operation has map semantics: it sets the value for a key and
/// returns the previous value, not a copy-on-write builder. A distinguished
/// no-op variant ([`AttributeCollection::none`]) refuses every mutation and
/// reads as empty; it backs the absent identifier so that chained attribute
/// access never needs a null check.
pub struct AttributeCollection {
    inner: Inner,
}

enum Inner {
    Map(HashMap<ErasedKey, Box<dyn AttributeValue>>),
    None,
}

impl AttributeCollection {
    /// Create an empty, mutable collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Inner::Map(HashMap::new()),
        }
    }

    /// The no-op sentinel: `with` always fails, `get` is always empty
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self { inner: Inner::None }
    }

    /// Whether this is the no-op sentinel
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.inner, Inner::None)
    }

    /// Set the value for `key`, returning the previous value for that key
    ///
    /// # Errors
    /// [`UnsupportedMutation`] on the no-op sentinel.
    pub fn with<T>(
        &mut self,
        key: &AttributeKey<T>,
        value: T,
    ) -> Result<Option<T>, UnsupportedMutation>
    where
        T: Any + Send + Sync + Clone,
    {
        match &mut self.inner {
            Inner::None => Err(UnsupportedMutation {
                target: "attribute collection",
            }),
            Inner::Map(map) => {
                let previous = map.insert(key.erased(), Box::new(value));
                // The erased key carries the TypeId, so a previous value is
                // always of type T.
                Ok(previous
                    .and_then(|boxed| boxed.into_any().downcast::<T>().ok())
                    .map(|boxed| *boxed))
            }
        }
    }

    /// Typed read of the value for `key`
    #[must_use]
    pub fn get<T>(&self, key: &AttributeKey<T>) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        match &self.inner {
            Inner::None => None,
            Inner::Map(map) => map
                .get(&key.erased())
                .and_then(|boxed| (**boxed).as_any().downcast_ref()),
        }
    }

    /// Iterate over the erased keys
    pub fn keys(&self) -> impl Iterator<Item = &ErasedKey> {
        let map = match &self.inner {
            Inner::Map(map) => Some(map),
            Inner::None => None,
        };
        map.into_iter().flat_map(HashMap::keys)
    }

    /// Number of attributes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.inner {
            Inner::Map(map) => map.len(),
            Inner::None => 0,
        }
    }

    /// Whether no attributes are set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AttributeCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AttributeCollection {
    fn clone(&self) -> Self {
        match &self.inner {
            Inner::None => Self::none(),
            Inner::Map(map) => Self {
                inner: Inner::Map(
                    map.iter()
                        .map(|(key, value)| (key.clone(), (**value).clone_box()))
                        .collect(),
                ),
            },
        }
    }
}

impl Debug for AttributeCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::None => f.write_str("AttributeCollection::none"),
            Inner::Map(map) => f
                .debug_set()
                .entries(map.keys().map(ErasedKey::name))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RETRIES: AttributeKey<u32> = AttributeKey::new("retries");
    static LABEL: AttributeKey<String> = AttributeKey::new("label");

    #[test]
    fn with_returns_previous_value() {
        let mut attrs = AttributeCollection::new();

        assert_eq!(attrs.with(&RETRIES, 1).unwrap(), None);
        assert_eq!(attrs.with(&RETRIES, 2).unwrap(), Some(1));
        assert_eq!(attrs.get(&RETRIES), Some(&2));
    }

    #[test]
    fn heterogeneous_values() {
        let mut attrs = AttributeCollection::new();
        attrs.with(&RETRIES, 3).unwrap();
        attrs.with(&LABEL, "nightly".to_string()).unwrap();

        assert_eq!(attrs.get(&RETRIES), Some(&3));
        assert_eq!(attrs.get(&LABEL).map(String::as_str), Some("nightly"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn same_name_different_type_is_a_different_slot() {
        let text: AttributeKey<String> = AttributeKey::new("size");
        let number: AttributeKey<u64> = AttributeKey::new("size");

        let mut attrs = AttributeCollection::new();
        attrs.with(&text, "large".to_string()).unwrap();
        attrs.with(&number, 42u64).unwrap();

        assert_eq!(attrs.get(&text).map(String::as_str), Some("large"));
        assert_eq!(attrs.get(&number), Some(&42));
    }

    #[test]
    fn noop_sentinel_refuses_mutation() {
        let mut attrs = AttributeCollection::none();
        let err = attrs.with(&RETRIES, 1).unwrap_err();
        assert!(err.to_string().contains("attribute collection"));
    }

    #[test]
    fn noop_sentinel_reads_empty() {
        let attrs = AttributeCollection::none();
        assert_eq!(attrs.get(&RETRIES), None);
        assert!(attrs.is_empty());
        assert_eq!(attrs.keys().count(), 0);
        assert!(attrs.is_noop());
    }

    #[test]
    fn clone_is_deep() {
        let mut attrs = AttributeCollection::new();
        attrs.with(&RETRIES, 7).unwrap();

        let mut copy = attrs.clone();
        copy.with(&RETRIES, 8).unwrap();

        assert_eq!(attrs.get(&RETRIES), Some(&7));
        assert_eq!(copy.get(&RETRIES), Some(&8));
    }

    #[test]
    fn keys_iterate_names() {
        let mut attrs = AttributeCollection::new();
        attrs.with(&RETRIES, 1).unwrap();
        let names: Vec<_> = attrs.keys().map(ErasedKey::name).collect();
        assert_eq!(names, vec!["retries"]);
    }
}
