//! Matchers deciding whether a binding applies to an item.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::item::Item;

/// Type alias for a predicate over type-erased items.
pub type ItemPredicate = Arc<dyn Fn(&Item) -> bool + Send + Sync>;

/// Decides whether a binding applies to an item.
///
/// Matchers come in three forms:
///
/// - [`Matcher::exact`] accepts values whose concrete type is exactly `T`.
/// - [`Matcher::when`] accepts values of type `T` that satisfy a predicate.
/// - [`Matcher::any`] accepts any item satisfying a predicate.
///
/// Matchers carry no priority of their own. When several bindings accept an
/// item, the one registered first wins.
///
/// # Example
///
/// ```
/// use lattice_multitype::{Item, Matcher};
///
/// struct Score(i32);
///
/// let positive = Matcher::when::<Score>(|score| score.0 > 0);
/// assert!(positive.accepts(&Item::new(Score(5))));
/// assert!(!positive.accepts(&Item::new(Score(-1))));
/// assert!(!positive.accepts(&Item::new(5i32)));
/// ```
#[derive(Clone)]
pub struct Matcher {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Exact {
        type_id: TypeId,
        type_name: &'static str,
    },
    Predicate {
        type_name: Option<&'static str>,
        predicate: ItemPredicate,
    },
}

impl Matcher {
    /// Accepts values whose concrete type is exactly `T`.
    pub fn exact<T: Any>() -> Self {
        Self {
            repr: Repr::Exact {
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
            },
        }
    }

    /// Accepts values of type `T` for which `predicate` returns `true`.
    pub fn when<T: Any>(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            repr: Repr::Predicate {
                type_name: Some(std::any::type_name::<T>()),
                predicate: Arc::new(move |item: &Item| {
                    item.downcast_ref::<T>().is_some_and(&predicate)
                }),
            },
        }
    }

    /// Accepts any item for which `predicate` returns `true`.
    pub fn any<F>(predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + Send + Sync + 'static,
    {
        Self {
            repr: Repr::Predicate {
                type_name: None,
                predicate: Arc::new(predicate),
            },
        }
    }

    /// Returns `true` if this matcher accepts `item`.
    pub fn accepts(&self, item: &Item) -> bool {
        match &self.repr {
            Repr::Exact { type_id, .. } => item.type_id() == *type_id,
            Repr::Predicate { predicate, .. } => predicate(item),
        }
    }

    /// Returns `true` if this is an exact-type matcher.
    pub fn is_exact(&self) -> bool {
        matches!(self.repr, Repr::Exact { .. })
    }

    /// Returns the `TypeId` of an exact-type matcher.
    pub fn exact_type_id(&self) -> Option<TypeId> {
        match self.repr {
            Repr::Exact { type_id, .. } => Some(type_id),
            Repr::Predicate { .. } => None,
        }
    }

    /// Returns `true` if both matchers would be registered as the same binding.
    ///
    /// Exact matchers are identical when they name the same type. Predicate
    /// matchers are identical only when they share the same predicate, as
    /// happens when one matcher is cloned and registered twice.
    pub fn is_identical(&self, other: &Matcher) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Exact { type_id: a, .. }, Repr::Exact { type_id: b, .. }) => a == b,
            (Repr::Predicate { predicate: a, .. }, Repr::Predicate { predicate: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Exact { type_name, .. } => write!(f, "exact type {type_name}"),
            Repr::Predicate {
                type_name: Some(type_name),
                ..
            } => write!(f, "predicate over {type_name}"),
            Repr::Predicate {
                type_name: None, ..
            } => write!(f, "predicate over any item"),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.to_string()).finish()
    }
}
