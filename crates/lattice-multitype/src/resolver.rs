//! Item to kind resolution.
//!
//! Resolution is a linear scan of the registry's bindings in registration
//! order. There is no notion of a "more specific" matcher: an
//! exact-type binding registered after a predicate binding for the same type
//! only sees the items the predicate rejected.

use crate::error::{Error, Result};
use crate::item::Item;
use crate::kind::Kind;
use crate::logging::targets;
use crate::registry::TypeRegistry;

/// Resolves items to the kind of the first binding that accepts them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver;

impl TypeResolver {
    /// Returns the kind of the first binding in `registry` accepting `item`.
    ///
    /// Fails with [`Error::UnresolvedType`] when no binding matches. The
    /// error carries no position; callers resolving a list position attach
    /// one with [`Error::at`].
    pub fn resolve<V>(item: &Item, registry: &TypeRegistry<V>) -> Result<Kind> {
        match registry.bindings().find(|b| b.matcher().accepts(item)) {
            Some(binding) => Ok(binding.kind()),
            None => {
                tracing::debug!(
                    target: targets::RESOLVER,
                    type_name = item.type_name(),
                    binding_count = registry.binding_count(),
                    "no binding accepts item"
                );
                Err(Error::unresolved(item.type_name()))
            }
        }
    }
}
