//! The type registry: an ordered list of matcher/renderer bindings.
//!
//! Bindings are evaluated in registration order and the first one accepting
//! an item wins. Kinds are assigned sequentially as bindings are added, so
//! the kind of a binding is also its index.
//!
//! # Example
//!
//! ```
//! use lattice_multitype::{Item, ItemRenderer, Kind, TypeRegistry};
//!
//! struct Note(&'static str);
//! struct NoteRenderer;
//!
//! impl ItemRenderer for NoteRenderer {
//!     type Item = Note;
//!     type Visual = String;
//!
//!     fn create_visual(&self) -> String {
//!         String::new()
//!     }
//!
//!     fn bind_visual(&self, visual: &mut String, note: &Note, _position: usize) {
//!         *visual = note.0.to_string();
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! let kind = registry.register_type(NoteRenderer).unwrap();
//! assert_eq!(kind, Kind::new(0));
//! assert_eq!(registry.resolve(&Item::new(Note("hi"))).unwrap(), kind);
//! ```

use std::any::{Any, TypeId};

use crate::error::{Error, Result};
use crate::item::Item;
use crate::kind::Kind;
use crate::logging::targets;
use crate::matcher::Matcher;
use crate::renderer::{ItemRenderer, Renderer, RendererDescriptor};
use crate::resolver::TypeResolver;

/// A registered association between a matcher and a renderer descriptor.
#[derive(Debug)]
pub struct TypeBinding<V> {
    matcher: Matcher,
    descriptor: RendererDescriptor<V>,
}

impl<V> TypeBinding<V> {
    /// Returns the matcher deciding whether this binding applies.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Returns the renderer descriptor.
    pub fn descriptor(&self) -> &RendererDescriptor<V> {
        &self.descriptor
    }

    /// Returns the kind assigned to this binding.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.descriptor.kind()
    }
}

/// Maps matchers to renderers, in registration order.
///
/// `V` is the visual type every registered renderer produces. A registry is
/// meant to be filled during setup and only read afterwards; there is no way
/// to remove a binding.
#[derive(Debug)]
pub struct TypeRegistry<V> {
    bindings: Vec<TypeBinding<V>>,
}

impl<V> Default for TypeRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TypeRegistry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Creates an empty registry with room for `capacity` bindings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: Vec::with_capacity(capacity),
        }
    }

    /// Appends a binding and returns the kind assigned to it.
    ///
    /// Fails with [`Error::DuplicateBinding`] if an identical matcher is
    /// already registered; see [`Matcher::is_identical`].
    pub fn register(&mut self, matcher: Matcher, renderer: Renderer<V>) -> Result<Kind> {
        if self.bindings.iter().any(|b| b.matcher.is_identical(&matcher)) {
            tracing::debug!(target: targets::REGISTRY, %matcher, "rejected duplicate binding");
            return Err(Error::duplicate_binding(matcher.to_string()));
        }

        let kind = Kind::new(self.bindings.len());
        tracing::trace!(
            target: targets::REGISTRY,
            %kind,
            %matcher,
            renderer = renderer.item_type_name(),
            "registered binding"
        );
        self.bindings.push(TypeBinding {
            matcher,
            descriptor: RendererDescriptor::new(kind, renderer),
        });
        Ok(kind)
    }

    /// Copies every binding of `other`, in order, into this registry.
    ///
    /// Kinds are reassigned here; a binding's kind in `other` says nothing
    /// about its kind in `self`. Stops at the first duplicate, leaving the
    /// bindings copied so far in place.
    pub fn register_all(&mut self, other: &TypeRegistry<V>) -> Result<()> {
        for binding in &other.bindings {
            self.register(
                binding.matcher.clone(),
                binding.descriptor.renderer().clone(),
            )?;
        }
        Ok(())
    }

    /// Returns the number of bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns the binding registered under `kind`.
    pub fn binding_at(&self, kind: Kind) -> Result<&TypeBinding<V>> {
        self.bindings
            .get(kind.index())
            .ok_or(Error::UnknownKind {
                kind,
                binding_count: self.bindings.len(),
            })
    }

    /// Returns the renderer descriptor registered under `kind`.
    pub fn descriptor(&self, kind: Kind) -> Result<&RendererDescriptor<V>> {
        self.binding_at(kind).map(TypeBinding::descriptor)
    }

    /// Iterates the bindings in registration order.
    pub fn bindings(&self) -> impl ExactSizeIterator<Item = &TypeBinding<V>> + '_ {
        self.bindings.iter()
    }

    /// Returns the kind of the exact-type binding for `T`, if there is one.
    ///
    /// Predicate bindings over `T` are not considered.
    pub fn kind_of_type<T: Any>(&self) -> Option<Kind> {
        let type_id = TypeId::of::<T>();
        self.bindings
            .iter()
            .find(|b| b.matcher.exact_type_id() == Some(type_id))
            .map(TypeBinding::kind)
    }

    /// Resolves the kind for `item`; see [`TypeResolver::resolve`].
    pub fn resolve(&self, item: &Item) -> Result<Kind> {
        TypeResolver::resolve(item, self)
    }
}

impl<V: 'static> TypeRegistry<V> {
    /// Registers `renderer` for values whose type is exactly `R::Item`.
    pub fn register_type<R>(&mut self, renderer: R) -> Result<Kind>
    where
        R: ItemRenderer<Visual = V>,
    {
        self.register(Matcher::exact::<R::Item>(), Renderer::typed(renderer))
    }

    /// Registers `renderer` for values of type `R::Item` accepted by `predicate`.
    pub fn register_when<R, F>(&mut self, predicate: F, renderer: R) -> Result<Kind>
    where
        R: ItemRenderer<Visual = V>,
        F: Fn(&R::Item) -> bool + Send + Sync + 'static,
    {
        self.register(Matcher::when::<R::Item>(predicate), Renderer::typed(renderer))
    }

    /// Registers a renderer of erased items for every item `predicate` accepts.
    pub fn register_any<R, F>(&mut self, predicate: F, renderer: R) -> Result<Kind>
    where
        R: ItemRenderer<Item = Item, Visual = V>,
        F: Fn(&Item) -> bool + Send + Sync + 'static,
    {
        self.register(Matcher::any(predicate), Renderer::untyped(renderer))
    }
}

impl<V> Clone for TypeRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            bindings: self
                .bindings
                .iter()
                .map(|b| TypeBinding {
                    matcher: b.matcher.clone(),
                    descriptor: b.descriptor.clone(),
                })
                .collect(),
        }
    }
}
