//! The collection adapter that host list/grid surfaces talk to.
//!
//! [`CollectionAdapter`] owns the item sequence and the [`TypeRegistry`] and
//! answers the questions a recycling list surface asks:
//!
//! 1. How many items are there? ([`item_count`](CollectionAdapter::item_count))
//! 2. Which kind is the item at position N? ([`kind_at`](CollectionAdapter::kind_at))
//! 3. Create a visual for a kind ([`create_visual`](CollectionAdapter::create_visual))
//!    and bind it to a position ([`bind_visual`](CollectionAdapter::bind_visual)).
//!
//! Recycling itself belongs to the host. What the adapter guarantees is that
//! a position maps to the same kind for as long as the item snapshot is not
//! replaced, and that a visual is never bound to a position of another kind.
//!
//! # Example
//!
//! ```
//! use lattice_multitype::{CollectionAdapter, ItemRenderer, Items, Kind};
//!
//! struct Title(&'static str);
//! struct Divider;
//!
//! struct TitleRenderer;
//! impl ItemRenderer for TitleRenderer {
//!     type Item = Title;
//!     type Visual = String;
//!     fn create_visual(&self) -> String { String::new() }
//!     fn bind_visual(&self, visual: &mut String, title: &Title, _position: usize) {
//!         *visual = title.0.to_uppercase();
//!     }
//! }
//!
//! struct DividerRenderer;
//! impl ItemRenderer for DividerRenderer {
//!     type Item = Divider;
//!     type Visual = String;
//!     fn create_visual(&self) -> String { String::from("----") }
//!     fn bind_visual(&self, _visual: &mut String, _divider: &Divider, _position: usize) {}
//! }
//!
//! let mut adapter = CollectionAdapter::new();
//! adapter.register_type(TitleRenderer).unwrap();
//! adapter.register_type(DividerRenderer).unwrap();
//!
//! let mut items = Items::new();
//! items.push(Title("fruit"));
//! items.push(Divider);
//! adapter.set_items(items);
//!
//! assert_eq!(adapter.item_count(), 2);
//! let kind = adapter.kind_at(0).unwrap();
//! assert_eq!(kind, Kind::new(0));
//!
//! let mut handle = adapter.create_visual(kind).unwrap();
//! adapter.bind_visual(&mut handle, 0).unwrap();
//! assert_eq!(handle.visual(), "FRUIT");
//! ```

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::item::{Item, Items, Payload};
use crate::kind::{Kind, VisualHandle};
use crate::logging::targets;
use crate::matcher::Matcher;
use crate::registry::TypeRegistry;
use crate::renderer::{ItemRenderer, Renderer};
use crate::resolver::TypeResolver;

/// Type alias for a function mapping a wrapper item to the value to display.
///
/// The flattened item is what matchers see and what renderers bind. The
/// adapter still reports the unflattened item from [`CollectionAdapter::item_at`].
pub type Flattener = Arc<dyn Fn(&Item) -> Item + Send + Sync>;

/// The contract a host rendering surface drives.
///
/// This is the minimal surface a recycling list needs: a count, a kind per
/// position, and create/bind operations for visuals.
pub trait ItemAdapter {
    /// The visual type handed to the host.
    type Visual;

    /// Returns the number of positions.
    fn count(&self) -> usize;

    /// Returns the kind of the item at `position`.
    fn kind_of(&self, position: usize) -> Result<Kind>;

    /// Creates a new visual for `kind`.
    fn create_visual(&self, kind: Kind) -> Result<VisualHandle<Self::Visual>>;

    /// Binds the item at `position` into `handle`.
    fn bind_visual(&self, handle: &mut VisualHandle<Self::Visual>, position: usize) -> Result<()>;
}

/// Renders a heterogeneous item sequence through per-type renderers.
///
/// `V` is the visual type shared by every registered renderer.
///
/// Mutation (registration, item replacement) takes `&mut self`; all queries
/// take `&self` and observe exactly the snapshot passed to the last
/// [`set_items`](Self::set_items).
pub struct CollectionAdapter<V> {
    registry: TypeRegistry<V>,
    items: Items,
    flattener: Option<Flattener>,
}

impl<V> Default for CollectionAdapter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CollectionAdapter<V> {
    /// Creates an adapter with an empty registry and no items.
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::new())
    }

    /// Creates an adapter around an existing registry.
    pub fn with_registry(registry: TypeRegistry<V>) -> Self {
        Self {
            registry,
            items: Items::new(),
            flattener: None,
        }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &TypeRegistry<V> {
        &self.registry
    }

    /// Registers a binding; see [`TypeRegistry::register`].
    pub fn register(&mut self, matcher: Matcher, renderer: Renderer<V>) -> Result<Kind> {
        self.warn_if_items_present();
        self.registry.register(matcher, renderer)
    }

    /// Copies every binding of `registry`; see [`TypeRegistry::register_all`].
    pub fn register_all(&mut self, registry: &TypeRegistry<V>) -> Result<()> {
        self.warn_if_items_present();
        self.registry.register_all(registry)
    }

    /// Replaces the item sequence.
    ///
    /// Nothing is resolved here: kinds are computed when the host asks for
    /// them, so an unregistered type only surfaces once its position is
    /// queried. Every position reported before this call is invalid after it.
    pub fn set_items(&mut self, items: impl Into<Items>) {
        let items = items.into();
        tracing::trace!(
            target: targets::ADAPTER,
            previous = self.items.len(),
            count = items.len(),
            "replaced item snapshot"
        );
        self.items = items;
    }

    /// Returns the current item sequence.
    pub fn items(&self) -> &Items {
        &self.items
    }

    /// Installs a flattener applied before resolving and binding items.
    pub fn set_flattener<F>(&mut self, flattener: F)
    where
        F: Fn(&Item) -> Item + Send + Sync + 'static,
    {
        self.flattener = Some(Arc::new(flattener));
    }

    /// Removes the flattener.
    pub fn clear_flattener(&mut self) {
        self.flattener = None;
    }

    /// Returns the number of items; zero until items are set.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the item at `position`, exactly as it was set.
    pub fn item_at(&self, position: usize) -> Result<&Item> {
        self.items.get(position).ok_or(Error::IndexOutOfRange {
            position,
            count: self.items.len(),
        })
    }

    /// Returns the kind of the item at `position`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] outside `0..item_count()` and
    /// with [`Error::UnresolvedType`] if no binding accepts the item.
    pub fn kind_at(&self, position: usize) -> Result<Kind> {
        let item = self.display_item(position)?;
        TypeResolver::resolve(&item, &self.registry).map_err(|e| e.at(position))
    }

    /// Creates a visual for `kind`.
    ///
    /// Hosts call this once per reusable slot and rebind the visual to other
    /// positions of the same kind.
    pub fn create_visual(&self, kind: Kind) -> Result<VisualHandle<V>> {
        let descriptor = self.registry.descriptor(kind)?;
        tracing::trace!(target: targets::ADAPTER, %kind, "creating visual");
        Ok(descriptor.create_visual())
    }

    /// Binds the item at `position` into `handle`.
    ///
    /// The item's kind is resolved again and must equal the kind `handle` was
    /// created for, otherwise [`Error::VisualKindMismatch`] is returned and
    /// the visual is left untouched.
    pub fn bind_visual(&self, handle: &mut VisualHandle<V>, position: usize) -> Result<()> {
        self.bind_visual_with_payloads(handle, position, &[])
    }

    /// Binds the item at `position` into `handle`, forwarding `payloads`.
    ///
    /// With an empty payload slice this is a full bind; otherwise the
    /// renderer's partial bind is used.
    pub fn bind_visual_with_payloads(
        &self,
        handle: &mut VisualHandle<V>,
        position: usize,
        payloads: &[Payload],
    ) -> Result<()> {
        let item = self.display_item(position)?;
        let kind = TypeResolver::resolve(&item, &self.registry).map_err(|e| e.at(position))?;
        if kind != handle.kind() {
            tracing::debug!(
                target: targets::ADAPTER,
                expected = %handle.kind(),
                actual = %kind,
                position,
                "visual kind mismatch"
            );
            return Err(Error::VisualKindMismatch {
                expected: handle.kind(),
                actual: kind,
                position,
            });
        }

        self.registry
            .descriptor(kind)?
            .bind_visual(handle, &item, position, payloads)
    }

    /// Returns the item at `position` after flattening.
    fn display_item(&self, position: usize) -> Result<Item> {
        let item = self.item_at(position)?;
        Ok(match &self.flattener {
            Some(flatten) => flatten(item),
            None => item.clone(),
        })
    }

    fn warn_if_items_present(&self) {
        if !self.items.is_empty() {
            tracing::warn!(
                target: targets::ADAPTER,
                count = self.items.len(),
                "registering a binding after items were set"
            );
        }
    }
}

impl<V: 'static> CollectionAdapter<V> {
    /// Returns a builder for configuring an adapter in one expression.
    pub fn builder() -> CollectionAdapterBuilder<V> {
        CollectionAdapterBuilder::new()
    }

    /// Registers `renderer` for values of exactly its item type.
    pub fn register_type<R>(&mut self, renderer: R) -> Result<Kind>
    where
        R: ItemRenderer<Visual = V>,
    {
        self.warn_if_items_present();
        self.registry.register_type(renderer)
    }

    /// Registers `renderer` for values of its item type accepted by `predicate`.
    pub fn register_when<R, F>(&mut self, predicate: F, renderer: R) -> Result<Kind>
    where
        R: ItemRenderer<Visual = V>,
        F: Fn(&R::Item) -> bool + Send + Sync + 'static,
    {
        self.warn_if_items_present();
        self.registry.register_when(predicate, renderer)
    }

    /// Registers a renderer of erased items for every item `predicate` accepts.
    pub fn register_any<R, F>(&mut self, predicate: F, renderer: R) -> Result<Kind>
    where
        R: ItemRenderer<Item = Item, Visual = V>,
        F: Fn(&Item) -> bool + Send + Sync + 'static,
    {
        self.warn_if_items_present();
        self.registry.register_any(predicate, renderer)
    }
}

impl<V> ItemAdapter for CollectionAdapter<V> {
    type Visual = V;

    fn count(&self) -> usize {
        self.item_count()
    }

    fn kind_of(&self, position: usize) -> Result<Kind> {
        self.kind_at(position)
    }

    fn create_visual(&self, kind: Kind) -> Result<VisualHandle<V>> {
        CollectionAdapter::create_visual(self, kind)
    }

    fn bind_visual(&self, handle: &mut VisualHandle<V>, position: usize) -> Result<()> {
        CollectionAdapter::bind_visual(self, handle, position)
    }
}

impl<V> std::fmt::Debug for CollectionAdapter<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionAdapter")
            .field("binding_count", &self.registry.binding_count())
            .field("item_count", &self.items.len())
            .field("flattened", &self.flattener.is_some())
            .finish()
    }
}

/// A deferred registration recorded by the builder.
type Registration<V> = Box<dyn FnOnce(&mut TypeRegistry<V>) -> Result<Kind> + Send>;

/// Builder for [`CollectionAdapter`].
///
/// Registrations are applied in the order they were added when
/// [`build`](Self::build) runs; the first failing registration aborts the
/// build.
///
/// # Example
///
/// ```ignore
/// let adapter = CollectionAdapter::builder()
///     .capacity(3)
///     .register_type(TextRenderer)
///     .register_type(ImageRenderer)
///     .items(items)
///     .build()?;
/// ```
pub struct CollectionAdapterBuilder<V> {
    capacity: usize,
    base: Option<TypeRegistry<V>>,
    registrations: Vec<Registration<V>>,
    flattener: Option<Flattener>,
    items: Items,
}

impl<V: 'static> CollectionAdapterBuilder<V> {
    /// Creates a builder with no registrations.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            base: None,
            registrations: Vec::new(),
            flattener: None,
            items: Items::new(),
        }
    }

    /// Reserves room for `capacity` bindings.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Starts from a copy of `registry`'s bindings.
    pub fn registry(mut self, registry: TypeRegistry<V>) -> Self {
        self.base = Some(registry);
        self
    }

    /// Adds a binding with an explicit matcher.
    pub fn register(mut self, matcher: Matcher, renderer: Renderer<V>) -> Self {
        self.registrations.push(Box::new(move |registry: &mut TypeRegistry<V>| {
            registry.register(matcher, renderer)
        }));
        self
    }

    /// Adds an exact-type binding.
    pub fn register_type<R>(mut self, renderer: R) -> Self
    where
        R: ItemRenderer<Visual = V>,
    {
        self.registrations.push(Box::new(move |registry: &mut TypeRegistry<V>| {
            registry.register_type(renderer)
        }));
        self
    }

    /// Adds a typed predicate binding.
    pub fn register_when<R, F>(mut self, predicate: F, renderer: R) -> Self
    where
        R: ItemRenderer<Visual = V>,
        F: Fn(&R::Item) -> bool + Send + Sync + 'static,
    {
        self.registrations.push(Box::new(move |registry: &mut TypeRegistry<V>| {
            registry.register_when(predicate, renderer)
        }));
        self
    }

    /// Adds an untyped predicate binding.
    pub fn register_any<R, F>(mut self, predicate: F, renderer: R) -> Self
    where
        R: ItemRenderer<Item = Item, Visual = V>,
        F: Fn(&Item) -> bool + Send + Sync + 'static,
    {
        self.registrations.push(Box::new(move |registry: &mut TypeRegistry<V>| {
            registry.register_any(predicate, renderer)
        }));
        self
    }

    /// Installs a flattener.
    pub fn flatten_with<F>(mut self, flattener: F) -> Self
    where
        F: Fn(&Item) -> Item + Send + Sync + 'static,
    {
        self.flattener = Some(Arc::new(flattener));
        self
    }

    /// Sets the initial items.
    pub fn items(mut self, items: impl Into<Items>) -> Self {
        self.items = items.into();
        self
    }

    /// Builds the adapter, applying registrations in order.
    pub fn build(self) -> Result<CollectionAdapter<V>> {
        let mut registry = TypeRegistry::with_capacity(self.capacity);
        if let Some(base) = &self.base {
            registry.register_all(base)?;
        }
        for registration in self.registrations {
            registration(&mut registry)?;
        }

        tracing::trace!(
            target: targets::ADAPTER,
            binding_count = registry.binding_count(),
            item_count = self.items.len(),
            "built adapter"
        );

        Ok(CollectionAdapter {
            registry,
            items: self.items,
            flattener: self.flattener,
        })
    }
}

impl<V: 'static> Default for CollectionAdapterBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
