//! Type-indexed renderer registry for list and grid views.
//!
//! This crate lets a recycling list surface display a heterogeneous sequence
//! of values, each drawn by a renderer registered for its type:
//!
//! - **[`TypeRegistry`]**: ordered matcher/renderer bindings, each assigned a
//!   sequential [`Kind`]
//! - **[`TypeResolver`]**: maps an item to the kind of the first binding that
//!   accepts it
//! - **[`CollectionAdapter`]**: owns the items and the registry, and answers
//!   the host surface's count/kind/create/bind questions
//! - **[`ItemRenderer`]**: the trait applications implement per item type
//!
//! # Example
//!
//! ```
//! use lattice_multitype::{CollectionAdapter, ItemRenderer, Items, Kind};
//!
//! struct TextItem(String);
//! struct ImageItem(u32);
//!
//! struct TextRenderer;
//! impl ItemRenderer for TextRenderer {
//!     type Item = TextItem;
//!     type Visual = String;
//!     fn create_visual(&self) -> String { String::new() }
//!     fn bind_visual(&self, visual: &mut String, item: &TextItem, _position: usize) {
//!         visual.clone_from(&item.0);
//!     }
//! }
//!
//! struct ImageRenderer;
//! impl ItemRenderer for ImageRenderer {
//!     type Item = ImageItem;
//!     type Visual = String;
//!     fn create_visual(&self) -> String { String::new() }
//!     fn bind_visual(&self, visual: &mut String, item: &ImageItem, _position: usize) {
//!         *visual = format!("[image {}]", item.0);
//!     }
//! }
//!
//! let mut adapter = CollectionAdapter::new();
//! adapter.register_type(TextRenderer).unwrap();
//! adapter.register_type(ImageRenderer).unwrap();
//!
//! let mut items = Items::new();
//! items.push(TextItem("world".into()));
//! items.push(ImageItem(1));
//! adapter.set_items(items);
//!
//! let kinds: Vec<Kind> = (0..adapter.item_count())
//!     .map(|p| adapter.kind_at(p).unwrap())
//!     .collect();
//! assert_eq!(kinds, [Kind::new(0), Kind::new(1)]);
//! ```
//!
//! # Precedence
//!
//! Bindings are tried in registration order and the first match wins. An
//! exact-type binding gets no priority over a predicate registered before
//! it, so callers control precedence purely through registration order.
//!
//! # Threading
//!
//! The adapter is synchronous and performs no locking. Mutation takes
//! `&mut self`; drive it from the thread that owns the rendering surface.

mod adapter;
mod error;
mod item;
mod kind;
pub mod logging;
mod matcher;
mod registry;
mod renderer;
mod resolver;

pub use adapter::{CollectionAdapter, CollectionAdapterBuilder, Flattener, ItemAdapter};
pub use error::{Error, Result};
pub use item::{Item, Items, Payload};
pub use kind::{Kind, VisualHandle};
pub use matcher::{ItemPredicate, Matcher};
pub use registry::{TypeBinding, TypeRegistry};
pub use renderer::{ItemRenderer, Renderer, RendererDescriptor};
pub use resolver::TypeResolver;

static_assertions::assert_impl_all!(Item: Send, Sync);
static_assertions::assert_impl_all!(Matcher: Send, Sync);
static_assertions::assert_impl_all!(TypeRegistry<()>: Send, Sync);
static_assertions::assert_impl_all!(CollectionAdapter<()>: Send, Sync);
static_assertions::assert_impl_all!(CollectionAdapterBuilder<()>: Send);
