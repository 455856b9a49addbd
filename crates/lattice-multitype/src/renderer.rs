//! Renderers and the descriptors that tie them to kinds.
//!
//! An [`ItemRenderer`] knows how to create a visual for one value type and
//! how to fill an existing visual with a value of that type. The registry
//! stores renderers type-erased as [`Renderer<V>`], where `V` is the visual
//! type shared by every renderer feeding the same host surface.
//!
//! # Example
//!
//! ```
//! use lattice_multitype::ItemRenderer;
//!
//! struct TextItem {
//!     text: String,
//! }
//!
//! struct TextRenderer;
//!
//! impl ItemRenderer for TextRenderer {
//!     type Item = TextItem;
//!     type Visual = String;
//!
//!     fn create_visual(&self) -> String {
//!         String::new()
//!     }
//!
//!     fn bind_visual(&self, visual: &mut String, item: &TextItem, position: usize) {
//!         *visual = format!("{position}: {}", item.text);
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::item::{Item, Payload};
use crate::kind::{Kind, VisualHandle};

/// Creates and binds visuals for one item type.
///
/// Renderers are shared by every visual of their kind, so they take `&self`
/// and keep per-visual state inside the visual.
pub trait ItemRenderer: Send + Sync + 'static {
    /// The value type this renderer draws.
    ///
    /// Use [`Item`] to receive the type-erased item (for renderers registered
    /// with an untyped predicate).
    type Item: Any;

    /// The visual type produced for the host surface.
    type Visual;

    /// Creates a fresh, unbound visual.
    ///
    /// Called once per reusable slot, not once per item.
    fn create_visual(&self) -> Self::Visual;

    /// Fills `visual` with `item`, displayed at `position`.
    fn bind_visual(&self, visual: &mut Self::Visual, item: &Self::Item, position: usize);

    /// Partially updates `visual` using `payloads` from the host.
    ///
    /// The default ignores the payloads and performs a full bind.
    fn bind_visual_with_payloads(
        &self,
        visual: &mut Self::Visual,
        item: &Self::Item,
        position: usize,
        payloads: &[Payload],
    ) {
        let _ = payloads;
        self.bind_visual(visual, item, position);
    }
}

/// Object-safe form of [`ItemRenderer`] working on type-erased items.
trait ErasedRenderer<V>: Send + Sync {
    fn create_visual(&self) -> V;

    fn bind_visual(
        &self,
        visual: &mut V,
        item: &Item,
        position: usize,
        payloads: &[Payload],
    ) -> Result<()>;

    fn item_type_name(&self) -> &'static str;
}

/// Downcasts each item to `R::Item` before binding.
struct Typed<R> {
    renderer: R,
}

impl<R: ItemRenderer> ErasedRenderer<R::Visual> for Typed<R> {
    fn create_visual(&self) -> R::Visual {
        self.renderer.create_visual()
    }

    fn bind_visual(
        &self,
        visual: &mut R::Visual,
        item: &Item,
        position: usize,
        payloads: &[Payload],
    ) -> Result<()> {
        let value = item
            .downcast_ref::<R::Item>()
            .ok_or(Error::ItemTypeMismatch {
                expected: std::any::type_name::<R::Item>(),
                position,
            })?;
        if payloads.is_empty() {
            self.renderer.bind_visual(visual, value, position);
        } else {
            self.renderer
                .bind_visual_with_payloads(visual, value, position, payloads);
        }
        Ok(())
    }

    fn item_type_name(&self) -> &'static str {
        std::any::type_name::<R::Item>()
    }
}

/// Hands the erased item through unchanged.
struct Untyped<R> {
    renderer: R,
}

impl<R: ItemRenderer<Item = Item>> ErasedRenderer<R::Visual> for Untyped<R> {
    fn create_visual(&self) -> R::Visual {
        self.renderer.create_visual()
    }

    fn bind_visual(
        &self,
        visual: &mut R::Visual,
        item: &Item,
        position: usize,
        payloads: &[Payload],
    ) -> Result<()> {
        if payloads.is_empty() {
            self.renderer.bind_visual(visual, item, position);
        } else {
            self.renderer
                .bind_visual_with_payloads(visual, item, position, payloads);
        }
        Ok(())
    }

    fn item_type_name(&self) -> &'static str {
        std::any::type_name::<Item>()
    }
}

/// A type-erased, shareable renderer producing visuals of type `V`.
pub struct Renderer<V> {
    inner: Arc<dyn ErasedRenderer<V>>,
}

impl<V: 'static> Renderer<V> {
    /// Erases a renderer for a concrete item type.
    ///
    /// Items handed to it are downcast to `R::Item`; an item of another type
    /// is reported as [`Error::ItemTypeMismatch`].
    pub fn typed<R>(renderer: R) -> Self
    where
        R: ItemRenderer<Visual = V>,
    {
        Self {
            inner: Arc::new(Typed { renderer }),
        }
    }

    /// Erases a renderer that accepts any [`Item`].
    pub fn untyped<R>(renderer: R) -> Self
    where
        R: ItemRenderer<Item = Item, Visual = V>,
    {
        Self {
            inner: Arc::new(Untyped { renderer }),
        }
    }
}

impl<V> Renderer<V> {
    /// Creates a fresh visual.
    pub fn create_visual(&self) -> V {
        self.inner.create_visual()
    }

    /// Binds `item` into `visual`.
    pub fn bind_visual(
        &self,
        visual: &mut V,
        item: &Item,
        position: usize,
        payloads: &[Payload],
    ) -> Result<()> {
        self.inner.bind_visual(visual, item, position, payloads)
    }

    /// Returns the name of the item type this renderer draws.
    pub fn item_type_name(&self) -> &'static str {
        self.inner.item_type_name()
    }
}

impl<V> Clone for Renderer<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for Renderer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("item_type", &self.item_type_name())
            .finish()
    }
}

/// A renderer paired with the kind the registry assigned to it.
#[derive(Debug)]
pub struct RendererDescriptor<V> {
    kind: Kind,
    renderer: Renderer<V>,
}

impl<V> RendererDescriptor<V> {
    pub(crate) fn new(kind: Kind, renderer: Renderer<V>) -> Self {
        Self { kind, renderer }
    }

    /// Returns the kind assigned at registration.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the erased renderer.
    pub fn renderer(&self) -> &Renderer<V> {
        &self.renderer
    }

    /// Creates a visual tagged with this descriptor's kind.
    pub fn create_visual(&self) -> VisualHandle<V> {
        VisualHandle::new(self.kind, self.renderer.create_visual())
    }

    /// Binds `item` into an existing handle.
    pub fn bind_visual(
        &self,
        handle: &mut VisualHandle<V>,
        item: &Item,
        position: usize,
        payloads: &[Payload],
    ) -> Result<()> {
        self.renderer
            .bind_visual(handle.visual_mut(), item, position, payloads)
    }
}

impl<V> Clone for RendererDescriptor<V> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            renderer: self.renderer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting(&'static str);

    struct GreetingRenderer;

    impl ItemRenderer for GreetingRenderer {
        type Item = Greeting;
        type Visual = String;

        fn create_visual(&self) -> String {
            String::from("<empty>")
        }

        fn bind_visual(&self, visual: &mut String, item: &Greeting, position: usize) {
            *visual = format!("{position}:{}", item.0);
        }

        fn bind_visual_with_payloads(
            &self,
            visual: &mut String,
            item: &Greeting,
            _position: usize,
            payloads: &[Payload],
        ) {
            *visual = format!("{}+{}", item.0, payloads.len());
        }
    }

    struct TypeNameRenderer;

    impl ItemRenderer for TypeNameRenderer {
        type Item = Item;
        type Visual = String;

        fn create_visual(&self) -> String {
            String::new()
        }

        fn bind_visual(&self, visual: &mut String, item: &Item, _position: usize) {
            *visual = item.type_name().to_string();
        }
    }

    #[test]
    fn test_typed_renderer_binds_matching_item() {
        let renderer = Renderer::typed(GreetingRenderer);
        let mut visual = renderer.create_visual();
        assert_eq!(visual, "<empty>");

        renderer
            .bind_visual(&mut visual, &Item::new(Greeting("hi")), 2, &[])
            .unwrap();
        assert_eq!(visual, "2:hi");
    }

    #[test]
    fn test_typed_renderer_rejects_other_types() {
        let renderer = Renderer::typed(GreetingRenderer);
        let mut visual = renderer.create_visual();
        let err = renderer
            .bind_visual(&mut visual, &Item::new(5u32), 0, &[])
            .unwrap_err();
        assert!(matches!(err, Error::ItemTypeMismatch { position: 0, .. }));
        assert_eq!(visual, "<empty>");
    }

    #[test]
    fn test_payloads_route_to_partial_bind() {
        let renderer = Renderer::typed(GreetingRenderer);
        let mut visual = renderer.create_visual();
        let payloads = vec![Arc::new("title") as Payload];
        renderer
            .bind_visual(&mut visual, &Item::new(Greeting("yo")), 0, &payloads)
            .unwrap();
        assert_eq!(visual, "yo+1");
    }

    #[test]
    fn test_untyped_renderer_sees_erased_item() {
        let renderer = Renderer::untyped(TypeNameRenderer);
        let mut visual = renderer.create_visual();
        renderer
            .bind_visual(&mut visual, &Item::new(1.5f64), 0, &[])
            .unwrap();
        assert_eq!(visual, "f64");
    }

    #[test]
    fn test_descriptor_tags_visual_with_kind() {
        let descriptor = RendererDescriptor::new(Kind::new(4), Renderer::typed(GreetingRenderer));
        let mut handle = descriptor.create_visual();
        assert_eq!(handle.kind(), Kind::new(4));
        descriptor
            .bind_visual(&mut handle, &Item::new(Greeting("x")), 9, &[])
            .unwrap();
        assert_eq!(handle.visual(), "9:x");
    }
}
