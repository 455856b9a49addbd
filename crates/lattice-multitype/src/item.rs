//! Type-erased items and ordered item sequences.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Partial-update hint forwarded from the host surface to a renderer.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// A shared, type-erased value displayed at one position of a list.
///
/// An `Item` remembers the concrete type it was built from, so matchers can
/// compare types without reflection and errors can name the offending type.
/// Cloning an `Item` shares the underlying value.
///
/// # Example
///
/// ```
/// use lattice_multitype::Item;
///
/// let item = Item::new(String::from("hello"));
/// assert!(item.is::<String>());
/// assert_eq!(item.downcast_ref::<String>().map(String::as_str), Some("hello"));
/// ```
#[derive(Clone)]
pub struct Item {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Item {
    /// Wraps a value in a new shared item.
    ///
    /// Passing an `Item` returns it as is, so it keeps its concrete type
    /// and its identity.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        if let Some(item) = (&value as &dyn Any).downcast_ref::<Item>() {
            return item.clone();
        }
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without copying it.
    ///
    /// An `Arc<Item>` yields the inner item rather than a nested one.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        if let Some(item) = (&*value as &dyn Any).downcast_ref::<Item>() {
            return item.clone();
        }
        Self {
            value,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the `TypeId` of the wrapped value.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name of the wrapped value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is exactly a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the wrapped value as `&T` if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns a shared handle to the wrapped value as `Arc<T>` if it is one.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Returns `true` if both items share the same value.
    #[inline]
    pub fn ptr_eq(&self, other: &Item) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.value), Arc::as_ptr(&other.value))
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// An ordered sequence of items, in display order.
///
/// `Items` is what the adapter takes in [`set_items`]. Building one is a
/// matter of pushing values of any registered type:
///
/// ```
/// use lattice_multitype::Items;
///
/// let mut items = Items::new();
/// items.push(String::from("title"));
/// items.push(42u32);
/// assert_eq!(items.len(), 2);
/// ```
///
/// [`set_items`]: crate::CollectionAdapter::set_items
#[derive(Debug, Clone, Default)]
pub struct Items {
    items: Vec<Item>,
}

impl Items {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value.
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.items.push(Item::new(value));
    }

    /// Appends an already shared value; the same `Arc` may appear many times.
    pub fn push_shared<T: Any + Send + Sync>(&mut self, value: Arc<T>) {
        self.items.push(Item::from_arc(value));
    }

    /// Appends an existing item.
    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    /// Iterates the items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Returns the items as a slice.
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }
}

impl From<Vec<Item>> for Items {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl FromIterator<Item> for Items {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Item> for Items {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Items {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Items {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
