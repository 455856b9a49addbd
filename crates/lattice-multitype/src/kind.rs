//! Kinds and the visual handles created for them.

use std::fmt;

/// Integer tag identifying which registered renderer draws a position.
///
/// Kinds are handed out sequentially (`0, 1, 2, ...`) by a [`TypeRegistry`]
/// and never change for the lifetime of that registry. Host surfaces use them
/// to decide which visuals may be recycled for which positions.
///
/// [`TypeRegistry`]: crate::TypeRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kind(usize);

impl Kind {
    /// Creates a kind from its raw index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index of this kind.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Kind> for usize {
    fn from(kind: Kind) -> Self {
        kind.0
    }
}

impl From<usize> for Kind {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A visual created by a renderer, tagged with the kind it was created for.
///
/// The host surface stores handles and rebinds them to any position whose
/// kind matches [`VisualHandle::kind`]. The adapter checks that on every
/// bind.
#[derive(Debug)]
pub struct VisualHandle<V> {
    kind: Kind,
    visual: V,
}

impl<V> VisualHandle<V> {
    pub(crate) fn new(kind: Kind, visual: V) -> Self {
        Self { kind, visual }
    }

    /// Returns the kind this visual was created for.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the host-side visual.
    #[inline]
    pub fn visual(&self) -> &V {
        &self.visual
    }

    /// Returns the host-side visual mutably.
    #[inline]
    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// Consumes the handle and returns the visual.
    pub fn into_visual(self) -> V {
        self.visual
    }
}
