//! Error types for the multi-type adapter.

use crate::kind::Kind;

/// Result type alias for registry and adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the registry, the resolver and the adapter.
///
/// Every variant describes either a setup mistake (a type that was never
/// registered, a matcher registered twice) or a host surface asking about
/// state it should not have cached. None of them are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A binding with an identical matcher is already registered.
    #[error("A binding for {matcher} is already registered")]
    DuplicateBinding { matcher: String },

    /// The kind does not belong to any registered binding.
    #[error("Unknown kind {kind}: registry holds {binding_count} binding(s)")]
    UnknownKind { kind: Kind, binding_count: usize },

    /// No registered binding accepts the item.
    #[error("No binding accepts items of type '{type_name}'{}", at_position(.position))]
    UnresolvedType {
        type_name: &'static str,
        position: Option<usize>,
    },

    /// The position is outside the current item sequence.
    #[error("Position {position} is out of range for {count} item(s)")]
    IndexOutOfRange { position: usize, count: usize },

    /// A visual created for one kind was bound to a position of another kind.
    #[error(
        "Visual created for kind {expected} cannot be bound at position {position} \
         which resolves to kind {actual}"
    )]
    VisualKindMismatch {
        expected: Kind,
        actual: Kind,
        position: usize,
    },

    /// A renderer received an item of a type it does not draw.
    #[error("Renderer for '{expected}' received a different item type at position {position}")]
    ItemTypeMismatch {
        expected: &'static str,
        position: usize,
    },
}

fn at_position(position: &Option<usize>) -> String {
    match position {
        Some(position) => format!(" at position {position}"),
        None => String::new(),
    }
}

impl Error {
    /// Create a duplicate binding error.
    pub fn duplicate_binding(matcher: impl Into<String>) -> Self {
        Self::DuplicateBinding {
            matcher: matcher.into(),
        }
    }

    /// Create an unresolved type error not yet tied to a position.
    pub fn unresolved(type_name: &'static str) -> Self {
        Self::UnresolvedType {
            type_name,
            position: None,
        }
    }

    /// Attach a position to an [`Error::UnresolvedType`].
    ///
    /// Other variants are returned unchanged.
    pub fn at(self, position: usize) -> Self {
        match self {
            Self::UnresolvedType { type_name, .. } => Self::UnresolvedType {
                type_name,
                position: Some(position),
            },
            other => other,
        }
    }
}
