//! Item classification
//!
//! Decides whether a listed item is a container to descend into, an
//! exportable secret, or something to skip.

/// Item type the secrets store uses for folders (exact-case)
pub const CONTAINER_MARKER: &str = "folder";

/// Secret kinds that are exported (compared case-insensitively)
pub const SECRET_KINDS: [&str; 6] = [
    "static-secret",
    "static_secret",
    "dynamic-secret",
    "dynamic_secret",
    "rotated-secret",
    "rotated_secret",
];

/// Classification of a listed item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Container,
    Secret,
    Unrecognized,
}

/// Classify an item by its declared type
pub fn classify(item_type: &str) -> ItemKind {
    if item_type == CONTAINER_MARKER {
        ItemKind::Container
    } else if SECRET_KINDS
        .iter()
        .any(|kind| kind.eq_ignore_ascii_case(item_type))
    {
        ItemKind::Secret
    } else {
        ItemKind::Unrecognized
    }
}
