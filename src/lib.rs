//! Runtime-checked tagged unions for dynamically typed values.
//!
//! A [`Tag`] constructs opaque tagged values. A [`Union`] groups `Tag`s so
//! that values can be dispatched on with a [`Switch`], which is checked to
//! cover every member exactly once. A [`NamedUnion`] constructs its own
//! `Tag`s and looks them up by name.
//!
//! The free functions [`tag()`], [`union()`] and [`named_union()`] accept
//! [`Value`]s and validate them at run time, for callers that are themselves
//! dynamically typed.

pub mod model;
pub use model::{Name, Map, Value, Function, Call};

mod error;
pub use error::{Error, Result};

mod tag;
pub use tag::{Tag, Tagged};

mod switch;
pub use switch::{Switch};

mod union;
pub use union::{Union};

mod named;
pub use named::{NamedUnion, RESERVED};

// ----------------------------------------------------------------------------

/// Constructs a fresh [`Tag`]. `display_name` must be a string or
/// [`Value::None`].
pub fn tag(display_name: &Value) -> Result<Tag> { Tag::from_value(display_name) }

/// Constructs a [`Union`] of `tags`, each of which must be a [`Value::Tag`].
pub fn union(tags: &[Value]) -> Result<Union> { Union::from_values(tags) }

/// Constructs a [`NamedUnion`]. `names` must be an array of strings.
pub fn named_union(names: &Value) -> Result<NamedUnion> { NamedUnion::from_value(names) }

// ----------------------------------------------------------------------------
