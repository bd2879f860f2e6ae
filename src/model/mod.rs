use std::rc::{Rc};

/// Represents a name, e.g. the display name of a [`Tag`] or a key of a
/// [`Value::Map`].
///
/// [`Tag`]: crate::Tag
pub type Name = Rc<str>;

/// Represents a map from `Name` to `T`.
pub type Map<T> = std::collections::HashMap<Name, T>;

// ----------------------------------------------------------------------------

mod repr;
pub use repr::{Value, Function, Call};
