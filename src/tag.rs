use std::{fmt};
use std::hash::{Hash, Hasher};
use std::rc::{Rc};
use std::sync::atomic::{AtomicU64, Ordering};

use super::model::{Name, Value, Call};
use super::{Error, Result};

/// Source of [`Tag::id()`]s.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

struct Header {
    id: u64,
    name: Option<Name>,
}

/// Represents a constructor of tagged values.
///
/// Every `Tag` is distinct from every other `Tag`, even if they have the same
/// display name. Cloning a `Tag` yields the same `Tag`.
#[derive(Clone)]
pub struct Tag(Rc<Header>);

impl Tag {
    /// Constructs a fresh `Tag` with no display name.
    pub fn new() -> Self { Self::with_name(None) }

    /// Constructs a fresh `Tag` with display name `name`.
    pub fn named(name: impl Into<Name>) -> Self { Self::with_name(Some(name.into())) }

    fn with_name(name: Option<Name>) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        log::trace!("created tag #{} ({:?})", id, name);
        Self(Rc::new(Header {id, name}))
    }

    /// Constructs a `Tag` whose display name is `name`, which must be a
    /// [`Value::Str`] or [`Value::None`].
    pub fn from_value(name: &Value) -> Result<Self> {
        match name {
            Value::None => Ok(Self::new()),
            Value::Str(s) => Ok(Self::named(s.clone())),
            other => Err(Error::InvalidArgument(format!(
                "Tag display name must be a string, got {}", other.kind(),
            ))),
        }
    }

    /// A number that is unique to this `Tag` within the process.
    pub fn id(&self) -> u64 { self.0.id }

    /// The display name, if any. Only used in diagnostics.
    pub fn name(&self) -> Option<&Name> { self.0.name.as_ref() }

    /// Constructs a tagged value owned by `self` with payload `args`.
    pub fn wrap<V: Into<Value>>(&self, args: impl IntoIterator<Item=V>) -> Value {
        Value::Tagged(Tagged(Rc::new(Body {
            tag: self.clone(),
            payload: args.into_iter().map(Into::into).collect(),
        })))
    }

    /// Returns `true` if `tagged` was constructed by `self`.
    pub fn owns(&self, tagged: &Tagged) -> bool { tagged.tag() == self }

    /// Returns `true` if `value` is a tagged value constructed by `self`.
    ///
    /// In particular, a `Tag` is not an instance of itself.
    pub fn is(&self, value: &Value) -> bool {
        value.tagged().map_or(false, |tagged| self.owns(tagged))
    }

    /// Passes the payload of `value` to `f`, provided `value` was
    /// constructed by `self`.
    pub fn unwrap<R>(&self, value: &Value, f: impl FnOnce(&[Value]) -> R) -> Result<R> {
        match value.tagged() {
            Some(tagged) if self.owns(tagged) => Ok(f(tagged.payload())),
            _ => Err(Error::InvalidOperation(format!("Cannot unwrap {} as {}", value, self))),
        }
    }
}

impl Default for Tag {
    fn default() -> Self { Self::new() }
}

impl Call for Tag {
    fn call(&self, args: &[Value]) -> Result<Value> { Ok(self.wrap(args.iter().cloned())) }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.id.hash(state) }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0.name {
            Some(name) => f.write_str(name),
            None => write!(f, "Tag#{}", self.0.id),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({}#{})", self.0.name.as_deref().unwrap_or("_"), self.0.id)
    }
}

// ----------------------------------------------------------------------------

struct Body {
    tag: Tag,
    payload: Box<[Value]>,
}

/// An immutable value constructed by a [`Tag`], with a positional payload.
#[derive(Clone)]
pub struct Tagged(Rc<Body>);

impl Tagged {
    /// The `Tag` that constructed `self`.
    pub fn tag(&self) -> &Tag { &self.0.tag }

    pub fn payload(&self) -> &[Value] { &self.0.payload }

    /// Returns `true` if `self` and `other` are the same tagged value.
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl fmt::Display for Tagged {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.0.tag)?;
        for (i, value) in self.0.payload.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "{}", value)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Tagged {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Tagged").field(&self.0.tag).field(&self.0.payload).finish()
    }
}

// ----------------------------------------------------------------------------
