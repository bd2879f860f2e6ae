use std::collections::{HashSet};
use std::{fmt};
use std::rc::{Rc};

use super::model::{Value, Call};
use super::{Error, Result, Switch, Tag};

/// A closed set of [`Tag`]s.
///
/// A `Union` is not itself a constructor: only its member `Tag`s construct
/// values. Cloning a `Union` yields the same `Union`.
#[derive(Clone)]
pub struct Union(Rc<[Tag]>);

impl Union {
    /// Constructs a `Union` of `tags`, which must not contain the same `Tag`
    /// twice, nor two `Tag`s with the same display name.
    pub fn new(tags: impl IntoIterator<Item=Tag>) -> Result<Self> {
        let tags: Rc<[Tag]> = tags.into_iter().collect();
        let mut seen = HashSet::new();
        for tag in tags.iter() {
            if !seen.insert(tag) {
                return Err(Error::DuplicateDefinition(format!("Duplicate Tag {} in union", tag)));
            }
        }
        let mut names = HashSet::new();
        for tag in tags.iter() {
            if let Some(name) = tag.name() {
                if !names.insert(name) {
                    return Err(Error::DuplicateDefinition(format!(
                        "Two Tags in the union have the display name {:?}", name,
                    )));
                }
            }
        }
        log::trace!("created union of {} tags", tags.len());
        Ok(Self(tags))
    }

    /// Constructs a `Union` of `tags`, each of which must be a [`Value::Tag`].
    ///
    /// Reports every element that is not a `Tag`, not just the first.
    pub fn from_values(tags: &[Value]) -> Result<Self> {
        let invalid: Vec<(usize, &Value)> = tags.iter().enumerate()
            .filter(|(_, value)| value.tag().is_none())
            .collect();
        if !invalid.is_empty() {
            let positions: Vec<String> = invalid.iter().map(|(i, _)| i.to_string()).collect();
            let kinds: Vec<&str> = invalid.iter().map(|(_, value)| value.kind()).collect();
            let plural = if invalid.len() > 1 { "s" } else { "" };
            return Err(Error::InvalidArgument(format!(
                "Invalid Tag at position{} {}: got {}", plural, positions.join(", "), kinds.join(", "),
            )));
        }
        Self::new(tags.iter().filter_map(|value| value.tag().cloned()))
    }

    /// The member `Tag`s, in the order they were given.
    pub fn tags(&self) -> &[Tag] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns `true` if `tag` is a member of `self`.
    pub fn contains(&self, tag: &Tag) -> bool { self.0.contains(tag) }

    /// Returns `true` if `value` was constructed by a member of `self`.
    ///
    /// Returns `false` for the member `Tag`s themselves.
    pub fn has(&self, value: &Value) -> bool {
        value.tagged().map_or(false, |tagged| self.contains(tagged.tag()))
    }

    /// Returns `true` if `self` and `other` are the same `Union`.
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }

    /// Checks that `switch` covers every member of `self` exactly once,
    /// using its catch-all to fill gaps.
    ///
    /// A catch-all that can never be reached is an error.
    pub fn check(&self, switch: &Switch) -> Result<()> {
        let mut covered = HashSet::new();
        for tag in switch.tags() {
            if !covered.insert(tag) {
                return Err(Error::InvalidOperation(format!(
                    "{} type can only be covered by one clause", tag,
                )));
            }
        }
        if let Some(stray) = switch.tags().find(|tag| !self.contains(tag)) {
            return Err(Error::InvalidOperation(format!("{} is not in this union", stray)));
        }
        let missing: Vec<String> = self.0.iter()
            .filter(|tag| !covered.contains(tag))
            .map(|tag| tag.to_string())
            .collect();
        match (missing.is_empty(), switch.has_otherwise()) {
            (false, false) => Err(Error::InvalidOperation(format!(
                "Not all cases are covered: missing {}", missing.join(", "),
            ))),
            (true, true) => Err(Error::InvalidOperation(
                "All cases are covered, so the catch-all is unreachable".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Checks `switch` against `self`, then dispatches `value` through it.
    pub fn run(&self, value: &Value, switch: &Switch) -> Result<Value> {
        self.check(switch)?;
        switch.dispatch(value)
    }

    /// Parses `clauses` as a [`Switch`], then [`run()`]s it.
    ///
    /// [`run()`]: Self::run
    #[doc(alias = "match")]
    pub fn switch(&self, value: &Value, clauses: &[Value]) -> Result<Value> {
        self.run(value, &Switch::parse(clauses)?)
    }
}

impl Call for Union {
    fn call(&self, _: &[Value]) -> Result<Value> {
        Err(Error::InvalidOperation(format!(
            "{} cannot be created directly; use one of its Tags", self,
        )))
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Union(")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 { f.write_str(" | ")?; }
            write!(f, "{}", tag)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Union {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Union").field(&self.0).finish()
    }
}

// ----------------------------------------------------------------------------
