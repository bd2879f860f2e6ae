use std::ops::{Deref, Index};

use super::model::{Map, Name, Value};
use super::{Error, Result, Switch, Tag, Union};

/// Names that a [`NamedUnion`] member may not have, because they would shadow
/// a property of the union itself.
pub const RESERVED: [&str; 13] = [
    // The union's own properties.
    "has",
    "match",
    "namedMatch",
    // Properties every host function object has.
    "name",
    "length",
    "prototype",
    "constructor",
    "call",
    "apply",
    "bind",
    "toString",
    "arguments",
    "caller",
];

/// A [`Union`] of freshly constructed [`Tag`]s, looked up by name.
///
/// Each name is both the display name of its `Tag` and the key under which
/// the `Tag` is found.
#[derive(Debug, Clone)]
pub struct NamedUnion {
    union: Union,
    members: Map<Tag>,
}

impl NamedUnion {
    /// Constructs a `Tag` for each of `names` and a `Union` of them.
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item=S>) -> Result<Self> {
        let names: Vec<Name> = names.into_iter().map(|name| Name::from(name.as_ref())).collect();
        if let Some(name) = names.iter().find(|name| RESERVED.iter().any(|r| **r == ***name)) {
            return Err(Error::DuplicateDefinition(format!(
                "The name {:?} is reserved by the union", name,
            )));
        }
        let union = Union::new(names.iter().map(|name| Tag::named(name.clone())))?;
        let members = union.tags().iter()
            .filter_map(|tag| Some((tag.name()?.clone(), tag.clone())))
            .collect();
        Ok(Self {union, members})
    }

    /// Constructs a `NamedUnion` from `names`, which must be a
    /// [`Value::Slice`] of [`Value::Str`]s.
    pub fn from_value(names: &Value) -> Result<Self> {
        let names = names.slice().ok_or_else(|| Error::InvalidArgument(format!(
            "The names of a union must be an array, got {}", names.kind(),
        )))?;
        let mut strs = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let name = name.str().ok_or_else(|| Error::InvalidArgument(format!(
                "Name {} must be a string, got {}", i, name.kind(),
            )))?;
            strs.push(name.clone());
        }
        Self::new(strs)
    }

    /// The underlying `Union`.
    pub fn union(&self) -> &Union { &self.union }

    /// The member `Tag` called `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Tag> { self.members.get(name) }

    /// The member names, in the order they were given.
    pub fn names(&self) -> impl Iterator<Item=&Name> {
        self.union.tags().iter().filter_map(|tag| tag.name())
    }

    /// Like [`Union::switch()`] but the handlers are given as a
    /// [`Value::Map`] from member names to handlers.
    ///
    /// `otherwise`, if present and not [`Value::None`], is the catch-all.
    #[doc(alias = "namedMatch")]
    pub fn named_switch(
        &self,
        value: &Value,
        handlers: &Value,
        otherwise: Option<&Value>,
    ) -> Result<Value> {
        let handlers = handlers.map().ok_or_else(|| Error::Type(format!(
            "The handlers must be a map, got {}", handlers.kind(),
        )))?;
        let mut entries: Vec<(&Name, &Value)> = handlers.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut functions = Map::new();
        for (name, handler) in entries.iter().copied() {
            let function = handler.callable().ok_or_else(|| Error::Type(format!(
                "The handler for {} must be a function, got {}", name, handler.kind(),
            )))?;
            functions.insert(name.clone(), function);
        }
        let otherwise = match otherwise.filter(|v| !v.is_none()) {
            Some(v) => Some(v.callable().ok_or_else(|| Error::Type(format!(
                "The catch-all must be a function, got {}", v.kind(),
            )))?),
            None => None,
        };
        if let Some((stray, _)) = entries.iter().find(|(name, _)| !self.members.contains_key(*name)) {
            return Err(Error::InvalidOperation(format!("{} is not in this union", stray)));
        }
        let mut switch = Switch::new();
        for tag in self.union.tags() {
            if let Some(function) = tag.name().and_then(|name| functions.remove(name)) {
                switch = switch.case(tag, function);
            }
        }
        if let Some(function) = otherwise {
            switch = switch.otherwise(function);
        }
        self.union.run(value, &switch)
    }
}

impl Deref for NamedUnion {
    type Target = Union;

    fn deref(&self) -> &Union { &self.union }
}

impl Index<&str> for NamedUnion {
    type Output = Tag;

    fn index(&self, name: &str) -> &Tag {
        match self.get(name) {
            Some(tag) => tag,
            None => panic!("{} has no member {:?}", self.union, name),
        }
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn handlers(entries: &[(&str, Value)]) -> Value {
        let map: Map<Value> = entries.iter().map(|(k, v)| (Name::from(*k), v.clone())).collect();
        map.into()
    }

    #[test]
    fn members_are_named_tags() {
        let msg = NamedUnion::new(["Foo", "Bar"]).unwrap();
        assert_ne!(msg["Foo"], msg["Bar"]);
        assert_eq!(msg["Foo"].name().map(|n| &**n), Some("Foo"));
        assert!(msg.has(&msg["Bar"].wrap([2])));
        assert_eq!(msg.names().map(|n| &**n).collect::<Vec<_>>(), ["Foo", "Bar"]);
        assert!(msg.get("Baz").is_none());
    }

    #[test]
    fn reserved_names() {
        for name in ["has", "match", "namedMatch", "toString"] {
            let err = NamedUnion::new([name]).unwrap_err();
            assert!(matches!(err, Error::DuplicateDefinition(_)));
            assert!(err.to_string().contains("reserved"));
        }
    }

    #[test]
    fn handler_kinds_are_checked_before_membership() {
        let msg = NamedUnion::new(["Foo", "Bar"]).unwrap();
        let one = Value::function(|_| Ok(1.into()));
        let foo = msg["Foo"].wrap([0; 0]);
        let mixed = handlers(&[("Foo", 4.into()), ("Baz", one.clone())]);
        let err = msg.named_switch(&foo, &mixed, Some(&4.into())).unwrap_err();
        assert!(matches!(err, Error::Type(_)), "{:?}", err);
        assert!(err.to_string().contains("handler for Foo must be a function"));

        let stray = handlers(&[("Baz", one.clone())]);
        let err = msg.named_switch(&foo, &stray, Some(&4.into())).unwrap_err();
        assert!(err.to_string().contains("catch-all must be a function"));
    }

    #[test]
    fn repeated_names() {
        let err = NamedUnion::new(["Foo", "Foo"]).unwrap_err();
        assert!(err.to_string().contains("display name"));
    }

    #[test]
    fn from_value() {
        let err = NamedUnion::from_value(&handlers(&[("hello", "world".into())])).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
        let names = Value::from([Value::from("Hello"), 2.into(), "World".into()]);
        let err = NamedUnion::from_value(&names).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn named_switch() {
        let msg = NamedUnion::new(["Foo", "Bar"]).unwrap();
        let cases = handlers(&[
            ("Foo", Value::function(|args| Ok(args[0].clone()))),
            ("Bar", Value::function(|_| Ok(0.into()))),
        ]);
        assert_eq!(msg.named_switch(&msg["Foo"].wrap([8]), &cases, None), Ok(Value::Int(8)));

        let six = Value::function(|_| Ok(6.into()));
        assert_eq!(msg.named_switch(&msg["Foo"].wrap([7]), &handlers(&[]), Some(&six)), Ok(Value::Int(6)));
    }

    #[test]
    fn named_switch_checks() {
        let msg = NamedUnion::new(["Foo", "Bar"]).unwrap();
        let one = Value::function(|_| Ok(1.into()));
        let foo = msg["Foo"].wrap([0; 0]);

        let err = msg.named_switch(&foo, &handlers(&[("Foo", one.clone())]), None).unwrap_err();
        assert!(err.to_string().contains("Not all cases are covered: missing Bar"));

        let both = handlers(&[("Foo", one.clone()), ("Bar", one.clone())]);
        let err = msg.named_switch(&foo, &both, Some(&one)).unwrap_err();
        assert!(err.to_string().contains("All cases are covered"));

        let stray = handlers(&[("Foo", one.clone()), ("Baz", one.clone())]);
        let err = msg.named_switch(&foo, &stray, Some(&one)).unwrap_err();
        assert!(err.to_string().contains("Baz is not in this union"));

        let tagged = handlers(&[("Foo", (&msg["Bar"]).into()), ("Bar", one.clone())]);
        assert_eq!(msg.named_switch(&msg["Foo"].wrap([5]), &tagged, None).unwrap().to_string(), "Bar(5)");

        let bad = handlers(&[("Foo", 4.into())]);
        let err = msg.named_switch(&foo, &bad, Some(&one)).unwrap_err();
        assert!(err.to_string().contains("must be a function"));
    }
}
