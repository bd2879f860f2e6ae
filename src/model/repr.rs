use std::{fmt};
use std::rc::{Rc};

use super::{Map};
use crate::{Error, Result, Tag, Tagged, Union};

/// Something that can be invoked with positional arguments.
pub trait Call {
    fn call(&self, args: &[Value]) -> Result<Value>;
}

// ----------------------------------------------------------------------------

/// A shared, immutable callable, e.g. a match handler.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&[Value]) -> Result<Value>>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self { Self(Rc::new(f)) }

    /// Returns `true` if `self` and `other` are the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }
}

impl Call for Function {
    fn call(&self, args: &[Value]) -> Result<Value> { (self.0)(args) }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("<function>") }
}

// ----------------------------------------------------------------------------

/// A dynamically typed value.
///
/// Scalars and strings compare by value. Everything that has an identity
/// (`Tag`, `Tagged`, `Union`, `Function`) compares by identity.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value, e.g. an omitted display name.
    None,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),

    /// An ordered list of `Value`s, e.g. the elements of an array.
    Slice(Rc<[Value]>),

    /// A map from names to `Value`s, e.g. the fields of a plain object.
    Map(Rc<Map<Value>>),

    Function(Function),

    /// A [`Tag`] itself, as opposed to a value constructed by one.
    Tag(Tag),

    /// A value constructed by a [`Tag`].
    Tagged(Tagged),

    Union(Union),
}

impl Value {
    /// Wraps `f` as a [`Value::Function`].
    pub fn function(f: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self {
        Self::Function(Function::new(f))
    }

    /// Names the variant of `self`, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::Str(_) => "Str",
            Self::Slice(_) => "Slice",
            Self::Map(_) => "Map",
            Self::Function(_) => "Function",
            Self::Tag(_) => "Tag",
            Self::Tagged(_) => "Tagged",
            Self::Union(_) => "Union",
        }
    }

    pub fn str(&self) -> Option<&Rc<str>> {
        if let Self::Str(ret) = self { Some(ret) } else { None }
    }

    pub fn slice(&self) -> Option<&Rc<[Value]>> {
        if let Self::Slice(ret) = self { Some(ret) } else { None }
    }

    pub fn map(&self) -> Option<&Rc<Map<Value>>> {
        if let Self::Map(ret) = self { Some(ret) } else { None }
    }

    /// Returns `self` as a [`Function`], if [`Call::call()`] is defined for it.
    pub fn callable(&self) -> Option<Function> {
        match self {
            Self::Function(function) => Some(function.clone()),
            Self::Tag(_) | Self::Union(_) => {
                let callee = self.clone();
                Some(Function::new(move |args| callee.call(args)))
            },
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        if let Self::Tag(ret) = self { Some(ret) } else { None }
    }

    pub fn tagged(&self) -> Option<&Tagged> {
        if let Self::Tagged(ret) = self { Some(ret) } else { None }
    }

    pub fn is_none(&self) -> bool { matches!(self, Self::None) }
}

impl Call for Value {
    fn call(&self, args: &[Value]) -> Result<Value> {
        match self {
            Self::Function(function) => function.call(args),
            Self::Tag(tag) => tag.call(args),
            Self::Union(union) => union.call(args),
            other => Err(Error::Type(format!("{} is not callable", other.kind()))),
        }
    }
}

impl std::default::Default for Value {
    fn default() -> Self { Value::None }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Int(x), Self::Int(y)) => x == y,
            (Self::Float(x), Self::Float(y)) => x == y,
            (Self::Bool(x), Self::Bool(y)) => x == y,
            (Self::Str(x), Self::Str(y)) => x == y,
            (Self::Slice(x), Self::Slice(y)) => x == y,
            (Self::Map(x), Self::Map(y)) => x == y,
            (Self::Function(x), Self::Function(y)) => x.ptr_eq(y),
            (Self::Tag(x), Self::Tag(y)) => x == y,
            (Self::Tagged(x), Self::Tagged(y)) => x.ptr_eq(y),
            (Self::Union(x), Self::Union(y)) => x.ptr_eq(y),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Slice(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            },
            Self::Map(map) => {
                let mut keys: Vec<&super::Name> = map.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{}: {}", key, map[key])?;
                }
                f.write_str("}")
            },
            Self::Function(function) => write!(f, "{:?}", function),
            Self::Tag(tag) => write!(f, "{}", tag),
            Self::Tagged(tagged) => write!(f, "{}", tagged),
            Self::Union(union) => write!(f, "{}", union),
        }
    }
}

impl From<i64> for Value { fn from(v: i64) -> Self { Self::Int(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Self::Int(v.into()) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Self::Float(v) } }
impl From<bool> for Value { fn from(v: bool) -> Self { Self::Bool(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Self::Str(v.into()) } }
impl From<String> for Value { fn from(v: String) -> Self { Self::Str(v.into()) } }
impl From<Function> for Value { fn from(v: Function) -> Self { Self::Function(v) } }
impl From<Tag> for Value { fn from(v: Tag) -> Self { Self::Tag(v) } }
impl From<&Tag> for Value { fn from(v: &Tag) -> Self { Self::Tag(v.clone()) } }
impl From<Tagged> for Value { fn from(v: Tagged) -> Self { Self::Tagged(v) } }
impl From<Union> for Value { fn from(v: Union) -> Self { Self::Union(v) } }
impl From<Vec<Value>> for Value { fn from(v: Vec<Value>) -> Self { Self::Slice(v.into()) } }
impl From<Map<Value>> for Value { fn from(v: Map<Value>) -> Self { Self::Map(Rc::new(v)) } }

impl<const N: usize> From<[Value; N]> for Value {
    fn from(fields: [Value; N]) -> Self { Self::Slice(Rc::new(fields)) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_compare_by_value() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from("a"), Value::from(String::from("a")));
        assert_ne!(Value::from(3), Value::from(3.0));
        assert_ne!(Value::None, Value::from(false));
    }

    #[test]
    fn functions_compare_by_identity() {
        let f = Function::new(|_| Ok(Value::None));
        let g = Function::new(|_| Ok(Value::None));
        assert_eq!(Value::from(f.clone()), Value::from(f));
        assert_ne!(Value::from(g.clone()), Value::function(|_| Ok(Value::None)));
    }

    #[test]
    fn calling_a_non_callable_fails() {
        let err = Value::from(4).call(&[]).unwrap_err();
        assert!(matches!(err, Error::Type(_)));
        assert!(err.to_string().contains("Int is not callable"));
    }

    #[test]
    fn tags_and_unions_are_callable() {
        let foo = Tag::named("Foo");
        let as_function = Value::from(&foo).callable().unwrap();
        assert_eq!(as_function.call(&[1.into()]).unwrap().to_string(), "Foo(1)");
        assert!(Value::from(Union::new([]).unwrap()).callable().is_some());
        assert!(Value::from(4).callable().is_none());
        assert!(Value::None.callable().is_none());
    }

    #[test]
    fn display() {
        let list = Value::from([Value::from(1), Value::from("x"), Value::None]);
        assert_eq!(list.to_string(), r#"[1, "x", None]"#);
        let mut map = Map::new();
        map.insert("b".into(), Value::from(2));
        map.insert("a".into(), Value::from(true));
        assert_eq!(Value::from(map).to_string(), "{a: true, b: 2}");
    }
}
