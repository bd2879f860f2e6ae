use super::model::{Value, Function, Call};
use super::{Error, Result, Tag};

/// A jump table from [`Tag`]s to handlers, with an optional catch-all.
///
/// A `Switch` says nothing about which [`Union`] it is used with. Use
/// [`Union::check()`] to validate it against one, and [`Union::run()`] to
/// dispatch a value through it.
///
/// [`Union`]: crate::Union
/// [`Union::check()`]: crate::Union::check
/// [`Union::run()`]: crate::Union::run
#[derive(Debug, Default, Clone)]
pub struct Switch {
    /// The cases, in the order they were listed.
    cases: Vec<(Tag, Function)>,

    /// The catch-all, called with no arguments if no case matches.
    otherwise: Option<Function>,
}

impl Switch {
    pub fn new() -> Self { Self::default() }

    /// Adds a case for `tag`. `handler` is called with the payload.
    pub fn case(mut self, tag: &Tag, handler: Function) -> Self {
        self.cases.push((tag.clone(), handler));
        self
    }

    /// Sets the catch-all.
    pub fn otherwise(mut self, handler: Function) -> Self {
        self.otherwise = Some(handler);
        self
    }

    /// Reads a clause list of the form `[tag0, handler0, tag1, handler1, ...]`,
    /// optionally followed by a catch-all handler.
    ///
    /// Checks that every `tagN` is a `Tag` and every handler is callable.
    /// Does not check for duplicates or coverage.
    pub fn parse(clauses: &[Value]) -> Result<Self> {
        let (pairs, last) = match clauses.len() % 2 {
            0 => (clauses, None),
            _ => (&clauses[..clauses.len() - 1], clauses.last()),
        };
        let mut ret = Self::new();
        for (i, pair) in pairs.chunks_exact(2).enumerate() {
            let tag = pair[0].tag().ok_or_else(|| Error::Type(format!(
                "Clause {}: type must be a Tag, got {}", i, pair[0].kind(),
            )))?;
            let handler = pair[1].callable().ok_or_else(|| Error::Type(format!(
                "Clause {}: handler for {} must be a function, got {}", i, tag, pair[1].kind(),
            )))?;
            ret = ret.case(tag, handler);
        }
        if let Some(last) = last {
            let handler = last.callable().ok_or_else(|| Error::Type(format!(
                "The catch-all must be a function, got {}", last.kind(),
            )))?;
            ret = ret.otherwise(handler);
        }
        Ok(ret)
    }

    /// The `Tag`s of the cases, in order, including duplicates.
    pub fn tags(&self) -> impl Iterator<Item=&Tag> { self.cases.iter().map(|(tag, _)| tag) }

    pub fn has_otherwise(&self) -> bool { self.otherwise.is_some() }

    /// Calls the handler for `value`'s `Tag`, or the catch-all.
    ///
    /// Does not check that `self` is exhaustive.
    pub(crate) fn dispatch(&self, value: &Value) -> Result<Value> {
        if let Some(tagged) = value.tagged() {
            if let Some((tag, handler)) = self.cases.iter().find(|(tag, _)| tag.owns(tagged)) {
                log::debug!("dispatching {} to the case for {}", value, tag);
                return handler.call(tagged.payload());
            }
        }
        match &self.otherwise {
            Some(handler) => {
                log::debug!("dispatching {} to the catch-all", value);
                handler.call(&[])
            },
            None => Err(Error::InvalidOperation(format!(
                "{} is not a member of this union", value,
            ))),
        }
    }
}

// ----------------------------------------------------------------------------
