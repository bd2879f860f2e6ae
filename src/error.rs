//! Errors raised by tags, unions and switches.
//!
//! Every failure is a programming error on the caller's side, so nothing is
//! retried or recovered internally. Messages are written to be read by the
//! developer who made the mistake.

/// A failure raised by this crate, or by a handler invoked through it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed input to a factory, e.g. a display name that is not a string.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two [`Tag`]s conflict: the same `Tag` twice, two `Tag`s with the same
    /// display name, or a name that shadows a reserved property.
    ///
    /// [`Tag`]: crate::Tag
    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),

    /// An operation used against its contract, e.g. unwrapping a value with
    /// the wrong `Tag`, or a switch with missing or redundant cases.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A switch clause of the wrong kind, e.g. a handler that is not a
    /// function.
    #[error("type error: {0}")]
    Type(String),

    /// Raised by a user-supplied handler.
    #[error("{0}")]
    Handler(String),
}

/// A `T` or an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Constructs an [`Error::Handler`].
    pub fn handler(msg: impl Into<String>) -> Self { Self::Handler(msg.into()) }
}
