//! Error types.

use_prelude!();

/// Type-erased error a coroutine body may fail with.
pub
type BoxError = Box<dyn ::std::error::Error + Send + Sync + 'static>;

/// `Result` alias with this crate's [`enum@Error`].
pub
type Result<T, E = Error> = ::core::result::Result<T, E>;

/// The protocol operation that was attempted in an illegal state.
#[derive(
    Debug,
    Clone, Copy,
    PartialEq, Eq,
    Hash,
)]
pub
enum Operation {
    /// [`Coroutine::resume`][crate::Coroutine::resume], called by the driving code.
    Resume,

    /// [`Suspender::suspend`], called by the body.
    Suspend,
}

impl fmt::Display for Operation {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f.write_str(match *self {
            | Self::Resume => "resume",
            | Self::Suspend => "suspend",
        })
    }
}

/// Everything that can go wrong while driving a [`Coroutine`][crate::Coroutine].
#[derive(Debug, ::thiserror::Error)]
pub
enum Error {
    /// The resume/suspend protocol was misused: resuming a coroutine that is
    /// running or completed, or suspending outside of an active resumption.
    #[error("cannot {operation} a {state} coroutine")]
    InvalidState {
        /// What was attempted.
        operation: Operation,
        /// The state the coroutine was observed in.
        state: CoroutineState,
    },

    /// The body returned an error. The coroutine is now completed.
    #[error("coroutine body failed: {0}")]
    Body(#[source] BoxError),
}

impl Error {
    pub(in crate)
    fn invalid_state (operation: Operation, state: CoroutineState)
      -> Self
    {
        Self::InvalidState { operation, state }
    }

    /// Unwraps a body failure that already is one of ours (_e.g._, a
    /// `suspend` misuse propagated with `?`), and wraps anything else.
    pub(in crate)
    fn from_body (err: BoxError)
      -> Self
    {
        match err.downcast::<Self>() {
            | Ok(err) => *err,
            | Err(err) => Self::Body(err),
        }
    }

    /// Whether this is an [`Error::InvalidState`].
    pub
    fn is_invalid_state (self: &'_ Self)
      -> bool
    {
        matches!(self, Self::InvalidState { .. })
    }
}
