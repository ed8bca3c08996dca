//! The four-state lifecycle shared by a [`Coroutine`][crate::Coroutine] and its body.

use_prelude!();

/// Observable lifecycle of a [`Coroutine`][crate::Coroutine].
///
/// Exactly one of these holds at any point:
///
/// ```text
///  NotStarted ──resume──▶ Running ──suspend──▶ Suspended
///                          ▲  │                    │
///                          │  └─return / error──▶ Completed
///                          └───────resume──────────┘
/// ```
#[derive(
    Debug,
    Clone, Copy,
    PartialEq, Eq,
    Hash,
)]
pub
enum CoroutineState {
    /// Created by the factory; the body has not been invoked yet.
    NotStarted,

    /// The body is parked at a `suspend` point, waiting for the next input.
    Suspended,

    /// The body is executing on behalf of a `resume` call.
    Running,

    /// The body returned, failed, or the coroutine was dropped.
    ///
    /// This state is terminal.
    Completed,
}

impl CoroutineState {
    /// Whether a `resume` call is legal from this state.
    #[inline]
    pub
    fn is_resumable (self: Self)
      -> bool
    {
        matches!(self, Self::NotStarted | Self::Suspended)
    }

    const
    fn to_u8 (self: Self)
      -> u8
    {
        match self {
            | Self::NotStarted => 0,
            | Self::Suspended => 1,
            | Self::Running => 2,
            | Self::Completed => 3,
        }
    }

    const
    fn from_u8 (repr: u8)
      -> Self
    {
        match repr {
            | 0 => Self::NotStarted,
            | 1 => Self::Suspended,
            | 2 => Self::Running,
            | _ => Self::Completed,
        }
    }
}

impl fmt::Display for CoroutineState {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f.write_str(match *self {
            | Self::NotStarted => "not started",
            | Self::Suspended => "suspended",
            | Self::Running => "running",
            | Self::Completed => "completed",
        })
    }
}

/// The atomic flag both sides of the handoff consult.
///
/// Only the caller side moves the state forward, except for the body
/// thread's unwinding guard, which may only ever store `Completed`.
pub(in crate)
struct StateCell(AtomicU8);

impl StateCell {
    pub(in crate)
    fn new (state: CoroutineState)
      -> Self
    {
        Self(AtomicU8::new(state.to_u8()))
    }

    #[inline]
    pub(in crate)
    fn load (self: &'_ Self)
      -> CoroutineState
    {
        CoroutineState::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub(in crate)
    fn store (self: &'_ Self, state: CoroutineState)
    {
        self.0.store(state.to_u8(), Ordering::Release);
    }

    /// Claims the coroutine for a `resume` call.
    ///
    /// On success the state is `Running` and the previous state is returned;
    /// otherwise nothing changes and the offending state is returned.
    pub(in crate)
    fn begin_resume (self: &'_ Self)
      -> Result<CoroutineState, CoroutineState>
    {
        let mut current = self.load();
        loop {
            if current.is_resumable().not() {
                return Err(current);
            }
            match self.0.compare_exchange_weak(
                current.to_u8(),
                CoroutineState::Running.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            {
                | Ok(_) => return Ok(current),
                | Err(actual) => current = CoroutineState::from_u8(actual),
            }
        }
    }
}

impl fmt::Debug for StateCell {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        fmt::Debug::fmt(&self.load(), f)
    }
}
