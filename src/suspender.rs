//! The body's side of the handoff.

use_prelude!();

/// Handle through which a coroutine body talks to its driver.
///
/// A body receives `&Suspender` when it is first resumed. It can:
///
///   - [`.suspend()`][`Suspender::suspend`] to hand a value out and park until
///     the next [`Coroutine::resume`][crate::Coroutine::resume];
///
///   - [`.input()`][`Suspender::input`] to read the input the current
///     resumption was triggered with, be it the very first one (which no
///     `suspend` call returned) or the one the latest `suspend` returned.
///
/// The handle is neither `Send` nor `Sync`: it stays on the body's thread.
pub
struct Suspender<Input, Output> {
    state: Arc<StateCell>,
    pending_input: RefCell<Option<Input>>,
    inputs: Receiver<Input>,
    pub(in crate)
    outputs: Sender<Handoff<Output>>,
}

/// What the body thread hands back to the caller.
pub(in crate)
enum Handoff<Output> {
    Suspended(Output),
    Returned(Output),
    Failed(BoxError),
}

impl<Input, Output> Suspender<Input, Output> {
    pub(in crate)
    fn new (
        state: Arc<StateCell>,
        first_input: Input,
        inputs: Receiver<Input>,
        outputs: Sender<Handoff<Output>>,
    ) -> Self
    {
        Self {
            state,
            pending_input: RefCell::new(Some(first_input)),
            inputs,
            outputs,
        }
    }

    /// Hands `value` to the pending [`Coroutine::resume`][crate::Coroutine::resume] call and parks the
    /// body until the next one, whose input is returned.
    ///
    /// The new input also becomes the one [`.input()`][`Suspender::input`]
    /// exposes, hence the `Clone` bound. A `Ref` obtained from `.input()`
    /// must not be held across this call.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] when the coroutine is not `Running`, which is
    /// what a body observes once its [`Coroutine`][crate::Coroutine] has been dropped. A body
    /// is expected to propagate this error (with `?`) rather than to carry on.
    pub
    fn suspend (self: &'_ Self, value: Output)
      -> Result<Input, Error>
    where
        Input : Clone,
    {
        let state = self.state.load();
        if state != CoroutineState::Running {
            return Err(Error::invalid_state(Operation::Suspend, state));
        }
        trace!("suspend: handing a value to the caller");
        if self.outputs.send(Handoff::Suspended(value)).is_err() {
            return Err(self.abandoned());
        }
        match self.inputs.recv() {
            | Ok(input) => {
                trace!("suspend: resumed");
                self.pending_input.replace(Some(input.clone()));
                Ok(input)
            },
            | Err(_) => Err(self.abandoned()),
        }
    }

    /// The input sent by the most recent [`Coroutine::resume`][crate::Coroutine::resume], unless it has
    /// been moved out through [`.take_input()`][`Suspender::take_input`].
    pub
    fn input (self: &'_ Self)
      -> Option<Ref<'_, Input>>
    {
        Ref::filter_map(self.pending_input.borrow(), Option::as_ref).ok()
    }

    /// Moves the input of the current resumption out, if still there.
    ///
    /// [`.input()`][`Suspender::input`] returns `None` from then on, until the
    /// next resumption.
    pub
    fn take_input (self: &'_ Self)
      -> Option<Input>
    {
        self.pending_input.borrow_mut().take()
    }

    /// The state of the coroutine, as seen from the body.
    ///
    /// This is `Running` for as long as the body is legitimately executing.
    #[inline]
    pub
    fn state (self: &'_ Self)
      -> CoroutineState
    {
        self.state.load()
    }

    fn abandoned (self: &'_ Self)
      -> Error
    {
        debug!("suspend: the coroutine was dropped while suspended");
        self.state.store(CoroutineState::Completed);
        Error::invalid_state(Operation::Suspend, CoroutineState::Completed)
    }
}

impl<Input, Output> fmt::Debug for Suspender<Input, Output> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f   .debug_struct("Suspender")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
