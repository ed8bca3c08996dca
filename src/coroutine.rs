//! The caller's side of the handoff: [`Coroutine`], [`create`] and
//! [`Builder`].

use_prelude!();

use crate::suspender::Handoff;

/// Thread name used when the [`Builder`] is not given one.
pub
const DEFAULT_NAME: &str = "coroutine";

/// Creates a coroutine out of `body`, without running any of it.
///
/// The body is invoked by the first [`.resume()`][`Coroutine::resume`] call,
/// on a dedicated thread, and is handed a [`Suspender`] through which it
/// yields values and receives inputs. Its return value is delivered by the
/// last `resume` call.
///
/// # Example
///
/// ```rust
/// use ::handoff_coroutine::{create, BoxError, CoroutineState, Suspender};
///
/// let co = create(|co: &Suspender<i32, i32>| -> Result<i32, BoxError> {
///     let mut value = co.take_input().unwrap_or_default();
///     while value > 0 {
///         value = co.suspend(value - 2)?;
///     }
///     Ok(0)
/// });
///
/// assert_eq!(co.resume(6)?, 4);
/// assert_eq!(co.resume(4)?, 2);
/// assert_eq!(co.resume(2)?, 0);
/// assert_eq!(co.state(), CoroutineState::Suspended);
/// assert_eq!(co.resume(0)?, 0);
/// assert!(co.is_completed());
/// # Ok::<(), ::handoff_coroutine::Error>(())
/// ```
///
/// # Panics
///
/// If the OS fails to spawn the body's thread; see [`Builder::spawn`] for the
/// fallible version.
pub
fn create<Input, Output, E, F> (body: F)
  -> Coroutine<Input, Output>
where
    Input : Send + 'static,
    Output : Send + 'static,
    E : Into<BoxError>,
    F : FnOnce(&Suspender<Input, Output>) -> Result<Output, E>,
    F : Send + 'static,
{
    Builder::new()
        .spawn(body)
        .unwrap_or_else(|err| panic!("failed to spawn a coroutine thread: {err}"))
}

/// Configures the thread a coroutine body runs on.
///
/// ```rust
/// use ::handoff_coroutine::{Builder, BoxError, Suspender};
///
/// let co = Builder::new()
///     .name("echo")
///     .stack_size(64 * 1024)
///     .spawn(|co: &Suspender<String, String>| -> Result<_, BoxError> {
///         let greeting = co.take_input().unwrap_or_default();
///         let reply = co.suspend(format!("{greeting}!"))?;
///         Ok(reply)
///     })?;
///
/// assert_eq!(co.name(), "echo");
/// assert_eq!(co.resume("hello".into())?, "hello!");
/// assert_eq!(co.resume("bye".into())?, "bye");
/// # Ok::<(), Box<dyn ::std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub
struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl Builder {
    /// A builder with the default thread name and stack size.
    pub
    fn new ()
      -> Self
    {
        Self::default()
    }

    /// Names the body's thread (and the coroutine, in logs).
    pub
    fn name (self: Self, name: impl Into<String>)
      -> Self
    {
        Self { name: Some(name.into()), ..self }
    }

    /// Sets the stack size of the body's thread, in bytes.
    pub
    fn stack_size (self: Self, size: usize)
      -> Self
    {
        Self { stack_size: Some(size), ..self }
    }

    /// Creates the coroutine, spawning the (parked) thread its body will run
    /// on.
    ///
    /// # Errors
    ///
    /// When the OS refuses to spawn the thread.
    pub
    fn spawn<Input, Output, E, F> (self: Self, body: F)
      -> io::Result<Coroutine<Input, Output>>
    where
        Input : Send + 'static,
        Output : Send + 'static,
        E : Into<BoxError>,
        F : FnOnce(&Suspender<Input, Output>) -> Result<Output, E>,
        F : Send + 'static,
    {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_owned());
        let state = Arc::new(StateCell::new(CoroutineState::NotStarted));
        let (input_tx, input_rx) = mpsc::channel();
        let (output_tx, output_rx) = mpsc::channel();

        let mut builder = thread::Builder::new().name(name.clone());
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        let handle = {
            let state = Arc::clone(&state);
            builder.spawn(move || run_body(state, input_rx, output_tx, body))?
        };
        debug!("{name}: created");

        Ok(Coroutine {
            name,
            state,
            channel: Mutex::new(Channel {
                inputs: input_tx,
                outputs: output_rx,
            }),
            thread: Mutex::new(Some(handle)),
        })
    }
}

/// A suspendable computation, resumed with `Input`s and producing `Output`s.
///
/// See [`create`] for how to make one, and [`.resume()`][`Coroutine::resume`]
/// for how to drive it.
///
/// `resume` takes `&self`: a `Coroutine` may be shared (it is `Sync` whenever
/// `Input` and `Output` are `Send`), and overlapping `resume` calls, be they
/// concurrent or reentrant (from within the body itself), are rejected with
/// [`Error::InvalidState`] rather than serialized.
///
/// Dropping a coroutine completes it: a body parked in
/// [`.suspend()`][`Suspender::suspend`] gets an [`Error::InvalidState`] back,
/// and a body that never started is never invoked. The body's thread is then
/// left to wind down on its own.
pub
struct Coroutine<Input, Output> {
    name: String,
    state: Arc<StateCell>,
    channel: Mutex<Channel<Input, Output>>,
    thread: Mutex<Option<thread::JoinHandle<()>>>,
}

struct Channel<Input, Output> {
    inputs: Sender<Input>,
    outputs: Receiver<Handoff<Output>>,
}

impl<Input, Output> Coroutine<Input, Output> {
    /// Sends `input` into the body and runs it until its next suspension
    /// point, returning the value it suspended with, or until it returns,
    /// returning its final value.
    ///
    /// Both cases yield an `Output`; tell them apart through
    /// [`.is_completed()`][`Coroutine::is_completed`], or use
    /// [`.resume_state()`][`Coroutine::resume_state`] instead.
    ///
    /// # Errors
    ///
    ///   - [`Error::InvalidState`] if the coroutine is `Running` or
    ///     `Completed`; nothing happens then.
    ///
    ///   - [`Error::Body`] if the body failed; the coroutine is now
    ///     `Completed`.
    ///
    /// # Panics
    ///
    /// If the body panics: the panic is forwarded to the caller, and the
    /// coroutine is `Completed`.
    pub
    fn resume (self: &'_ Self, input: Input)
      -> Result<Output, Error>
    {
        self.resume_state(input)
            .map(GeneratorState::into_inner)
    }

    /// Same as [`.resume()`][`Coroutine::resume`], but tags the output with
    /// whether the body suspended or returned.
    pub
    fn resume_state (self: &'_ Self, input: Input)
      -> Result<GeneratorState<Output, Output>, Error>
    {
        let previous =
            self.state
                .begin_resume()
                .map_err(|state| {
                    debug!("{}: refusing to resume a {state} coroutine", self.name);
                    Error::invalid_state(Operation::Resume, state)
                })?
        ;
        trace!("{}: resume from {previous}", self.name);

        let channel = lock!(self.channel);
        let handoff =
            channel.inputs
                .send(input)
                .ok()
                .and_then(|()| channel.outputs.recv().ok())
        ;
        drop(channel);

        match handoff {
            | Some(Handoff::Suspended(value)) => {
                trace!("{}: suspended", self.name);
                self.state.store(CoroutineState::Suspended);
                Ok(GeneratorState::Yielded(value))
            },
            | Some(Handoff::Returned(value)) => {
                self.complete("returned");
                Ok(GeneratorState::Returned(value))
            },
            | Some(Handoff::Failed(err)) => {
                self.complete("failed");
                Err(Error::from_body(err))
            },
            | None => {
                self.complete("panicked");
                self.forward_panic()
            },
        }
    }

    /// Current lifecycle state. Pure observation.
    #[inline]
    pub
    fn state (self: &'_ Self)
      -> CoroutineState
    {
        self.state.load()
    }

    /// Whether the body has finished (or failed): no further `resume` will
    /// succeed.
    #[inline]
    pub
    fn is_completed (self: &'_ Self)
      -> bool
    {
        self.state() == CoroutineState::Completed
    }

    /// The name given through [`Builder::name`], or [`DEFAULT_NAME`].
    pub
    fn name (self: &'_ Self)
      -> &'_ str
    {
        &self.name
    }

    fn complete (self: &'_ Self, how: &'_ str)
    {
        debug!("{}: {how}", self.name);
        self.state.store(CoroutineState::Completed);
    }

    /// The body's thread hung up without a handoff: it unwound.
    fn forward_panic<T> (self: &'_ Self)
      -> Result<T, Error>
    {
        let handle = lock!(self.thread).take();
        if let Some(Err(payload)) = handle.map(thread::JoinHandle::join) {
            ::std::panic::resume_unwind(payload);
        }
        Err(Error::invalid_state(Operation::Resume, CoroutineState::Completed))
    }
}

impl<Input, Output> Drop for Coroutine<Input, Output> {
    fn drop (self: &'_ mut Self)
    {
        let state = self.state.load();
        if state != CoroutineState::Completed {
            debug!("{}: dropped while {state}", self.name);
            self.state.store(CoroutineState::Completed);
        }
        // The `Channel` is dropped right after this, unparking the body.
    }
}

impl<Input, Output> fmt::Debug for Coroutine<Input, Output> {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        f   .debug_struct("Coroutine")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<Input, Output> Generator<Input> for Coroutine<Input, Output> {
    type Yield = Output;

    type Return = Result<Output, Error>;

    fn resume (
        self: Pin<&'_ mut Self>,
        input: Input,
    ) -> GeneratorState<Output, Result<Output, Error>>
    {
        match self.resume_state(input) {
            | Ok(GeneratorState::Yielded(value)) => GeneratorState::Yielded(value),
            | Ok(GeneratorState::Returned(value)) => GeneratorState::Returned(Ok(value)),
            | Err(err) => GeneratorState::Returned(Err(err)),
        }
    }
}

impl<Output> IntoIterator for Coroutine<(), Output> {
    type Item = Output;
    type IntoIter = crate::iter::Iter<Self>;

    #[inline]
    fn into_iter (self: Self)
      -> Self::IntoIter
    {
        crate::iter::Iter::new(self)
    }
}

/// Entry point of the body's thread.
fn run_body<Input, Output, E, F> (
    state: Arc<StateCell>,
    inputs: Receiver<Input>,
    outputs: Sender<Handoff<Output>>,
    body: F,
)
where
    E : Into<BoxError>,
    F : FnOnce(&Suspender<Input, Output>) -> Result<Output, E>,
{
    let first_input = match inputs.recv() {
        | Ok(input) => input,
        | Err(_) => {
            debug!("dropped before the first resume; the body never runs");
            return;
        },
    };
    let suspender = Suspender::new(Arc::clone(&state), first_input, inputs, outputs);
    let outcome =
        ::unwind_safe::with_state(&*state)
            .try_eval(|_| body(&suspender))
            .finally(|state| state.store(CoroutineState::Completed))
    ;
    let handoff = match outcome {
        | Ok(value) => Handoff::Returned(value),
        | Err(err) => Handoff::Failed(err.into()),
    };
    if suspender.outputs.send(handoff).is_err() {
        debug!("dropped before collecting the body's result");
    }
}
