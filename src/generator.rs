//! `stable` mirror of <https://doc.rust-lang.org/nightly/core/ops/trait.Coroutine.html>,
//! so that [`Coroutine`][crate::Coroutine]s compose with generator-driving code.

use_prelude!();

/// Anything that can be resumed with a `ResumeArg` until it returns.
///
/// Implemented by [`Coroutine`][crate::Coroutine], with:
///
///   - `Yield = Output`,
///
///   - `Return = Result<Output, Error>`: body failures, as well as attempts to
///     resume a finished coroutine, surface as `Returned(Err(..))`.
///
/// # Example
///
/// ```rust
/// use ::handoff_coroutine::{prelude::*, BoxError};
///
/// let mut co = create(|co: &Suspender<(), &'static str>| -> Result<_, BoxError> {
///     co.suspend("ping")?;
///     Ok("done")
/// });
///
/// match co.resume_unpin(()) {
///     | GeneratorState::Yielded(yielded) => assert_eq!(yielded, "ping"),
///     | GeneratorState::Returned(_) => panic!("unexpected return from resume"),
/// }
/// match co.resume_unpin(()) {
///     | GeneratorState::Yielded(_) => panic!("unexpected yield from resume"),
///     | GeneratorState::Returned(returned) => assert_eq!(returned?, "done"),
/// }
/// # Ok::<(), ::handoff_coroutine::Error>(())
/// ```
#[cfg_attr(feature = "better-docs", doc(notable_trait))]
pub
trait Generator<ResumeArg = ()> {
    /// The type of value this generator yields at each suspension point.
    type Yield;

    /// The type of value this generator completes with.
    type Return;

    /// Resumes the execution of this generator.
    ///
    /// Execution starts, or continues from the latest suspension point, until
    /// it either yields or returns.
    ///
    /// Resuming a generator that already returned is a logic error; a
    /// [`Coroutine`][crate::Coroutine] answers it with `Returned(Err(`[`Error::InvalidState`]`))`.
    fn resume (
        self: Pin<&'_ mut Self>,
        resume_arg: ResumeArg,
    ) -> GeneratorState<Self::Yield, Self::Return>
    ;
}

/// Value obtained when resuming a [`Generator`].
#[derive(
    Debug,
    Clone, Copy,
    PartialOrd, Ord,
    PartialEq, Eq,
    Hash
)]
pub
enum GeneratorState<Yield, Return = ()> {
    /// The generator suspended with a value.
    Yielded(Yield),

    /// The generator completed with a value. It must not be resumed again.
    Returned(Return),
}

impl<T> GeneratorState<T, T> {
    /// Forgets whether the value was yielded or returned.
    #[inline]
    pub
    fn into_inner (self: Self)
      -> T
    {
        match self {
            | Self::Yielded(it) | Self::Returned(it) => it,
        }
    }
}

impl<Yield, Return> GeneratorState<Yield, Return> {
    /// Whether this is a [`GeneratorState::Returned`].
    #[inline]
    pub
    fn is_returned (self: &'_ Self)
      -> bool
    {
        matches!(self, Self::Returned(_))
    }
}

// # TRANSITIVE IMPLS
impl<ResumeArg, G : ?Sized>
    Generator<ResumeArg>
for
    Pin<&'_ mut G>
where
    G : Generator<ResumeArg>,
{
    transitive_impl_deferring_to!(|self| (*self).as_mut());
}

impl<ResumeArg, G : ?Sized>
    Generator<ResumeArg>
for
    Pin<Box<G>>
where
    G : Generator<ResumeArg>,
{
    transitive_impl_deferring_to!(|self| (*self).as_mut());
}

impl<ResumeArg, G : ?Sized>
    Generator<ResumeArg>
for
    &'_ mut G
where
    G : Generator<ResumeArg> + Unpin,
{
    transitive_impl_deferring_to!(|self| Pin::new(&mut **self));
}

impl<ResumeArg, G : ?Sized>
    Generator<ResumeArg>
for
    Box<G>
where
    G : Generator<ResumeArg> + Unpin,
{
    transitive_impl_deferring_to!(|self| Pin::new(&mut **self));
}

// where:
macro_rules! transitive_impl_deferring_to {(
    |$self:tt| $expr:expr $(,)?
) => (
    type Yield = G::Yield;
    type Return = G::Return;

    #[inline]
    fn resume (
        mut $self: Pin<&'_ mut Self>,
        arg: ResumeArg,
    ) -> GeneratorState<Self::Yield, Self::Return>
    {
        <G as Generator<ResumeArg>>::resume($expr, arg)
    }
)} use transitive_impl_deferring_to;

/// Extension trait with some convenience methods for [`Generator`]s.
pub
trait GeneratorExt<ResumeArg>
:
    Generator<ResumeArg> +
{
    /// Same as [`.resume()`][`Generator::resume`], but with a `&mut Self`
    /// receiver, thanks to the `Unpin` bound.
    #[inline]
    fn resume_unpin (
        self: &'_ mut Self,
        resume_arg: ResumeArg,
    ) -> GeneratorState<Self::Yield, Self::Return>
    where
        Self : Unpin,
    {
        Pin::new(self).resume(resume_arg)
    }

    /// Iterates over the yielded values of a generator resumed with `()`,
    /// until it returns.
    ///
    /// ```rust
    /// use ::handoff_coroutine::{prelude::*, BoxError};
    ///
    /// let mut co = create(|co: &Suspender<(), u8>| -> Result<_, BoxError> {
    ///     for i in 1 ..= 3 {
    ///         co.suspend(i)?;
    ///     }
    ///     Ok(0)
    /// });
    /// assert_eq!(co.gen_into_iter().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    #[inline]
    fn gen_into_iter (
        self: &'_ mut Self,
    ) -> crate::iter::Iter<&'_ mut Self>
    where
        Self : Generator<()> + Unpin,
    {
        crate::iter::Iter::new(self)
    }
}

impl<ResumeArg, G : ?Sized>
    GeneratorExt<ResumeArg>
for
    G
where
    G : Generator<ResumeArg>,
{}
