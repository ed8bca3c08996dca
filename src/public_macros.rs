/// Loops over the values a `Coroutine<(), _>` yields, and evaluates to the
/// `Result` of its final resumption.
///
/// ```rust
/// use ::handoff_coroutine::{prelude::*, BoxError};
///
/// type Question = &'static str;
/// type Answer = &'static str;
///
/// let answer = create(|co: &Suspender<(), Answer>| -> Result<Answer, BoxError> {
///     co.suspend("What is the answer to life, the universe and everything?")?;
///     Ok("42")
/// });
///
/// let mut questions: Vec<Question> = vec![];
/// let ret = coro_iter!(for question in answer {
///     questions.push(question);
/// });
/// assert_eq!(questions.len(), 1);
/// assert_eq!(ret?, "42");
/// # Ok::<(), ::handoff_coroutine::Error>(())
/// ```
///
/// Since the last value of a coroutine is returned rather than yielded, it is
/// not seen by the loop body. `break` is not supported within the loop body.
#[macro_export]
macro_rules! coro_iter {
    (
        for $pat:pat in $($rest:tt)*
    ) => (
        $crate::coro_iter!(@munch [$pat] [] $($rest)*)
    );

    (
        @munch [$pat:pat] [$($coroutine:tt)*] { $($body:tt)* }
    ) => ({
        let coroutine = $($coroutine)*;
        loop {
            match $crate::Coroutine::resume_state(&coroutine, ()) {
                | $crate::__::Ok($crate::GeneratorState::Yielded($pat)) => {
                    $($body)*
                },
                | $crate::__::Ok($crate::GeneratorState::Returned(ret)) => {
                    break $crate::__::Ok(ret);
                },
                | $crate::__::Err(err) => break $crate::__::Err(err),
            }
        }
    });

    (
        @munch [$pat:pat] [$($coroutine:tt)*] $next:tt $($rest:tt)+
    ) => (
        $crate::coro_iter!(@munch [$pat] [$($coroutine)* $next] $($rest)+)
    );
}
