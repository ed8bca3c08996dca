macro_rules! use_prelude {() => (
    #[allow(unused_imports)]
    use crate::utils::prelude::*;
)}

/// Locks a mutex, ignoring poisoning: once a forwarded panic leaves the
/// coroutine `Completed`, the guarded endpoints are never used again.
macro_rules! lock {(
    $mutex:expr
) => (
    $mutex
        .lock()
        .unwrap_or_else(::std::sync::PoisonError::into_inner)
)}
