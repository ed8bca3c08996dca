//! The crate prelude: reexport the most essential utilities so that blob
//! `use`-ing them should enable the most straight-forward usage.

pub use {
    ::{
        core::{
            pin::Pin,
        },
        handoff_coroutine_proc_macros::{
            coroutine_fn,
        },
    },
    crate::{
        coro_iter,
        coroutine::{
            create,
            Coroutine,
        },
        generator::{
            Generator,
            GeneratorExt as _,
            GeneratorState,
        },
        state::CoroutineState,
        suspender::Suspender,
    },
};
