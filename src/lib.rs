//! Two-way value-passing coroutines on stable Rust.
//!
//! A [`Coroutine<Input, Output>`][`Coroutine`] wraps a _body_: plain
//! sequential code which, at any point, may [`suspend`][`Suspender::suspend`]
//! itself, handing an `Output` to its caller, and later be resumed with an
//! `Input`:
//!
//! ```rust
//! use ::handoff_coroutine::{prelude::*, BoxError};
//!
//! let co = create(|co: &Suspender<f64, i32>| -> Result<i32, BoxError> {
//!     let mut value = co.input().map_or(0, |input| input.floor() as i32);
//!     while value > 0 {
//!         value = co.suspend(value - 2)? as i32;
//!     }
//!     Ok(0)
//! });
//!
//! let mut previous = 42;
//! let mut outputs = vec![];
//! while co.is_completed().not() {
//!     let next = co.resume(previous.into())?;
//!     outputs.push(next);
//!     previous = next;
//! }
//! assert_eq!(outputs, (0 ..= 40).rev().step_by(2).chain([0]).collect::<Vec<_>>());
//! # use ::core::ops::Not as _;
//! # Ok::<(), ::handoff_coroutine::Error>(())
//! ```
//!
//! The body runs on a dedicated thread, with control strictly handed back and
//! forth: the caller blocks within [`Coroutine::resume`] while the body runs,
//! and the body is parked within [`Suspender::suspend`] while the caller runs.
//! A body that neither suspends nor returns thus blocks its caller forever.
//!
//! The [`#[coroutine_fn]`][`coroutine_fn`] attribute offers some sugar over
//! [`create`], and [`Generator`] lets coroutines be driven by
//! generator-generic code.

#![warn(
    future_incompatible,
    rust_2018_idioms,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(feature = "better-docs",
    feature(doc_notable_trait),
)]

#[path = "public_prelude.rs"]
pub
mod prelude;

mod public_macros;

#[macro_use]
mod utils;

pub use self::coroutine::{create, Builder, Coroutine, DEFAULT_NAME};
mod coroutine;

pub use self::error::{BoxError, Error, Operation, Result};
mod error;

pub use self::generator::{Generator, GeneratorExt, GeneratorState};
mod generator;

pub use self::iter::Iter;
mod iter;

pub use self::state::CoroutineState;
mod state;

pub use self::suspender::Suspender;
mod suspender;

pub use ::handoff_coroutine_proc_macros::coroutine_fn;

#[doc(hidden)]
/// Not part of the public API.
pub
mod __ {
    pub use ::core::result::Result::{Err, Ok};
    pub use crate::{create, BoxError, Suspender};
}

#[cfg(test)]
mod tests;
