pub(in crate)
use {
    ::core::{
        cell::{Ref, RefCell},
        fmt,
        ops::Not as _,
        pin::Pin,
        sync::atomic::{AtomicU8, Ordering},
    },
    ::std::{
        io,
        sync::{
            mpsc::{self, Receiver, Sender},
            Arc,
            Mutex,
        },
        thread,
    },
    ::log::{debug, trace},
    crate::{
        error::{BoxError, Error, Operation},
        generator::{
            Generator,
            GeneratorState,
        },
        state::{CoroutineState, StateCell},
        suspender::Suspender,
    },
};
