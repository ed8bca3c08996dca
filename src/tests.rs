#![allow(unused_imports)]
use {
    ::core::{
        iter::FromIterator,
        ops::Not as _,
    },
    ::std::{
        panic,
        sync::{mpsc, Arc},
        thread,
        time::Duration,
    },
    super::{*,
        prelude::*,
    },
};

fn init ()
{
    let _ = ::env_logger::builder().is_test(true).try_init();
}

/// The round-trip scenario: each resume feeds back the previous output.
fn countdown ()
  -> Coroutine<f64, i32>
{
    create(|co: &Suspender<f64, i32>| -> Result<i32, BoxError> {
        let mut value = co.input().map_or(0, |input| input.floor() as i32);
        while value > 0 {
            value = co.suspend(value - 2)? as i32;
        }
        Ok(0)
    })
}

#[test]
fn round_trip ()
{
    init();
    let co = countdown();
    assert_eq!(co.state(), CoroutineState::NotStarted);

    let mut previous = 42;
    let mut seen = vec![];
    while co.is_completed().not() {
        let next = co.resume(previous.into()).unwrap();
        seen.push((next, co.state()));
        previous = next;
    }

    let mut expected = Vec::from_iter(
        (0 ..= 40)
            .rev()
            .step_by(2)
            .map(|n| (n, CoroutineState::Suspended))
    );
    expected.push((0, CoroutineState::Completed));
    assert_eq!(seen, expected);
}

#[test]
fn resume_state_tags_the_last_value ()
{
    init();
    let co = countdown();
    assert_eq!(co.resume_state(4.9).unwrap(), GeneratorState::Yielded(2));
    assert_eq!(co.resume_state(2.0).unwrap(), GeneratorState::Yielded(0));
    assert_eq!(co.resume_state(0.0).unwrap(), GeneratorState::Returned(0));
}

#[test]
fn body_does_not_run_before_first_resume ()
{
    init();
    let (tx, rx) = mpsc::channel();
    let co = create(move |_: &Suspender<(), ()>| -> Result<(), BoxError> {
        tx.send("started")?;
        Ok(())
    });
    thread::sleep(Duration::from_millis(20));
    assert!(rx.try_recv().is_err());
    assert_eq!(co.state(), CoroutineState::NotStarted);

    co.resume(()).unwrap();
    assert_eq!(rx.try_recv(), Ok("started"));
}

#[test]
fn first_resume_then_suspend_or_return ()
{
    init();
    let suspends = create(|co: &Suspender<u8, u8>| -> Result<u8, BoxError> {
        let input = co.take_input().unwrap_or_default();
        co.suspend(input + 1)?;
        Ok(0)
    });
    assert_eq!(suspends.resume(1).unwrap(), 2);
    assert_eq!(suspends.state(), CoroutineState::Suspended);

    let returns = create(|co: &Suspender<u8, u8>| -> Result<u8, BoxError> {
        Ok(co.take_input().unwrap_or_default() * 2)
    });
    assert_eq!(returns.resume(21).unwrap(), 42);
    assert_eq!(returns.state(), CoroutineState::Completed);
    assert!(returns.is_completed());
}

#[test]
fn input_accessor ()
{
    init();
    let co = create(|co: &Suspender<String, usize>| -> Result<usize, BoxError> {
        let first_len = co.input().map_or(0, |input| input.len());
        let second = co.suspend(first_len)?;
        // the latest resume's input stays readable while running.
        assert_eq!(co.input().as_deref().map(String::as_str), Some("hi"));
        assert_eq!(second, "hi");
        assert_eq!(co.take_input().as_deref(), Some("hi"));
        assert!(co.input().is_none());
        let third = co.suspend(second.len())?;
        assert_eq!(co.input().as_deref().map(String::as_str), Some(third.as_str()));
        assert_eq!(co.state(), CoroutineState::Running);
        Ok(third.len())
    });
    assert_eq!(co.resume("hello".into()).unwrap(), 5);
    assert_eq!(co.resume("hi".into()).unwrap(), 2);
    assert_eq!(co.resume("hey!".into()).unwrap(), 4);
    assert!(co.is_completed());
}

#[test]
fn input_tracks_every_resume ()
{
    init();
    let co = create(|co: &Suspender<i32, Option<i32>>| -> Result<Option<i32>, BoxError> {
        let first = co.input().map(|input| *input);
        co.suspend(first)?;
        Ok(co.input().map(|input| *input))
    });
    assert_eq!(co.resume(42).unwrap(), Some(42));
    assert_eq!(co.resume(7).unwrap(), Some(7));
    assert!(co.is_completed());
}

#[test]
fn resume_after_completion_fails ()
{
    init();
    let (tx, rx) = mpsc::channel();
    let co = create(move |_: &Suspender<(), u32>| -> Result<u32, BoxError> {
        tx.send(())?;
        Ok(7)
    });
    assert_eq!(co.resume(()).unwrap(), 7);

    for _ in 0 .. 3 {
        match co.resume(()) {
            | Err(Error::InvalidState { operation, state }) => {
                assert_eq!(operation, Operation::Resume);
                assert_eq!(state, CoroutineState::Completed);
            },
            | other => panic!("unexpected: {other:?}"),
        }
    }
    // The body ran exactly once.
    assert_eq!(rx.try_iter().count(), 1);
    assert!(co.is_completed());
}

#[test]
fn body_error_propagates_once ()
{
    init();
    let co = create(|_: &Suspender<(), ()>| -> Result<(), BoxError> {
        Err("boom".into())
    });

    let err = co.resume(()).unwrap_err();
    assert!(matches!(err, Error::Body(_)));
    assert_eq!(err.to_string(), "coroutine body failed: boom");
    assert!(co.is_completed());

    let err = co.resume(()).unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn body_error_after_suspending ()
{
    init();
    let co = create(|co: &Suspender<i32, i32>| -> Result<i32, BoxError> {
        let n = co.suspend(1)?;
        if n < 0 {
            return Err(format!("negative input: {n}").into());
        }
        Ok(n)
    });
    assert_eq!(co.resume(0).unwrap(), 1);
    assert_eq!(
        co.resume(-3).unwrap_err().to_string(),
        "coroutine body failed: negative input: -3",
    );
    assert!(co.is_completed());
}

#[test]
fn reentrant_resume_is_rejected ()
{
    init();
    let (tx, rx) = mpsc::channel::<Arc<Coroutine<(), String>>>();
    let co = Arc::new(create(move |_: &Suspender<(), String>| -> Result<String, BoxError> {
        let this = rx.recv()?;
        let err = match this.resume(()) {
            | Ok(_) => return Err("reentrant resume succeeded".into()),
            | Err(err) => err,
        };
        assert_eq!(this.state(), CoroutineState::Running);
        Ok(err.to_string())
    }));
    tx.send(Arc::clone(&co)).unwrap();

    assert_eq!(co.resume(()).unwrap(), "cannot resume a running coroutine");
    assert!(co.is_completed());
}

#[test]
fn concurrent_resume_is_rejected ()
{
    init();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let co = Arc::new(create(move |_: &Suspender<(), u8>| -> Result<u8, BoxError> {
        entered_tx.send(())?;
        release_rx.recv()?;
        Ok(1)
    }));

    let driver = {
        let co = Arc::clone(&co);
        thread::spawn(move || co.resume(()).unwrap())
    };
    entered_rx.recv().unwrap();
    assert_eq!(co.state(), CoroutineState::Running);
    match co.resume(()) {
        | Err(Error::InvalidState { state: CoroutineState::Running, .. }) => {},
        | other => panic!("unexpected: {other:?}"),
    }
    release_tx.send(()).unwrap();
    assert_eq!(driver.join().unwrap(), 1);
    assert!(co.is_completed());
}

#[test]
fn suspend_after_drop_fails ()
{
    init();
    let (report_tx, report_rx) = mpsc::channel();
    let co = create(move |co: &Suspender<(), u8>| -> Result<u8, BoxError> {
        co.suspend(1)?;
        let first = co.suspend(2);
        let second = co.suspend(3);
        report_tx.send((first.map_err(|e| e.to_string()), second.map_err(|e| e.to_string())))?;
        Ok(0)
    });
    assert_eq!(co.resume(()).unwrap(), 1);
    assert_eq!(co.resume(()).unwrap(), 2);
    drop(co);

    let (first, second) = report_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first, Err("cannot suspend a completed coroutine".to_owned()));
    assert_eq!(second, Err("cannot suspend a completed coroutine".to_owned()));
}

#[test]
fn suspend_misuse_surfaces_as_invalid_state ()
{
    init();
    let co = create(|co: &Suspender<(), ()>| -> Result<(), BoxError> {
        Err(Error::InvalidState {
            operation: Operation::Suspend,
            state: co.state(),
        }.into())
    });
    match co.resume(()) {
        | Err(Error::InvalidState { operation: Operation::Suspend, state }) => {
            assert_eq!(state, CoroutineState::Running);
        },
        | other => panic!("unexpected: {other:?}"),
    }
    assert!(co.is_completed());
}

#[test]
fn dropping_an_unstarted_coroutine_never_runs_it ()
{
    init();
    let (tx, rx) = mpsc::channel::<()>();
    let co = create(move |_: &Suspender<(), ()>| -> Result<(), BoxError> {
        tx.send(())?;
        Ok(())
    });
    drop(co);
    // The body (and its sender) is dropped without ever being called.
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)),
        Err(mpsc::RecvTimeoutError::Disconnected),
    );
}

#[test]
fn panics_are_forwarded ()
{
    init();
    let co = create(|co: &Suspender<(), ()>| -> Result<(), BoxError> {
        co.suspend(())?;
        panic!("body panicked");
    });
    co.resume(()).unwrap();

    let payload = panic::catch_unwind(panic::AssertUnwindSafe(|| co.resume(()))).unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"body panicked"));
    assert!(co.is_completed());
    assert!(co.resume(()).unwrap_err().is_invalid_state());
}

#[test]
fn builder ()
{
    init();
    let co = Builder::new()
        .name("named")
        .stack_size(128 * 1024)
        .spawn(|_: &Suspender<(), Option<String>>| -> Result<_, BoxError> {
            Ok(thread::current().name().map(str::to_owned))
        })
        .unwrap();
    assert_eq!(co.name(), "named");
    assert_eq!(co.resume(()).unwrap().as_deref(), Some("named"));

    let co = countdown();
    assert_eq!(co.name(), DEFAULT_NAME);
}

#[test]
fn iter ()
{
    init();
    let range = |start: u8, end: u8| create(move |co: &Suspender<(), u8>| -> Result<u8, BoxError> {
        let mut current = start;
        while current < end {
            co.suspend(current)?;
            current += 1;
        }
        Ok(end)
    });

    assert_it_eq!(range(2, 8), Vec::from_iter(2 .. 8));

    let mut co = range(0, 2);
    assert_it_eq!(co.gen_into_iter(), [0, 1]);
    assert!(co.is_completed());
}

#[test]
fn generator_impl ()
{
    init();
    let mut co = Box::pin(countdown());
    let mut next = |arg| co.as_mut().resume(arg);
    match next(4.0) {
        | GeneratorState::Yielded(2) => {},
        | other => panic!("unexpected: {other:?}"),
    }
    match next(2.0) {
        | GeneratorState::Yielded(0) => {},
        | other => panic!("unexpected: {other:?}"),
    }
    match next(0.0) {
        | GeneratorState::Returned(Ok(0)) => {},
        | other => panic!("unexpected: {other:?}"),
    }
    match next(0.0) {
        | GeneratorState::Returned(Err(err)) => assert!(err.is_invalid_state()),
        | other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn coro_iter ()
{
    init();
    type Question = &'static str;
    type Answer = i32;

    let answer = create(|co: &Suspender<(), Question>| -> Result<Question, BoxError> {
        co.suspend("What is the answer to life, the universe and everything?")?;
        Ok("42")
    });

    let mut count = 0;
    let ret = coro_iter!(
        for question in answer {
            assert_eq!(
                question,
                "What is the answer to life, the universe and everything?",
            );
            count += 1;
        }
    );
    assert_eq!(count, 1);
    assert_eq!(ret.unwrap().parse::<Answer>().unwrap(), 42);
}

/// Ensure that a [`Coroutine`] can be driven from another thread than the
/// one which created it.
#[test]
fn send ()
{
    init();
    let co = countdown();
    assert_eq!(co.resume(6.0).unwrap(), 4);
    thread::spawn(move || {
        assert_eq!(co.resume(4.0).unwrap(), 2);
        assert_eq!(co.resume(2.0).unwrap(), 0);
        assert_eq!(co.resume(0.0).unwrap(), 0);
        assert!(co.is_completed());
    })
    .join()
    .unwrap();
}

/// Independent coroutines share nothing.
#[test]
fn independent_instances ()
{
    init();
    let handles = Vec::from_iter((0 .. 4).map(|_| thread::spawn(|| {
        let co = countdown();
        let mut previous = 10;
        while co.is_completed().not() {
            previous = co.resume(previous.into()).unwrap();
        }
        previous
    })));
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
}

macro_rules! assert_it_eq {(
    $left:expr, $right:expr $(, $($msg:expr $(,)?)?)?
) => (
    assert_eq!(
        $left.into_iter().collect::<Vec<_>>(),
        $right,
        $($($msg ,)?)?
    )
)}
use assert_it_eq;
