use ::handoff_coroutine::{prelude::*, BoxError};

#[coroutine_fn(yield(i32), resume(f64))]
fn countdown (greeting: &'static str)
  -> Result<i32, BoxError>
{
    println!("{greeting}!");
    let mut value = input_!().map_or(0, |input| input.floor() as i32);
    while value > 0 {
        value = yield_!(value - 2) as i32;
    }
    Ok(0)
}

fn main ()
{
    let _ = ::env_logger::try_init();

    let co = countdown("hello");

    let mut previous = 42;
    while !co.is_completed() {
        let next = match co.resume(previous.into()) {
            | Ok(next) => next,
            | Err(err) => panic!("countdown failed: {err}"),
        };
        println!("{previous} -> {next} ({state:?})", state = co.state());
        previous = next;
    }
    assert_eq!(previous, 0);
}
