#[cfg(feature = "verbose-expansions")]
use ::std::{
    ops::Not as _,
    io::{self, Read as _, Write as _},
    process::{Command, Stdio},
};

/// Prints a `#[coroutine_fn]` expansion to stderr, `rustfmt`-ed and
/// highlighted when the tools are around, raw otherwise.
#[cfg(feature = "verbose-expansions")]
pub(in crate)
fn pretty_print_tokenstream (
    code: &'_ ::proc_macro2::TokenStream,
)
{
    let raw = code.to_string();
    let code = rustfmt(&raw).unwrap_or(raw);
    let highlighted =
        ::bat::PrettyPrinter::new()
            .input_from_bytes(code.as_bytes())
            .language("rust")
            .true_color(false)
            .snip(true)
            .print()
    ;
    if matches!(highlighted, Ok(true)).not() {
        eprintln!("{code}");
    }
}

#[cfg(feature = "verbose-expansions")]
fn rustfmt (code: &'_ str)
  -> Option<String>
{
    let run = || -> io::Result<String> {
        let mut child =
            Command::new("rustfmt")
                .args(["--edition", "2021", "--emit", "stdout"])
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .spawn()?
        ;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(code.as_bytes())?;
        }
        let mut formatted = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_string(&mut formatted)?;
        }
        if child.wait()?.success() && formatted.is_empty().not() {
            Ok(formatted)
        } else {
            Err(io::ErrorKind::InvalidData.into())
        }
    };
    run().ok()
}
