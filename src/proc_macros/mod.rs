//! Crate not intended for direct use.
//! Use https://docs.rs/handoff-coroutine instead.
#![allow(nonstandard_style)]

use ::core::{
    ops::Not as _,
};
use ::proc_macro::{
    TokenStream,
};
use ::proc_macro2::{
    TokenStream as TokenStream2,
};
use ::quote::{
    quote,
    ToTokens,
};
use ::syn::{*,
    parse::{Parse, ParseStream},
    Result, // Explicitly shadow it
};

mod utils;

mod kw {
    ::syn::custom_keyword!(resume);
}

/// Turns a `fn` returning `Result<Output, E>` into one returning a
/// `Coroutine<Input, Output>`, whose body is the function's body.
///
///   - `#[coroutine_fn(yield(Output))]`, or just `#[coroutine_fn(Output)]`: the
///     coroutine is resumed with `()`;
///
///   - `#[coroutine_fn(yield(Output), resume(Input))]`;
///
///   - `#[coroutine_fn(yield(Output), resume(Input) as pat)]`: the first input
///     is bound to `pat`.
///
/// Within the body, `yield_!(value)` suspends with `value` and evaluates to
/// the next input (propagating protocol errors with `?`), and `input_!()`
/// peeks at the pending input.
#[proc_macro_attribute] pub
fn coroutine_fn (
    attrs: TokenStream,
    input: TokenStream,
) -> TokenStream
{
    coroutine_impl(attrs.into(), input.into())
        .map(|ret| {
            #[cfg(feature = "verbose-expansions")] {
                utils::pretty_print_tokenstream(&ret);
            }
            ret
        })
        .unwrap_or_else(|err| {
            let mut errors =
                err .into_iter()
                    .map(|err| Error::new(
                        err.span(),
                        format_args!("`#[handoff_coroutine::coroutine_fn]`: {}", err),
                    ))
            ;
            let mut err = errors.next().unwrap();
            errors.for_each(|cur| err.combine(cur));
            err.to_compile_error()
        })
        .into()
}

struct Params {
    yield_type: Type,
    resume_type: Option<Type>,
    resume_binding: Option<Pat>,
}

impl Parse for Params {
    fn parse (input: ParseStream<'_>)
      -> Result<Params>
    {
        // Shorthand: `#[coroutine_fn(Output)]`.
        if input.peek(Token![yield]).not() && input.peek(kw::resume).not() {
            let yield_type = input.parse()?;
            let _: Option<Token![,]> = input.parse()?;
            return Ok(Params { yield_type, resume_type: None, resume_binding: None });
        }

        let mut yield_type = None;
        let mut resume_type = None;
        let mut resume_binding = None;
        while input.is_empty().not() {
            let lookahead = input.lookahead1();
            if lookahead.peek(Token![yield]) {
                let kw: Token![yield] = input.parse()?;
                let contents;
                parenthesized!(contents in input);
                if yield_type.replace(contents.parse::<Type>()?).is_some() {
                    return Err(Error::new_spanned(kw, "duplicate `yield(...)`"));
                }
            } else if lookahead.peek(kw::resume) {
                let kw: kw::resume = input.parse()?;
                let contents;
                parenthesized!(contents in input);
                if resume_type.replace(contents.parse::<Type>()?).is_some() {
                    return Err(Error::new_spanned(kw, "duplicate `resume(...)`"));
                }
                if input.parse::<Option<Token![as]>>()?.is_some() {
                    resume_binding = Some(input.parse::<Pat>()?);
                }
            } else {
                return Err(lookahead.error());
            }
            if input.is_empty().not() {
                let _: Token![,] = input.parse()?;
            }
        }
        let yield_type = yield_type.ok_or_else(|| input.error(
            "missing `yield(...)`",
        ))?;
        Ok(Params { yield_type, resume_type, resume_binding })
    }
}

fn coroutine_impl (
    params: TokenStream2,
    input: TokenStream2,
) -> Result<TokenStream2>
{
    let Params { yield_type, resume_type, resume_binding } = parse2(params)?;
    let resume_type = resume_type.unwrap_or_else(|| parse_quote!( () ));

    let mut function: ItemFn = parse2(input)?;
    let ItemFn {
        ref mut block,
        ref mut sig,
        ..
    } = function;

    if let Some(asyncness) = sig.asyncness {
        return Err(Error::new_spanned(
            asyncness,
            "`async fn`s cannot be coroutines; the body runs on its own thread",
        ));
    }
    if let Some(receiver) = sig.receiver() {
        return Err(Error::new_spanned(
            receiver,
            "`self` receivers are not supported yet",
        ));
    }

    let body_ret = match sig.output {
        | ReturnType::Type(_, ref ty) => ty.clone(),
        | ReturnType::Default => return Err(Error::new_spanned(
            &sig.ident,
            "expected a `-> Result<Output, E>` return type",
        )),
    };

    let binding = resume_binding.map(|pat| quote!(
        let #pat: #resume_type = match __suspender__.take_input() {
            | ::core::option::Option::Some(it) => it,
            | ::core::option::Option::None => ::core::unreachable!(
                "the first input is pending when a coroutine body starts",
            ),
        };
    ));

    // Update block to run within `create`, with `yield_!` and `input_!`.
    *block = parse_quote!({
        ::handoff_coroutine::__::create(move |
            __suspender__: &::handoff_coroutine::__::Suspender<
                #resume_type,
                #yield_type,
            >,
        | -> #body_ret {
            #[allow(unused_macros)]
            macro_rules! yield_ {(
                $value:expr $(,)?
            ) => (
                __suspender__.suspend($value)?
            )}

            #[allow(unused_macros)]
            macro_rules! input_ {() => (
                __suspender__.input()
            )}

            #binding
            #block
        })
    });

    sig.output = parse_quote!(
        -> ::handoff_coroutine::Coroutine<#resume_type, #yield_type>
    );

    Ok(function.into_token_stream())
}
