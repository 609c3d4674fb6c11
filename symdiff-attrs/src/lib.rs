mod structures;

use proc_macro::TokenStream;
use quote::ToTokens;
use structures::ErrorKindImpl;
use syn::{parse_macro_input, DeriveInput};

/// Derives `symdiff_error::ErrorKind` for a struct, building its report from an `#[error(...)]`
/// attribute.
///
/// ```
/// use symdiff_attrs::ErrorKind;
/// use symdiff_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("expected at most {} operands", self.max),
///     labels = ["this operand is one too many"],
///     help = "remove it",
/// )]
/// pub struct TooManyOperands {
///     max: usize,
/// }
/// ```
///
/// Tags:
///
/// - `message` (required): the headline of the report.
/// - `labels`: an array with one label per span of the error, in span order. Spans without a
///   label are not marked; without the tag, every span is marked with no text.
/// - `help`: a hint telling the user how to fix the error.
///
/// Tag values are arbitrary expressions. Named fields are in scope as references, and `self` is
/// available too. Tuple structs, enums and generic structs are rejected.
///
/// The generated code names `ErrorKind`, `ariadne` and `symdiff_error` directly, so the trait
/// must be imported and both crates must be dependencies.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match ErrorKindImpl::new(input) {
        Ok(target) => target.into_token_stream().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
