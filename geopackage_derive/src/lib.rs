//! Proc macros for the geopackage crates.
//!
//! Currently this is only the [`macro@context`] attribute, which wraps the body
//! of a `Result`-returning function so that errors are annotated with a
//! formatted context message.

mod args;

use crate::args::Args;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::parse_macro_input;

/// Attach a formatted context message to every error returned by a function.
///
/// The attribute takes `format!` arguments and may reference the function's
/// parameters:
///
/// ```
/// use anyhow::{Result, bail};
/// use geopackage_derive::context;
///
/// #[context("reading tile table '{table}'")]
/// fn read(table: &str) -> Result<u32> {
/// 	bail!("no such table")
/// }
///
/// let err = read("streets").unwrap_err();
/// assert_eq!(format!("{err}"), "reading tile table 'streets'");
/// ```
#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let Args(move_token, format_args) = parse_macro_input!(args);
	let mut input = parse_macro_input!(input as syn::ItemFn);

	if input.sig.asyncness.is_some() {
		return syn::Error::new_spanned(input, "#[context] does not support async functions")
			.to_compile_error()
			.into();
	}

	let body = &input.block;
	let return_type = &input.sig.output;
	let err = Ident::new("err", Span::mixed_site());

	// Moving a non-`Copy` value into the closure tells borrowck to always treat
	// the closure as a `FnOnce`, preventing some borrowing errors.
	let force_fn_once = Ident::new("force_fn_once", Span::mixed_site());
	let new_body = quote! {
		let #force_fn_once = ::core::iter::empty::<()>();
		(#move_token || #return_type {
			::core::mem::drop(#force_fn_once);
			#body
		})().map_err(|#err| #err.context(format!(#format_args)).into())
	};
	input.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(new_body), None)];

	input.into_token_stream().into()
}
