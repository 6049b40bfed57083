extern crate proc_macro;

use proc_macro2::TokenStream as TokenStream2;
use syn::Token;
use syn::parse::{self, Parse, ParseStream};

/// Arguments of the `#[context(...)]` attribute: an optional leading `move`
/// followed by `format!` arguments.
#[derive(Debug)]
pub struct Args(pub Option<Token![move]>, pub TokenStream2);

impl Parse for Args {
	fn parse(input: ParseStream<'_>) -> parse::Result<Self> {
		let move_token = if input.peek(Token![move]) {
			let token = input.parse()?;
			input.parse::<Token![,]>()?;
			Some(token)
		} else {
			None
		};
		Ok(Self(move_token, input.parse()?))
	}
}

#[cfg(test)]
mod tests {
	use super::Args;
	use syn::parse_str;

	#[test]
	fn parse_without_move() {
		let args: Args = parse_str("\"loading {}\", path").unwrap();
		assert!(args.0.is_none());
		assert_eq!(args.1.to_string(), "\"loading {}\" , path");
	}

	#[test]
	fn parse_with_move() {
		let args: Args = parse_str("move, \"loading\"").unwrap();
		assert!(args.0.is_some());
		assert_eq!(args.1.to_string(), "\"loading\"");
	}

	#[test]
	fn parse_missing_comma_after_move() {
		assert!(parse_str::<Args>("move \"loading\"").is_err());
	}
}
