//! Attribute macro helpers

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Ident, LitStr, Result, Token, Type,
};

const AUTO: &str = "auto";

/// Represents the input to the `#[inject(...)]` field attribute.
///
/// This can either be:
/// - A string literal (e.g. `"logger"`), the dependency name
/// - The `auto` identifier, resolve by the field type
pub(crate) enum InjectInput {
    /// A dependency name (e.g., `"logger"`)
    Name(LitStr),

    /// The `auto` keyword
    Auto(Ident),
}

impl Parse for InjectInput {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            if lit.value().is_empty() {
                return Err(syn::Error::new(lit.span(), "dependency name must not be empty"));
            }
            Ok(InjectInput::Name(lit))
        } else if input.peek(Ident) {
            let ident: Ident = input.parse()?;
            if ident != AUTO {
                return Err(syn::Error::new(ident.span(), "expected a string literal or `auto`"));
            }
            Ok(InjectInput::Auto(ident))
        } else {
            Err(input.error("expected a string literal or `auto`"))
        }
    }
}

impl InjectInput {
    /// Returns the tag value passed to `Tag::new`
    pub(super) fn tag(&self) -> String {
        match self {
            InjectInput::Name(lit) => lit.value(),
            InjectInput::Auto(_) => AUTO.into(),
        }
    }
}

/// Represents the input to the `#[provides(...)]` struct attribute,
/// a comma-separated list of trait object types.
pub(crate) struct ProvidesInput {
    pub(super) types: Vec<Type>,
}

impl Parse for ProvidesInput {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let types = Punctuated::<Type, Token![,]>::parse_terminated(input)?;
        if types.is_empty() {
            return Err(input.error("expected at least one trait object type"));
        }
        Ok(Self { types: types.into_iter().collect() })
    }
}
