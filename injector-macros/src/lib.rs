//! Derive macros for the injector dependency injection container

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod inject;

/// Implements the `Injectable` and `Component` traits for a struct
/// whose fields are populated from the `Container`.
///
/// Field attributes:
/// - `#[inject("name")]` resolves the field by the dependency name;
/// - `#[inject(auto)]` resolves the field by its type.
///
/// A field of type `Option<T>` receives an `Option<T>` as is, or a `T`
/// wrapped into `Some` when no `Option<T>` matches.
/// Untagged fields are left untouched.
///
/// The struct-level `#[provides(dyn Trait, ...)]` attribute makes a
/// `Shared<Self>` handle assignable to `Shared<dyn Trait>`.
///
/// # Example
/// ```ignore
/// use injector::{Injectable, Shared};
///
/// trait Store: Send + Sync {}
///
/// #[derive(Clone, Default, Injectable)]
/// #[provides(dyn Store)]
/// struct MemoryStore {
///     #[inject("capacity")]
///     capacity: usize,
///     #[inject(auto)]
///     name: Option<String>,
/// }
///
/// impl Store for MemoryStore {}
/// ```
///
/// # Errors
/// This macro will fail to compile if:
/// - The input is not a struct with named fields
/// - The `inject` argument is neither a non-empty string literal nor `auto`
/// - A field carries more than one `inject` attribute
#[proc_macro_derive(Injectable, attributes(inject, provides))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    inject::expand_injectable(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
