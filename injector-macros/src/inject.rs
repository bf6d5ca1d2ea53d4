//! Macros for injectable records

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned};

pub(super) mod attr;

const INJECT: &str = "inject";
const PROVIDES: &str = "provides";

/// A field tagged with `#[inject(...)]`
struct TaggedField<'a> {
    ident: &'a syn::Ident,
    name: String,
    tag: String,
    ty: &'a syn::Type,
    /// `T` of an `Option<T>` field
    inner: Option<&'a syn::Type>,
}

/// Expands a derive-macro for Injectable and Component
pub(super) fn expand_injectable(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = tagged_fields(input)?;
    let provides = provided_types(input)?;

    let tags = fields.iter().map(|field| {
        let (ty, name, tag) = (field.ty, &field.name, &field.tag);
        match field.inner {
            Some(inner) => quote_spanned! { field.ident.span() =>
                ::injector::Tag::new::<#ty>(#name, #tag).with_fallback::<#inner>()
            },
            None => quote_spanned! { field.ident.span() =>
                ::injector::Tag::new::<#ty>(#name, #tag)
            },
        }
    });

    let assign_body = if fields.is_empty() {
        quote! {
            let _ = field;
            ::std::result::Result::Err(value)
        }
    } else {
        let arms = fields.iter().map(|field| {
            let (ident, ty, name) = (field.ident, field.ty, &field.name);
            match field.inner {
                Some(inner) => quote! {
                    #name => self.#ident = match value.downcast::<#ty>() {
                        ::std::result::Result::Ok(value) => *value,
                        ::std::result::Result::Err(value) => {
                            ::std::option::Option::Some(*value.downcast::<#inner>()?)
                        }
                    },
                },
                None => quote! { #name => self.#ident = *value.downcast::<#ty>()?, },
            }
        });
        quote! {
            match field {
                #(#arms)*
                _ => return ::std::result::Result::Err(value),
            }
            ::std::result::Result::Ok(())
        }
    };

    let describe_shared = if provides.is_empty() {
        quote! {}
    } else {
        let casts = provides.iter().map(|ty| quote_spanned! { ty.span() =>
            descriptor.provide(|shared: &::injector::Shared<Self>| -> ::injector::Shared<#ty> {
                ::injector::Shared::from_arc(
                    ::std::sync::Arc::clone(shared.as_arc()) as ::std::sync::Arc<::std::sync::RwLock<#ty>>
                )
            });
        });
        quote! {
            fn describe_shared(descriptor: &mut ::injector::Descriptor<::injector::Shared<Self>>) {
                #(#casts)*
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::injector::Injectable for #name #ty_generics #where_clause {
            #[inline]
            fn tags() -> ::std::vec::Vec<::injector::Tag> {
                ::std::vec![#(#tags),*]
            }

            fn assign(
                &mut self,
                field: &str,
                value: ::injector::Erased
            ) -> ::std::result::Result<(), ::injector::Erased> {
                #assign_body
            }

            #describe_shared
        }

        impl #impl_generics ::injector::Component for #name #ty_generics #where_clause {
            #[inline]
            fn shape() -> ::injector::Shape {
                ::injector::Shape::Record
            }

            #[inline]
            fn record_tags() -> ::std::vec::Vec<::injector::Tag> {
                <Self as ::injector::Injectable>::tags()
            }
        }
    })
}

fn tagged_fields(input: &syn::DeriveInput) -> syn::Result<Vec<TaggedField<'_>>> {
    let syn::Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "Injectable can only be derived for structs"
        ));
    };

    let named = match &data.fields {
        syn::Fields::Named(fields) => &fields.named,
        syn::Fields::Unit => return Ok(Vec::new()),
        syn::Fields::Unnamed(_) => return Err(syn::Error::new(
            input.ident.span(),
            "Injectable can only be derived for structs with named fields"
        )),
    };

    let mut tagged = Vec::new();
    for field in named {
        let mut attrs = field.attrs.iter().filter(|attr| attr.path().is_ident(INJECT));
        let Some(attr) = attrs.next() else {
            continue;
        };
        if let Some(duplicate) = attrs.next() {
            return Err(syn::Error::new(duplicate.path().span(), "duplicate `inject` attribute"));
        }

        let input: attr::InjectInput = attr.parse_args()?;
        let Some(ident) = &field.ident else {
            continue;
        };
        tagged.push(TaggedField {
            ident,
            name: ident.unraw().to_string(),
            tag: input.tag(),
            ty: &field.ty,
            inner: option_inner(&field.ty),
        });
    }
    Ok(tagged)
}

fn provided_types(input: &syn::DeriveInput) -> syn::Result<Vec<syn::Type>> {
    let mut types = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident(PROVIDES)) {
        let provides: attr::ProvidesInput = attr.parse_args()?;
        types.extend(provides.types);
    }
    Ok(types)
}

/// Returns `T` if the `ty` is `Option<T>`
fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(syn::GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
