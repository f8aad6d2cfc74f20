//! `#[derive(Bind)]` for dragon-bind records.
//!
//! The derive lists a struct's externally settable fields (those with a
//! visibility modifier) as `Field` descriptors, in declaration order.
//! Private fields are never bound.
//!
//! # Attributes
//!
//! - `#[bind(default = "literal")]`: used when no source has a value
//! - `#[bind(format = "%Y-%m-%d")]`: `strftime` layout for timestamp fields
//! - `#[bind(rename = "name")]`: look the field up under another name
//! - `#[bind(skip)]`: never bind this field

mod attrs;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Fields, Visibility};

use attrs::FieldAttrs;

#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "Bind can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "Bind can only be derived for structs",
            ))
        }
    };

    let mut descriptors = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::from_attributes(&field.attrs)?;
        if attrs.skip || matches!(field.vis, Visibility::Inherited) {
            continue;
        }

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
        let name = attrs.rename.unwrap_or_else(|| ident.unraw().to_string());

        let mut descriptor = quote! {
            ::dragon_bind::Field::new(#name, &mut self.#ident)
        };
        if let Some(default) = attrs.default {
            descriptor = quote! { #descriptor.with_default(#default) };
        }
        if let Some(format) = attrs.format {
            descriptor = quote! { #descriptor.with_format(#format) };
        }
        descriptors.push(descriptor);
    }

    let ident = &input.ident;
    let record_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::dragon_bind::Bind for #ident #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #record_name
            }

            fn fields(&mut self) -> ::std::vec::Vec<::dragon_bind::Field<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}
