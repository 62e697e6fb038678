//! `#[derive(Mixin)]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member, parse_macro_input};

/// Implementation of `#[derive(Mixin)]`.
pub fn derive_mixin_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let base = match &input.data {
        Data::Struct(data) => find_base(&data.fields)?,
        _ => None,
    };

    let body = base.map(|member| {
        quote! {
            fn base(&self) -> ::core::option::Option<&dyn ::weave::Mixin> {
                ::core::option::Option::Some(::weave::AsMixin::as_mixin(&self.#member))
            }

            fn base_mut(&mut self) -> ::core::option::Option<&mut dyn ::weave::Mixin> {
                ::core::option::Option::Some(::weave::AsMixin::as_mixin_mut(&mut self.#member))
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::weave::Mixin for #name #ty_generics #where_clause {
            #body
        }
    })
}

fn find_base(fields: &Fields) -> syn::Result<Option<Member>> {
    let mut base: Option<Member> = None;

    for (i, field) in fields.iter().enumerate() {
        let mut is_base = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("mixin")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    is_base = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown mixin attribute, expected `base`"))
                }
            })?;
        }

        if !is_base {
            continue;
        }
        if base.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "only one field can be marked #[mixin(base)]",
            ));
        }
        base = Some(match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(i)),
        });
    }

    Ok(base)
}
