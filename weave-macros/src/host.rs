//! `#[derive(Host)]` for extension records.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, PathArguments, Type, TypeParamBound,
    parse_macro_input,
};

/// Implementation of `#[derive(Host)]`.
pub fn derive_host_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

struct Slot {
    field: Ident,
    name: String,
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Host can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Host can only be derived for structs",
            ));
        }
    };

    let mut slots: Vec<Slot> = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let mut slot_name = None;
        let mut skip = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("host")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    slot_name = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown host attribute, expected `name` or `skip`"))
                }
            })?;
        }

        if skip {
            continue;
        }
        if !is_mixin_slot(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "host slots must be `Option<Box<dyn Mixin>>`; mark other fields #[host(skip)]",
            ));
        }

        let name = slot_name.unwrap_or_else(|| ident.to_string());
        if slots.iter().any(|s| s.name == name) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate host slot: {}", name),
            ));
        }
        slots.push(Slot { field: ident, name });
    }

    let arms = slots.iter().map(|slot| {
        let field = &slot.field;
        let name = &slot.name;
        quote! {
            #name => self.#field = ::core::option::Option::Some(instance),
        }
    });

    let accepts = if slots.is_empty() {
        quote! {
            let _ = name;
            false
        }
    } else {
        let names = slots.iter().map(|slot| &slot.name);
        quote! { ::core::matches!(name, #(#names)|*) }
    };

    Ok(quote! {
        impl #impl_generics ::weave::Host for #name #ty_generics #where_clause {
            fn attach(
                &mut self,
                name: &str,
                instance: ::std::boxed::Box<dyn ::weave::Mixin>,
            ) {
                match name {
                    #(#arms)*
                    _ => {
                        let _ = instance;
                    }
                }
            }

            fn accepts(&self, name: &str) -> bool {
                #accepts
            }
        }
    })
}

/// Whether `ty` is `Option<Box<dyn Mixin>>`, with any path prefixes.
fn is_mixin_slot(ty: &Type) -> bool {
    let Some(boxed) = wrapped(ty, "Option") else {
        return false;
    };
    let Some(Type::TraitObject(object)) = wrapped(boxed, "Box") else {
        return false;
    };
    object.bounds.iter().any(|bound| match bound {
        TypeParamBound::Trait(bound) => bound
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Mixin"),
        _ => false,
    })
}

/// The single type argument of `ty` if its last path segment is `wrapper`.
fn wrapped<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match (args.args.len(), args.args.first()?) {
        (1, GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_accepts_boxed_mixin_slots() {
        assert!(is_mixin_slot(&parse_quote!(Option<Box<dyn Mixin>>)));
        assert!(is_mixin_slot(&parse_quote!(
            ::core::option::Option<::std::boxed::Box<dyn ::weave::Mixin>>
        )));
    }

    #[test]
    fn test_rejects_other_slot_types() {
        assert!(!is_mixin_slot(&parse_quote!(Option<Validator>)));
        assert!(!is_mixin_slot(&parse_quote!(Option<Box<Validator>>)));
        assert!(!is_mixin_slot(&parse_quote!(Option<Box<dyn Debug>>)));
        assert!(!is_mixin_slot(&parse_quote!(Box<dyn Mixin>)));
        assert!(!is_mixin_slot(&parse_quote!(Option)));
        assert!(!is_mixin_slot(&parse_quote!(Vec<Box<dyn Mixin>>)));
    }
}
