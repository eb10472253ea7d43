use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Index};

/// Derive macro implementing `Animatable` by interpolating every field.
///
/// Every field type must itself implement `Animatable`. Works on structs with
/// named fields, tuple structs and unit structs.
///
/// # Example
/// ```ignore
/// #[derive(Clone, PartialEq, Animatable)]
/// struct Glow {
///     radius: f32,
///     color: Color,
/// }
///
/// let half = Glow::lerp(&off, &on, 0.5);
/// ```
#[proc_macro_derive(Animatable)]
pub fn derive_animatable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return syn::Error::new_spanned(&input.ident, "Animatable can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let body = lerp_body(&data.fields);

    let expanded = quote! {
        impl #impl_generics ::guido_animations::Animatable for #name #ty_generics #where_clause {
            fn lerp(from: &Self, to: &Self, t: f32) -> Self {
                #body
            }
        }
    };

    expanded.into()
}

fn lerp_body(fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let inits = named.named.iter().map(|field| {
                let name = field.ident.as_ref().expect("named field without ident");
                let ty = &field.ty;
                quote! {
                    #name: <#ty as ::guido_animations::Animatable>::lerp(&from.#name, &to.#name, t)
                }
            });
            quote! { Self { #(#inits),* } }
        }
        Fields::Unnamed(unnamed) => {
            let inits = unnamed.unnamed.iter().enumerate().map(|(i, field)| {
                let index = Index::from(i);
                let ty = &field.ty;
                quote! {
                    <#ty as ::guido_animations::Animatable>::lerp(&from.#index, &to.#index, t)
                }
            });
            quote! { Self(#(#inits),*) }
        }
        Fields::Unit => {
            quote! {
                let _ = (from, to, t);
                Self
            }
        }
    }
}
