use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input, parse_quote};

pub fn derive_component(input: TokenStream) -> TokenStream {
    let mut ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;

    // Stores are keyed by `TypeId`, so every type parameter must be 'static.
    for param in ast.generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    // `::signet_engine` resolves inside the engine through `extern crate self as signet_engine;`.
    TokenStream::from(quote! {
        impl #impl_generics ::signet_engine::ecs::Component for #name #type_generics #where_clause {
        }
    })
}
