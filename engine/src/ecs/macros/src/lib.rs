mod component;

use proc_macro::TokenStream;

/// Derive `signet_engine::ecs::Component` for a struct or enum.
#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    component::derive_component(item)
}
