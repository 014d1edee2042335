use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Marks a function as a composable: its body runs inside a group keyed by
/// the function's call site, so the nodes it emits are reused positionally
/// across render passes.
///
/// Parameter memoization/skipping is intentionally not implemented; every
/// composable re-executes on each pass and updates its nodes in place.
#[proc_macro_attribute]
pub fn composable(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "composable takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let mut func = parse_macro_input!(item as ItemFn);
    let block = func.block.clone();
    let wrapped = quote!({
        let __group_key = vtext_core::location_key(file!(), line!(), column!());
        vtext_core::with_current_composer(|__composer| __composer.start_group(__group_key));
        let __result = (|| #block)();
        vtext_core::with_current_composer(|__composer| __composer.end_group());
        __result
    });
    func.block = Box::new(syn::parse2(wrapped).expect("failed to build composable block"));
    TokenStream::from(quote! { #func })
}
