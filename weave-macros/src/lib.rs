use proc_macro::TokenStream;

mod host;
mod mixin;

/// Derive macro for implementing the `Mixin` trait.
///
/// Mark at most one field with `#[mixin(base)]` to make it the instance this
/// mixin extends. The field may be a concrete mixin or a `Box<dyn Mixin>`.
///
/// ```rust,ignore
/// #[derive(Mixin)]
/// struct Strict {
///     #[mixin(base)]
///     base: Box<dyn Mixin>,
///     max_len: usize,
/// }
/// ```
#[proc_macro_derive(Mixin, attributes(mixin))]
pub fn derive_mixin(input: TokenStream) -> TokenStream {
    mixin::derive_mixin_impl(input)
}

/// Derive macro for implementing the `Host` trait on an extension record.
///
/// Every named field of type `Option<Box<dyn Mixin>>` is a slot accepted under
/// the field name, or under `#[host(name = "...")]`. Fields marked
/// `#[host(skip)]` are left alone.
///
/// ```rust,ignore
/// #[derive(Default, Host)]
/// struct Form {
///     validator: Option<Box<dyn Mixin>>,
///     #[host(name = "submit")]
///     submitter: Option<Box<dyn Mixin>>,
///     #[host(skip)]
///     action: String,
/// }
/// ```
#[proc_macro_derive(Host, attributes(host))]
pub fn derive_host(input: TokenStream) -> TokenStream {
    host::derive_host_impl(input)
}
