#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the registry workspace:
//!
//! * [`orc_error`] turns a plain enum into a `thiserror` error with context support.
//! * [`orc_slice`] wraps feature state into a cheaply clonable, registrable slice handle.
//! * [`api_model`] and [`api_handler`] keep HTTP DTOs and handlers consistent and documented.
//!
//! The examples are `ignore`d because a proc-macro crate cannot use its own macros in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a crate-level error enum.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait with `.context(..)` for `Result<T, Name>` and for every
///   `Result<T, Source>` whose source type is wrapped by a variant.
/// * `From<Source>` for variants carrying a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper used inside `#[error(..)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant with a source must also declare
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[orc_derive::orc_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading registry snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn orc_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Turns a struct into a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as an
/// `Arc<<Name>Inner>` wrapper with `new`, `Deref` and an implementation of
/// `orc_kernel::domain::slices::FeatureSlice`.
///
/// ```rust,ignore
/// #[orc_derive::orc_slice]
/// pub struct Registry {
///     pub registrar: Registrar,
/// }
///
/// let slice = Registry::new(RegistryInner { registrar });
/// ```
#[proc_macro_attribute]
pub fn orc_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

/// Declares an HTTP data transfer object.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, `utoipa::ToSchema`
/// under the consuming crate's `server` feature, `rename_all = "camelCase"` and
/// `deny_unknown_fields`. Both serde policies can be overridden:
///
/// ```rust,ignore
/// #[orc_derive::api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct IssuerSummary {
///     pub code: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_model(attr.into(), input).into()
}

/// Registers an axum handler with `utoipa::path` when the `server` feature is on.
///
/// ```rust,ignore
/// #[orc_derive::api_handler(
///     get,
///     path = "/api/registry",
///     responses((status = OK, body = Vec<IssuerEntry>)),
///     tag = "Registry"
/// )]
/// pub async fn registry_handler(State(state): State<ApiState>) -> Result<Json<Vec<IssuerEntry>>, ApiError> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_handler(args.into(), input).into()
}
