//! Procedural macros for confmap.
//!
//! This crate provides:
//!
//! - `#[derive(Mappable)]` - Generates `Mappable::as_configuration` for structs
//!
//! The macro is re-exported by `confmap-core` (feature `derive`), so it is
//! normally used as `confmap_core::Mappable`.

mod mappable;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `Mappable` for structs with named fields.
///
/// Every field is written to the mapping according to its `#[config(...)]`
/// attribute. Without an attribute the field is stored as a relative
/// property named after the field.
///
/// # Field attributes
///
/// | Attribute | Generated call |
/// |-----------|----------------|
/// | *(none)* | `put(name, &field)` |
/// | `rename = "a.b"` | uses `a.b` as `name` |
/// | `absolute` | `put_absolute(name, &field)` |
/// | `root` | `put_root(&field)` |
/// | `nested` | `put_mappable(name, &field)` |
/// | `flatten` | `merge_mappable(&field)` |
/// | `list` / `list(item = "p")` | `put_list(name, &field, "p")` |
/// | `map` | `put_map(name, &field)` |
/// | `skip` | nothing |
///
/// # Container attributes
///
/// - `#[config(crate = "path")]` - path to `confmap_core` (default `::confmap_core`)
///
/// # Example
///
/// ```rust,ignore
/// use confmap_core::Mappable;
///
/// #[derive(Mappable)]
/// struct Sink {
///     #[config(rename = "type")]
///     kind: String,
///     #[config(nested)]
///     retry: RetryPolicy,
///     #[config(list(item = "topic"))]
///     topics: Vec<Topic>,
/// }
/// ```
#[proc_macro_derive(Mappable, attributes(config))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match mappable::derive_mappable(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
