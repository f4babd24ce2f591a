//! `#[derive(Mappable)]` implementation.
//!
//! Each named field becomes one builder call on a fresh `Mapping`; the
//! field's `#[config(...)]` attribute selects which one.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Path, spanned::Spanned};

// ============================================================================
// Attribute structures
// ============================================================================

/// How a field contributes to the mapping.
#[derive(Default)]
enum FieldMode {
    #[default]
    Value,
    Absolute,
    Root,
    Nested,
    Flatten,
    List {
        item_prefix: String,
    },
    Map,
    Skip,
}

impl FieldMode {
    fn label(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Absolute => "absolute",
            Self::Root => "root",
            Self::Nested => "nested",
            Self::Flatten => "flatten",
            Self::List { .. } => "list",
            Self::Map => "map",
            Self::Skip => "skip",
        }
    }
}

/// Per-field `#[config(...)]` settings.
#[derive(Default)]
struct FieldAttrs {
    mode: FieldMode,
    rename: Option<String>,
}

// ============================================================================
// Entry point
// ============================================================================

pub fn derive_mappable(input: &DeriveInput) -> syn::Result<TokenStream> {
    let krate = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "Mappable can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new(
                input.span(),
                "Mappable cannot be derived for enums; implement it by hand",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "Mappable cannot be derived for unions",
            ));
        }
    };

    let mut calls = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = attrs
            .rename
            .clone()
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());

        let call = match attrs.mode {
            FieldMode::Value => quote! { config.put(#name, &self.#ident); },
            FieldMode::Absolute => quote! { config.put_absolute(#name, &self.#ident); },
            FieldMode::Root => quote! { config.put_root(&self.#ident); },
            FieldMode::Nested => quote! { config.put_mappable(#name, &self.#ident); },
            FieldMode::Flatten => quote! { config.merge_mappable(&self.#ident); },
            FieldMode::List { item_prefix } => {
                quote! { config.put_list(#name, &self.#ident, #item_prefix); }
            }
            FieldMode::Map => quote! { config.put_map(#name, &self.#ident); },
            FieldMode::Skip => continue,
        };
        calls.push(call);
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Mappable for #name #ty_generics #where_clause {
            fn as_configuration(&self) -> #krate::Mapping {
                let mut config = #krate::Mapping::new();
                #(#calls)*
                config
            }
        }
    })
}

// ============================================================================
// Attribute parsing
// ============================================================================

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<TokenStream> {
    let mut krate: Option<Path> = None;

    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                krate = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown container attribute, expected `crate = \"...\"`"))
            }
        })?;
    }

    Ok(match krate {
        Some(path) => quote! { #path },
        None => quote! { ::confmap_core },
    })
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();
    let mut mode_set = false;

    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                result.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                return Ok(());
            }

            let mode = if meta.path.is_ident("absolute") {
                FieldMode::Absolute
            } else if meta.path.is_ident("root") {
                FieldMode::Root
            } else if meta.path.is_ident("nested") {
                FieldMode::Nested
            } else if meta.path.is_ident("flatten") {
                FieldMode::Flatten
            } else if meta.path.is_ident("map") {
                FieldMode::Map
            } else if meta.path.is_ident("skip") {
                FieldMode::Skip
            } else if meta.path.is_ident("list") {
                let mut item_prefix = String::new();
                if meta.input.peek(syn::token::Paren) {
                    meta.parse_nested_meta(|inner| {
                        if inner.path.is_ident("item") {
                            item_prefix = inner.value()?.parse::<LitStr>()?.value();
                            Ok(())
                        } else {
                            Err(inner.error("unknown list option, expected `item = \"...\"`"))
                        }
                    })?;
                }
                FieldMode::List { item_prefix }
            } else {
                return Err(meta.error("unknown config attribute"));
            };

            if mode_set {
                return Err(meta.error(format!(
                    "conflicting config attributes: field is already `{}`",
                    result.mode.label()
                )));
            }
            result.mode = mode;
            mode_set = true;
            Ok(())
        })?;
    }

    Ok(result)
}
