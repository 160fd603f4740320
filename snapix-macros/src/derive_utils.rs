use quote::ToTokens;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Token};

// 拆分出已有 derive 列表与其余属性
fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            retained.push(attr.clone());
            continue;
        }
        if let Ok(list) = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        {
            existing.extend(list);
        }
    }
    (retained, existing)
}

// Serialize 与 serde::Serialize 视为同一项
fn derive_key(path: &syn::Path) -> String {
    match path.segments.last() {
        Some(last) => {
            let name = last.ident.to_string();
            match name.as_str() {
                "Serialize" | "Deserialize" => format!("serde::{name}"),
                _ => name,
            }
        }
        None => path.to_token_stream().to_string(),
    }
}

/// 将 `required` 与已有 derive 合并为一个去重后的 `#[derive(..)]`，置于属性首位
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let (retained, existing) = split_derives(attrs);

    let mut seen = std::collections::HashSet::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(retained).collect();
}

/// 宏参数：目前仅支持 `debug = <bool>`
#[derive(Default)]
pub(crate) struct DebugFlag {
    pub(crate) derive_debug: Option<bool>,
}

impl Parse for DebugFlag {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut flag = DebugFlag::default();
        if input.is_empty() {
            return Ok(flag);
        }

        let pairs: Punctuated<syn::MetaNameValue, Token![,]> =
            Punctuated::parse_terminated(input)?;
        for pair in pairs {
            if !pair.path.is_ident("debug") {
                return Err(syn::Error::new(
                    pair.path.span(),
                    "unknown key in attribute; expected 'debug'",
                ));
            }
            if flag.derive_debug.is_some() {
                return Err(syn::Error::new(
                    pair.path.span(),
                    "duplicate key 'debug' in attribute",
                ));
            }
            match pair.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Bool(b),
                    ..
                }) => flag.derive_debug = Some(b.value()),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected boolean literal for 'debug'",
                    ));
                }
            }
        }
        Ok(flag)
    }
}
