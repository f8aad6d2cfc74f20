//! Parsing of `#[bind(...)]` field attributes.

use syn::{punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Lit, Meta, Token};

#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub default: Option<String>,
    pub format: Option<String>,
    pub rename: Option<String>,
    pub skip: bool,
}

impl FieldAttrs {
    pub fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("bind")) {
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in metas {
                match meta {
                    Meta::Path(path) if path.is_ident("skip") => parsed.skip = true,
                    Meta::NameValue(nv) => {
                        let key = nv
                            .path
                            .get_ident()
                            .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                            .to_string();
                        let value = match &nv.value {
                            Expr::Lit(ExprLit {
                                lit: Lit::Str(s), ..
                            }) => s.value(),
                            _ => {
                                return Err(syn::Error::new(
                                    nv.value.span(),
                                    "expected string literal",
                                ))
                            }
                        };

                        match key.as_str() {
                            "default" => parsed.default = Some(value),
                            "format" => parsed.format = Some(value),
                            "rename" => parsed.rename = Some(value),
                            _ => {
                                return Err(syn::Error::new(
                                    nv.path.span(),
                                    format!("unknown bind attribute: {key}"),
                                ))
                            }
                        }
                    }
                    other => {
                        return Err(syn::Error::new(
                            other.span(),
                            "expected `skip` or `name = \"value\"`",
                        ))
                    }
                }
            }
        }

        Ok(parsed)
    }
}
