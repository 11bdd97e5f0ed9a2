//! Registration attributes
//!
//! `#[capability]` names a trait so the registry can request it, and
//! `#[service_provider]` registers a concrete type as one of its
//! implementations:
//!
//! ```ignore
//! #[lookup::capability]
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! /// Greets in English
//! #[lookup::service_provider(dyn Greeter)]
//! #[derive(Default)]
//! pub struct English;
//!
//! #[lookup::service_provider(dyn Greeter, factory = Loud::new)]
//! pub struct Loud { volume: u8 }
//! ```
//!
//! Both derive identifiers from `module_path!()` and `type_name`, which
//! normalise to the identifiers `lookup-codegen` writes for the same items.
//! Without a capability argument the type is its own capability and the
//! attribute also implements `Capability` for it.
//!
//! The provider factory calls `Default::default()` unless `factory = path`
//! names a `fn() -> Self`. The generated code refers to the `lookup` crate
//! by its absolute path.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, format_ident, quote};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{Attribute, Expr, Item, Lit, Meta, Token, Type};

/// Registers a struct, enum or union as an implementation of a capability.
#[proc_macro_attribute]
pub fn service_provider(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_provider(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Capability` for `dyn Trait`, named after the trait's path.
#[proc_macro_attribute]
pub fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_capability(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `[Capability] [, factory = path]`
struct ProviderArgs {
    capability: Option<Type>,
    factory: Option<syn::ExprPath>,
}

impl Parse for ProviderArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut args = Self {
            capability: None,
            factory: None,
        };
        if input.is_empty() {
            return Ok(args);
        }
        if !(input.peek(syn::Ident) && input.peek2(Token![=])) {
            args.capability = Some(input.parse()?);
            if input.is_empty() {
                return Ok(args);
            }
            input.parse::<Token![,]>()?;
        }
        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if key != "factory" || args.factory.is_some() {
                return Err(syn::Error::new(key.span(), "expected a single `factory = path`"));
            }
            args.factory = Some(input.parse()?);
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(args)
    }
}

fn expand_provider(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let args: ProviderArgs = syn::parse2(attr)?;
    let item = syn::parse2::<Item>(item)?;

    let (ident, generics, attrs) = match &item {
        Item::Struct(s) => (&s.ident, &s.generics, &s.attrs),
        Item::Enum(e) => (&e.ident, &e.generics, &e.attrs),
        Item::Union(u) => (&u.ident, &u.generics, &u.attrs),
        Item::Trait(t) => {
            return Err(syn::Error::new(
                t.ident.span(),
                "traits are capabilities; mark them with #[capability]",
            ));
        }
        other => {
            return Err(syn::Error::new(
                other.span(),
                "#[service_provider] applies to structs, enums and unions",
            ));
        }
    };
    if !generics.params.is_empty() {
        return Err(syn::Error::new(
            generics.span(),
            "generic types cannot be registered as service providers",
        ));
    }

    let (capability, own_impl) = match &args.capability {
        Some(capability) if !names_item(capability, ident) => {
            (capability_type(capability)?, TokenStream2::new())
        }
        _ => {
            let own = quote! {
                impl ::lookup::Capability for #ident {
                    const NAME: &'static str = concat!(module_path!(), "::", stringify!(#ident));
                }
            };
            (ident.to_token_stream(), own)
        }
    };

    let construct = match &args.factory {
        Some(factory) => quote! { #factory() },
        None => quote! { <#ident as ::core::default::Default>::default() },
    };
    let description = description(attrs);
    let entry = format_ident!(
        "__LOOKUP_IMPLEMENTATION_{}",
        ident.unraw().to_string().to_uppercase()
    );

    Ok(quote! {
        #item

        #own_impl

        #[::lookup::linkme::distributed_slice(::lookup::registry::IMPLEMENTATIONS)]
        #[linkme(crate = ::lookup::linkme)]
        #[doc(hidden)]
        static #entry: ::lookup::registry::ImplementationEntry =
            ::lookup::registry::ImplementationEntry {
                capability: <#capability as ::lookup::Capability>::NAME,
                implementation: ::lookup::registry::ImplementationName::of::<#ident>(),
                description: #description,
                factory: || {
                    ::core::result::Result::Ok(::lookup::Instance::new::<#capability>(
                        ::std::sync::Arc::new(#construct),
                    ))
                },
            };
    })
}

fn expand_capability(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(syn::Error::new(attr.span(), "#[capability] takes no arguments"));
    }
    let Item::Trait(definition) = syn::parse2::<Item>(item)? else {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[capability] applies to traits",
        ));
    };
    if !definition.generics.params.is_empty() {
        return Err(syn::Error::new(
            definition.generics.span(),
            "generic traits cannot be named as capabilities",
        ));
    }

    let ident = &definition.ident;
    Ok(quote! {
        #definition

        impl ::lookup::Capability for dyn #ident {
            const NAME: &'static str = concat!(module_path!(), "::", stringify!(#ident));
        }
    })
}

/// The type an instance is erased as: `dyn Trait` for a trait path
fn capability_type(capability: &Type) -> syn::Result<TokenStream2> {
    match capability {
        Type::Path(path) if path.qself.is_none() => Ok(quote! { dyn #path }),
        Type::TraitObject(object) => Ok(object.to_token_stream()),
        Type::Paren(inner) => capability_type(&inner.elem),
        Type::Group(inner) => capability_type(&inner.elem),
        other => Err(syn::Error::new(
            other.span(),
            "expected a capability path such as `Greeter` or `dyn crate::api::Greeter`",
        )),
    }
}

fn names_item(capability: &Type, ident: &syn::Ident) -> bool {
    match capability {
        Type::Path(path) => path.path.is_ident(ident) || path.path.is_ident("Self"),
        Type::Paren(inner) => names_item(&inner.elem, ident),
        Type::Group(inner) => names_item(&inner.elem, ident),
        _ => false,
    }
}

/// First line of the item's doc comment
fn description(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .find_map(|attr| match &attr.meta {
            Meta::NameValue(value) => match &value.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(text) => Some(text.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .unwrap_or_default()
}
