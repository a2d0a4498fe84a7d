//! `#[capability]` expansion
//!
//! Splits a consumer trait into the pieces the delegation registry needs:
//! component marker, provider trait, consumer blanket impl, table blanket impl
//! and the `ProvidedBy` link used by registration checks.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::visit_mut::{self, VisitMut};
use syn::{
    Attribute, FnArg, GenericParam, Ident, ItemTrait, Pat, PatIdent, Token, TraitItem,
    TraitItemConst, TraitItemFn, TraitItemType, Type,
};

/// `ComponentName, ProviderTrait`
struct CapabilityArgs {
    component: Ident,
    provider: Ident,
}

impl Parse for CapabilityArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let component: Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let provider: Ident = input.parse()?;
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("expected `ComponentName, ProviderTrait`"));
        }
        Ok(Self {
            component,
            provider,
        })
    }
}

/// Paths shared by every generated item
struct Names {
    provider: Ident,
    /// `<Context as DelegateComponent<Component>>::Delegate`
    delegate: TokenStream,
    /// `<__Table as DelegateComponent<Component>>::Delegate`
    table_delegate: TokenStream,
}

/// Generated pieces for one trait item
#[derive(Default)]
struct Parts {
    provider_decls: Vec<TokenStream>,
    consumer_impls: Vec<TokenStream>,
    table_impls: Vec<TokenStream>,
}

pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args: CapabilityArgs = syn::parse2(attr)?;
    let consumer: ItemTrait = syn::parse2(item)?;

    if !consumer.generics.params.is_empty() || consumer.generics.where_clause.is_some() {
        return Err(syn::Error::new(
            consumer.ident.span(),
            "capability traits cannot have generic parameters or where clauses",
        ));
    }

    let component = &args.component;
    let names = Names {
        provider: args.provider.clone(),
        delegate: quote!(<Context as ::wiring_core::DelegateComponent<#component>>::Delegate),
        table_delegate: quote!(<__Table as ::wiring_core::DelegateComponent<#component>>::Delegate),
    };

    let mut parts = Parts::default();
    for item in &consumer.items {
        match item {
            TraitItem::Fn(method) => expand_method(method, &names, &mut parts)?,
            TraitItem::Type(assoc) => expand_type(assoc, &names, &mut parts)?,
            TraitItem::Const(constant) => expand_const(constant, &names, &mut parts),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "only methods, associated types and consts are supported in capability traits",
                ))
            }
        }
    }

    let Parts {
        provider_decls,
        consumer_impls,
        table_impls,
    } = parts;

    let vis = &consumer.vis;
    let consumer_ident = &consumer.ident;
    let provider = &names.provider;
    let delegate = &names.delegate;
    let table_delegate = &names.table_delegate;
    let supertraits = &consumer.supertraits;
    let context_bound = if supertraits.is_empty() {
        quote!()
    } else {
        quote!(Context: #supertraits,)
    };

    let component_doc = format!("Component name of the [`{consumer_ident}`] capability.");
    let provider_doc = format!(
        "Provider side of [`{consumer_ident}`]. Contexts select an implementation by \
         delegating [`{component}`]."
    );

    Ok(quote! {
        #consumer

        #[doc = #component_doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #vis struct #component;

        #[doc = #provider_doc]
        #vis trait #provider<Context> {
            #(#provider_decls)*
        }

        impl<Context> #consumer_ident for Context
        where
            Context: ::wiring_core::DelegateComponent<#component>,
            #delegate: #provider<Context>,
            #context_bound
        {
            #(#consumer_impls)*
        }

        impl<__Table, Context> #provider<Context> for __Table
        where
            __Table: ::wiring_core::DelegateComponent<#component>,
            #table_delegate: #provider<Context>,
        {
            #(#table_impls)*
        }

        impl<__Provider, Context> ::wiring_core::ProvidedBy<__Provider, Context> for #component
        where
            __Provider: #provider<Context>,
        {
        }
    })
}

fn expand_method(method: &TraitItemFn, names: &Names, parts: &mut Parts) -> syn::Result<()> {
    let sig = &method.sig;
    let ident = &sig.ident;
    let provider = &names.provider;
    let delegate = &names.delegate;
    let table_delegate = &names.table_delegate;
    let docs = doc_attrs(&method.attrs);

    let context_name = if sig.inputs.iter().any(|input| arg_named(input, "context")) {
        format_ident!("__context")
    } else {
        format_ident!("context")
    };

    let mut provider_inputs: Punctuated<FnArg, Token![,]> = Punctuated::new();
    let mut consumer_inputs: Punctuated<FnArg, Token![,]> = Punctuated::new();
    let mut consumer_args = Vec::new();
    let mut table_args = Vec::new();

    for (index, input) in sig.inputs.iter().enumerate() {
        match input {
            FnArg::Receiver(receiver) => {
                if receiver.colon_token.is_some() {
                    return Err(syn::Error::new_spanned(
                        receiver,
                        "typed `self` receivers are not supported in capability traits",
                    ));
                }
                let context_ty: Type = match &receiver.reference {
                    Some((and, lifetime)) => {
                        let mutability = &receiver.mutability;
                        syn::parse_quote!(#and #lifetime #mutability Context)
                    }
                    None => syn::parse_quote!(Context),
                };
                provider_inputs.push(syn::parse_quote!(#context_name: #context_ty));
                consumer_inputs.push(input.clone());
                consumer_args.push(quote!(self));
                table_args.push(context_name.to_token_stream());
            }
            FnArg::Typed(typed) => {
                let name = match &*typed.pat {
                    Pat::Ident(PatIdent {
                        ident,
                        by_ref: None,
                        subpat: None,
                        ..
                    }) => ident.clone(),
                    _ => format_ident!("__arg{}", index),
                };
                let ty = &typed.ty;
                let mut provider_ty = (**ty).clone();
                ReplaceSelf.visit_type_mut(&mut provider_ty);

                let forwarded = format_ident!("__arg{}", index);
                provider_inputs.push(syn::parse_quote!(#name: #provider_ty));
                consumer_inputs.push(syn::parse_quote!(#forwarded: #ty));
                consumer_args.push(forwarded.to_token_stream());
                table_args.push(name.to_token_stream());
            }
        }
    }

    let mut provider_sig = sig.clone();
    provider_sig.inputs = provider_inputs;
    ReplaceSelf.visit_return_type_mut(&mut provider_sig.output);
    ReplaceSelf.visit_generics_mut(&mut provider_sig.generics);

    let mut consumer_sig = sig.clone();
    consumer_sig.inputs = consumer_inputs;

    let turbofish = turbofish(sig);
    let await_suffix = if sig.asyncness.is_some() {
        quote!(.await)
    } else {
        quote!()
    };

    parts.provider_decls.push(quote! {
        #(#docs)*
        #provider_sig;
    });
    parts.consumer_impls.push(quote! {
        #[inline]
        #consumer_sig {
            <#delegate as #provider<Context>>::#ident #turbofish(#(#consumer_args),*) #await_suffix
        }
    });
    parts.table_impls.push(quote! {
        #[inline]
        #provider_sig {
            <#table_delegate as #provider<Context>>::#ident #turbofish(#(#table_args),*) #await_suffix
        }
    });
    Ok(())
}

fn expand_type(assoc: &TraitItemType, names: &Names, parts: &mut Parts) -> syn::Result<()> {
    if !assoc.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &assoc.generics,
            "generic associated types are not supported in capability traits",
        ));
    }
    let ident = &assoc.ident;
    let provider = &names.provider;
    let delegate = &names.delegate;
    let table_delegate = &names.table_delegate;

    let mut decl = assoc.clone();
    decl.default = None;
    decl.attrs.retain(|attr| attr.path().is_ident("doc"));
    ReplaceSelf.visit_trait_item_type_mut(&mut decl);

    parts.provider_decls.push(decl.into_token_stream());
    parts
        .consumer_impls
        .push(quote!(type #ident = <#delegate as #provider<Context>>::#ident;));
    parts
        .table_impls
        .push(quote!(type #ident = <#table_delegate as #provider<Context>>::#ident;));
    Ok(())
}

fn expand_const(constant: &TraitItemConst, names: &Names, parts: &mut Parts) {
    let ident = &constant.ident;
    let provider = &names.provider;
    let delegate = &names.delegate;
    let table_delegate = &names.table_delegate;
    let docs = doc_attrs(&constant.attrs);

    let ty = &constant.ty;
    let mut provider_ty = ty.clone();
    ReplaceSelf.visit_type_mut(&mut provider_ty);

    parts.provider_decls.push(quote! {
        #(#docs)*
        const #ident: #provider_ty;
    });
    parts
        .consumer_impls
        .push(quote!(const #ident: #ty = <#delegate as #provider<Context>>::#ident;));
    parts
        .table_impls
        .push(quote!(const #ident: #provider_ty = <#table_delegate as #provider<Context>>::#ident;));
}

fn doc_attrs(attrs: &[Attribute]) -> Vec<&Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("doc")).collect()
}

fn arg_named(input: &FnArg, name: &str) -> bool {
    match input {
        FnArg::Typed(typed) => matches!(&*typed.pat, Pat::Ident(pat) if pat.ident == name),
        FnArg::Receiver(_) => false,
    }
}

/// Explicit type and const arguments for forwarding calls. Lifetimes are left
/// to inference.
fn turbofish(sig: &syn::Signature) -> TokenStream {
    let params: Vec<TokenStream> = sig
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.to_token_stream()),
            GenericParam::Const(constant) => Some(constant.ident.to_token_stream()),
            GenericParam::Lifetime(_) => None,
        })
        .collect();

    if params.is_empty() {
        quote!()
    } else {
        quote!(::<#(#params),*>)
    }
}

/// Rewrites bare `Self` into the provider trait's `Context` parameter.
/// `Self::Assoc` is kept: inside the provider trait it names the provider's
/// own associated item.
struct ReplaceSelf;

impl VisitMut for ReplaceSelf {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(path) = ty {
            if path.qself.is_none() && path.path.is_ident("Self") {
                *ty = syn::parse_quote!(Context);
                return;
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(attr: &str, item: &str) -> syn::Result<String> {
        let attr: TokenStream = attr.parse().unwrap();
        let item: TokenStream = item.parse().unwrap();
        expand(attr, item).map(|tokens| tokens.to_string())
    }

    #[test]
    fn generates_marker_and_provider_trait() {
        let out = expand_str(
            "AreaCalculatorComponent, AreaCalculator",
            "pub trait CanCalculateArea { fn area(&self) -> f64; }",
        )
        .unwrap();

        assert!(out.contains("pub struct AreaCalculatorComponent"));
        assert!(out.contains("pub trait AreaCalculator < Context >"));
        assert!(out.contains("fn area (context : & Context) -> f64"));
        assert!(out.contains("ProvidedBy < __Provider , Context > for AreaCalculatorComponent"));
    }

    #[test]
    fn rewrites_self_in_signatures() {
        let out = expand_str(
            "ResizeComponent, Resizer",
            "pub trait CanResize { fn resized(&self, factor: f64) -> Self; }",
        )
        .unwrap();

        assert!(out.contains("fn resized (context : & Context , factor : f64) -> Context"));
    }

    #[test]
    fn renames_receiver_when_argument_is_named_context() {
        let out = expand_str(
            "LabelComponent, Labeler",
            "trait CanLabel { fn label(&self, context: &str) -> String; }",
        )
        .unwrap();

        assert!(out.contains("__context : & Context , context : & str"));
    }

    #[test]
    fn forwards_associated_types() {
        let out = expand_str(
            "ErrorTypeComponent, ProvideErrorType",
            "pub trait HasErrorType { type Error: std::fmt::Debug; }",
        )
        .unwrap();

        assert!(out.contains("type Error = < < Context as :: wiring_core :: DelegateComponent"));
    }

    #[test]
    fn supertraits_become_context_bounds() {
        let out = expand_str(
            "DescribeComponent, Describer",
            "pub trait CanDescribe: HasName { fn describe(&self) -> String; }",
        )
        .unwrap();

        assert!(out.contains("Context : HasName ,"));
    }

    #[test]
    fn rejects_generic_traits() {
        let err = expand_str("ConvertComponent, Converter", "pub trait CanConvert<T> { fn convert(&self) -> T; }")
            .unwrap_err();
        assert!(err.to_string().contains("cannot have generic parameters"));
    }

    #[test]
    fn rejects_typed_receivers() {
        let err = expand_str(
            "ConsumeComponent, Consumer",
            "pub trait CanConsume { fn consume(self: Box<Self>); }",
        )
        .unwrap_err();
        assert!(err.to_string().contains("typed `self` receivers"));
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(expand_str("OnlyOne", "pub trait CanRun { fn run(&self); }").is_err());
    }
}
