//! `delegate_components!` expansion
//!
//! Each block names a target type and its entries. Entries become
//! `DelegateComponent` impls; blocks for concrete contexts also get a
//! registration check that every provider implements its component.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::{braced, bracketed, Attribute, Generics, Token, Type};

struct DelegateInput {
    blocks: Vec<TargetBlock>,
}

/// `#[table]? <generics>? Target where ..? { entries }`
struct TargetBlock {
    table: bool,
    generics: Generics,
    target: Type,
    entries: Vec<Entry>,
}

/// `Component: Provider` or `[A, B]: Provider`
struct Entry {
    components: Vec<Type>,
    provider: Type,
}

impl Parse for DelegateInput {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut blocks = Vec::new();
        while !input.is_empty() {
            blocks.push(input.parse()?);
        }
        Ok(Self { blocks })
    }
}

impl Parse for TargetBlock {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut table = false;
        for attr in input.call(Attribute::parse_outer)? {
            if attr.path().is_ident("table") {
                attr.meta.require_path_only()?;
                table = true;
            } else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "unsupported attribute, expected `#[table]`",
                ));
            }
        }

        let mut generics: Generics = if input.peek(Token![<]) {
            input.parse()?
        } else {
            Generics::default()
        };
        let target: Type = input.parse()?;
        if input.peek(Token![where]) {
            generics.where_clause = Some(input.parse()?);
        }

        let content;
        braced!(content in input);
        let entries = content
            .parse_terminated(Entry::parse, Token![,])?
            .into_iter()
            .collect();

        Ok(Self {
            table,
            generics,
            target,
            entries,
        })
    }
}

impl Parse for Entry {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let components: Vec<Type> = if input.peek(syn::token::Bracket) {
            let content;
            let bracket = bracketed!(content in input);
            let components: Vec<Type> = content
                .parse_terminated(Type::parse, Token![,])?
                .into_iter()
                .collect();
            if components.is_empty() {
                return Err(syn::Error::new(
                    bracket.span.join(),
                    "expected at least one component",
                ));
            }
            components
        } else {
            vec![input.parse()?]
        };
        input.parse::<Token![:]>()?;
        let provider = input.parse()?;
        Ok(Self {
            components,
            provider,
        })
    }
}

pub(crate) fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DelegateInput = syn::parse2(input)?;

    let mut output = TokenStream::new();
    let mut errors: Option<syn::Error> = None;
    for block in &merge_blocks(input.blocks) {
        match block.expand() {
            Ok(tokens) => output.extend(tokens),
            Err(error) => match errors.as_mut() {
                Some(existing) => existing.combine(error),
                None => errors = Some(error),
            },
        }
    }

    match errors {
        Some(error) => Err(error),
        None => Ok(output),
    }
}

/// Folds blocks that name the same target (with the same generics) into one,
/// so repeats across blocks collapse and conflicts get the named error.
/// The merged block is checked as a context unless every part is a `#[table]`.
fn merge_blocks(blocks: Vec<TargetBlock>) -> Vec<TargetBlock> {
    let mut merged: Vec<(String, TargetBlock)> = Vec::new();
    for block in blocks {
        let key = block.key();
        match merged.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, target)) => {
                target.table &= block.table;
                target.entries.extend(block.entries);
            }
            None => merged.push((key, block)),
        }
    }
    merged.into_iter().map(|(_, block)| block).collect()
}

impl TargetBlock {
    /// Target identity: the type, its generic parameters and where clause
    fn key(&self) -> String {
        let where_clause = self
            .generics
            .where_clause
            .as_ref()
            .map(|clause| clause.to_token_stream().to_string())
            .unwrap_or_default();
        format!(
            "{}|{}|{}",
            canonical(&self.target),
            self.generics.params.to_token_stream().to_string().replace(' ', ""),
            where_clause.replace(' ', "")
        )
    }

    /// Flattens the entries, collapsing identical repeats and rejecting a
    /// second provider for a component that is already listed.
    fn resolve_entries(&self) -> syn::Result<Vec<(&Type, &Type)>> {
        let mut seen: Vec<(String, String, &Type, &Type)> = Vec::new();
        let mut errors: Option<syn::Error> = None;

        for entry in &self.entries {
            let provider_key = canonical(&entry.provider);
            for component in &entry.components {
                let component_key = canonical(component);
                match seen.iter().find(|(key, ..)| *key == component_key) {
                    Some((_, existing, ..)) if *existing == provider_key => {}
                    Some((_, existing, ..)) => {
                        let error = syn::Error::new_spanned(
                            &entry.provider,
                            format!(
                                "conflicting delegation for component `{component_key}` in \
                                 `{}`: already delegated to `{existing}`, cannot also \
                                 delegate to `{provider_key}`",
                                canonical(&self.target),
                            ),
                        );
                        match errors.as_mut() {
                            Some(errors) => errors.combine(error),
                            None => errors = Some(error),
                        }
                    }
                    None => seen.push((
                        component_key,
                        provider_key.clone(),
                        component,
                        &entry.provider,
                    )),
                }
            }
        }

        match errors {
            Some(error) => Err(error),
            None => Ok(seen
                .into_iter()
                .map(|(_, _, component, provider)| (component, provider))
                .collect()),
        }
    }

    fn expand(&self) -> syn::Result<TokenStream> {
        let entries = self.resolve_entries()?;
        let target = &self.target;
        let (impl_generics, _, where_clause) = self.generics.split_for_impl();

        let impls = entries.iter().map(|(component, provider)| {
            quote! {
                impl #impl_generics ::wiring_core::DelegateComponent<#component> for #target #where_clause {
                    type Delegate = #provider;
                }
            }
        });

        let checks = if self.table || !self.generics.params.is_empty() {
            quote!()
        } else {
            let calls = entries.iter().map(|(component, provider)| {
                quote!(__wiring_provided_by::<#component, #provider, #target>();)
            });
            quote! {
                const _: () = {
                    #[allow(dead_code)]
                    fn __wiring_provided_by<__Component, __Provider, __Context>()
                    where
                        __Component: ::wiring_core::ProvidedBy<__Provider, __Context>,
                    {
                    }

                    #[allow(dead_code)]
                    fn __wiring_check_registration() {
                        #(#calls)*
                    }
                };
            }
        };

        Ok(quote! {
            #(#impls)*
            #checks
        })
    }
}

fn canonical(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}
