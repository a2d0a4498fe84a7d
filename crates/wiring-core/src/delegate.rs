//! Delegation traits
//!
//! The build-time registry is nothing more than trait impls:
//! `impl DelegateComponent<Component> for Context { type Delegate = Provider; }`
//! is one entry, coherence guarantees at most one entry per pair, and the
//! trait solver performs the lookup.

use crate::entry::DelegationEntry;
use std::any::type_name;

/// One delegation entry: `Self` resolves `Component` to `Self::Delegate`.
///
/// Implemented by [`delegate_components!`](crate::delegate_components) for
/// contexts and for tables. A type without an entry for a component simply
/// does not implement this trait, so every use of the component on that type
/// fails to build.
#[diagnostic::on_unimplemented(
    message = "no provider registered for component `{Component}` in `{Self}`",
    label = "`{Self}` does not delegate `{Component}`",
    note = "register one with `delegate_components!`"
)]
pub trait DelegateComponent<Component> {
    /// The provider (or table) selected for `Component`
    type Delegate;
}

/// Links a component marker to its provider trait.
///
/// `Component: ProvidedBy<Provider, Context>` holds exactly when `Provider`
/// implements the component's provider trait for `Context`. Generated by
/// [`capability`](crate::capability); implemented on the marker so that the
/// orphan rules allow it in the crate that declares the capability.
#[diagnostic::on_unimplemented(
    message = "`{Provider}` does not provide component `{Self}` for `{Context}`",
    label = "provider requirements not met",
    note = "check that `{Context}` implements everything `{Provider}` requires"
)]
pub trait ProvidedBy<Provider, Context> {}

/// A context that can use `Component`: it has an entry, and the entry's
/// delegate implements the component for this context.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot use component `{Component}`",
    label = "missing or unusable delegation",
    note = "register a provider for `{Component}` on `{Self}` and make sure its requirements are met"
)]
pub trait CanUseComponent<Component> {}

impl<Context, Component> CanUseComponent<Component> for Context
where
    Context: DelegateComponent<Component>,
    Component: ProvidedBy<<Context as DelegateComponent<Component>>::Delegate, Context>,
{
}

/// Build-time lookup: the delegate registered for `Component` on `Context`.
///
/// For a context that delegates to a table this is the table; the table's own
/// entry is `Resolved<Table, Component>`.
pub type Resolved<Context, Component> = <Context as DelegateComponent<Component>>::Delegate;

/// Describe the entry registered for `Component` on `Context` using full type
/// names. Only compiles when the entry exists.
#[must_use]
pub fn describe<Context, Component>() -> DelegationEntry
where
    Context: DelegateComponent<Component>,
{
    DelegationEntry::new(
        type_name::<Context>(),
        type_name::<Component>(),
        type_name::<Resolved<Context, Component>>(),
    )
}
