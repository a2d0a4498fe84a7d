//! Wiring Macros
//!
//! Procedural macros behind the delegation registry. Use them through the
//! re-exports in `wiring_core`; the generated code refers to `::wiring_core`.
//!
//! - [`macro@capability`]: turns a consumer trait into a capability (component
//!   marker, provider trait and blanket wiring)
//! - [`delegate_components!`]: registers providers for a context or table

#![warn(missing_docs)]

use proc_macro::TokenStream;

mod capability;
mod delegate;

/// Declare a capability from a consumer trait.
///
/// `#[capability(ComponentName, ProviderTrait)]` keeps the trait as written and
/// generates:
/// - `struct ComponentName;` naming the capability
/// - `trait ProviderTrait<Context>` whose methods take the context explicitly
/// - a blanket impl of the consumer trait for every context that delegates
///   `ComponentName` to a provider implementing `ProviderTrait<Context>`
/// - a blanket impl of `ProviderTrait` for delegation tables
/// - a `ProvidedBy` impl used by registration checks
///
/// ```rust,ignore
/// #[capability(AreaCalculatorComponent, AreaCalculator)]
/// pub trait CanCalculateArea {
///     fn area(&self) -> f64;
/// }
/// ```
#[proc_macro_attribute]
pub fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    capability::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Register providers for a context (or a shared table).
///
/// ```rust,ignore
/// delegate_components! {
///     Rect {
///         AreaCalculatorComponent: RectangleArea,
///         [PerimeterCalculatorComponent, DiagonalComponent]: RectangleGeometry,
///     }
///
///     #[table]
///     PolygonPreset {
///         AreaCalculatorComponent: RectangleArea,
///     }
/// }
/// ```
///
/// Listing the same component twice with the same provider is accepted once;
/// listing it with a different provider is an error naming the context and
/// the component. For concrete contexts the macro also checks, at the point of
/// registration, that each provider implements its component for the context.
/// `#[table]` skips that check for tables that are not contexts themselves.
#[proc_macro]
pub fn delegate_components(input: TokenStream) -> TokenStream {
    delegate::expand(input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
