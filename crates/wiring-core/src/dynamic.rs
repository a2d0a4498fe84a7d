//! Dynamic Registry
//!
//! The runtime counterpart of the delegation table. Providers are selected per
//! `(context type, component)` pair at run time and invoked through type-erased
//! handlers. The rules match the static table: one provider per pair,
//! identical re-registration is a no-op, a second provider is a conflict and
//! an unregistered pair is reported as missing. Failures come back as
//! [`DelegationError`] values instead of build errors.
//!
//! # Example
//!
//! ```rust
//! use wiring_core::DynamicRegistry;
//!
//! struct Rect { width: f64, height: f64 }
//! struct AreaComponent;
//! struct RectangleArea;
//!
//! let registry = DynamicRegistry::new();
//! registry
//!     .register::<Rect, AreaComponent, RectangleArea, _, _>(|rect: &Rect, ()| rect.width * rect.height)
//!     .unwrap();
//!
//! let area: f64 = registry
//!     .invoke::<Rect, AreaComponent, (), f64>(&Rect { width: 3.0, height: 4.0 }, ())
//!     .unwrap();
//! assert_eq!(area, 12.0);
//! ```

use crate::delegate::{DelegateComponent, Resolved};
use crate::entry::DelegationEntry;
use crate::error::DelegationError;
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handler stored for a pair, before erasure
type Handler<Context, Args, Output> = Box<dyn Fn(&Context, Args) -> Output + Send + Sync>;

/// Registry key: `(context type, component type)`
type PairKey = (TypeId, TypeId);

#[derive(Clone)]
struct Registration {
    entry: DelegationEntry,
    provider_id: TypeId,
    handler_id: TypeId,
    handler: Arc<dyn Any + Send + Sync>,
}

/// Thread-safe runtime delegation table
#[derive(Default)]
pub struct DynamicRegistry {
    entries: RwLock<HashMap<PairKey, Registration>>,
}

impl DynamicRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `Provider` for `Component` on `Context` with the handler that
    /// implements it.
    ///
    /// # Errors
    /// - [`DelegationError::ConflictingResolution`] if a different provider is
    ///   already registered for the pair
    /// - [`DelegationError::SignatureMismatch`] if the same provider is
    ///   registered again with different `Args` or `Output` types
    ///
    /// Registering the same provider with the same signature again is accepted
    /// and keeps the original handler.
    pub fn register<Context, Component, Provider, Args, Output>(
        &self,
        handler: impl Fn(&Context, Args) -> Output + Send + Sync + 'static,
    ) -> Result<(), DelegationError>
    where
        Context: 'static,
        Component: 'static,
        Provider: 'static,
        Args: 'static,
        Output: 'static,
    {
        let key = pair_key::<Context, Component>();
        let provider_id = TypeId::of::<Provider>();
        let handler_id = TypeId::of::<Handler<Context, Args, Output>>();
        let mut entries = self.entries.write();

        if let Some(existing) = entries.get(&key) {
            if existing.provider_id == provider_id {
                if existing.handler_id != handler_id {
                    let error = signature_mismatch::<Context, Component, Args, Output>();
                    tracing::warn!(%error, "registration rejected");
                    return Err(error);
                }
                tracing::debug!(entry = %existing.entry, "identical registration ignored");
                return Ok(());
            }
            let error = DelegationError::conflict(
                type_name::<Context>(),
                type_name::<Component>(),
                existing.entry.provider.clone(),
                type_name::<Provider>(),
            );
            tracing::warn!(%error, "registration rejected");
            return Err(error);
        }

        let handler: Handler<Context, Args, Output> = Box::new(handler);
        let entry = DelegationEntry::new(
            type_name::<Context>(),
            type_name::<Component>(),
            type_name::<Provider>(),
        );
        tracing::debug!(%entry, "provider registered");
        entries.insert(
            key,
            Registration {
                entry,
                provider_id,
                handler_id,
                handler: Arc::new(handler),
            },
        );
        Ok(())
    }

    /// Register the provider that the static table resolves for the pair, so
    /// the runtime path agrees with the compile-time one.
    ///
    /// # Errors
    /// Same as [`register`](Self::register).
    pub fn mirror_static<Context, Component, Args, Output>(
        &self,
        handler: impl Fn(&Context, Args) -> Output + Send + Sync + 'static,
    ) -> Result<(), DelegationError>
    where
        Context: DelegateComponent<Component> + 'static,
        Component: 'static,
        Resolved<Context, Component>: 'static,
        Args: 'static,
        Output: 'static,
    {
        self.register::<Context, Component, Resolved<Context, Component>, Args, Output>(handler)
    }

    /// Look up the entry for a pair.
    ///
    /// # Errors
    /// Returns [`DelegationError::MissingResolution`] if nothing is registered.
    pub fn resolve<Context, Component>(&self) -> Result<DelegationEntry, DelegationError>
    where
        Context: 'static,
        Component: 'static,
    {
        self.entries
            .read()
            .get(&pair_key::<Context, Component>())
            .map(|registration| registration.entry.clone())
            .ok_or_else(|| DelegationError::missing(type_name::<Context>(), type_name::<Component>()))
    }

    /// Check whether `Provider` is the one registered for the pair
    #[must_use]
    pub fn resolves_to<Context, Component, Provider>(&self) -> bool
    where
        Context: 'static,
        Component: 'static,
        Provider: 'static,
    {
        self.entries
            .read()
            .get(&pair_key::<Context, Component>())
            .is_some_and(|registration| registration.provider_id == TypeId::of::<Provider>())
    }

    /// Check whether the pair has a provider
    #[inline]
    #[must_use]
    pub fn contains<Context, Component>(&self) -> bool
    where
        Context: 'static,
        Component: 'static,
    {
        self.entries
            .read()
            .contains_key(&pair_key::<Context, Component>())
    }

    /// Invoke the provider registered for the pair.
    ///
    /// The lock is released before the handler runs, so handlers may use the
    /// registry themselves.
    ///
    /// # Errors
    /// - [`DelegationError::MissingResolution`] if nothing is registered
    /// - [`DelegationError::SignatureMismatch`] if the handler was registered
    ///   with different `Args` or `Output` types
    pub fn invoke<Context, Component, Args, Output>(
        &self,
        context: &Context,
        args: Args,
    ) -> Result<Output, DelegationError>
    where
        Context: 'static,
        Component: 'static,
        Args: 'static,
        Output: 'static,
    {
        let handler = self
            .entries
            .read()
            .get(&pair_key::<Context, Component>())
            .map(|registration| Arc::clone(&registration.handler))
            .ok_or_else(|| DelegationError::missing(type_name::<Context>(), type_name::<Component>()))?;

        let handler = handler
            .downcast_ref::<Handler<Context, Args, Output>>()
            .ok_or_else(signature_mismatch::<Context, Component, Args, Output>)?;

        Ok(handler(context, args))
    }

    /// All entries, sorted by context then component
    #[must_use]
    pub fn manifest(&self) -> Vec<DelegationEntry> {
        let mut entries: Vec<DelegationEntry> = self
            .entries
            .read()
            .values()
            .map(|registration| registration.entry.clone())
            .collect();
        entries.sort();
        entries
    }

    /// Number of registered pairs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for DynamicRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRegistry")
            .field("entries", &self.manifest())
            .finish()
    }
}

fn pair_key<Context: 'static, Component: 'static>() -> PairKey {
    (TypeId::of::<Context>(), TypeId::of::<Component>())
}

fn signature_mismatch<Context, Component, Args, Output>() -> DelegationError {
    DelegationError::SignatureMismatch {
        context: type_name::<Context>().to_string(),
        component: type_name::<Component>().to_string(),
        expected: format!(
            "fn(&{}, {}) -> {}",
            type_name::<Context>(),
            type_name::<Args>(),
            type_name::<Output>()
        ),
    }
}
