//! Build-time assertions over delegation tables

/// Assert that a context can use every listed component.
///
/// Fails the build when a component has no entry, or when the registered
/// provider's requirements are not met by the context. The error names the
/// context and the component.
///
/// ```rust,ignore
/// check_components!(Rect: [AreaCalculatorComponent, PerimeterCalculatorComponent]);
/// ```
#[macro_export]
macro_rules! check_components {
    ($context:ty : [ $($component:ty),+ $(,)? ] $(,)?) => {
        const _: () = {
            #[allow(dead_code)]
            fn __wiring_can_use<Context, Component>()
            where
                Context: $crate::CanUseComponent<Component>,
            {
            }

            #[allow(dead_code)]
            fn __wiring_check_components() {
                $( __wiring_can_use::<$context, $component>(); )+
            }
        };
    };
}

/// Assert that `context` resolves `component` to exactly `provider`.
///
/// ```rust,ignore
/// assert_delegation!(Rect, AreaCalculatorComponent => RectangleArea);
/// ```
#[macro_export]
macro_rules! assert_delegation {
    ($context:ty, $component:ty => $provider:ty $(,)?) => {
        const _: () = {
            #[allow(dead_code)]
            fn __wiring_delegates_to<Context, Provider>()
            where
                Context: $crate::DelegateComponent<$component, Delegate = Provider>,
            {
            }

            #[allow(dead_code)]
            fn __wiring_assert_delegation() {
                __wiring_delegates_to::<$context, $provider>();
            }
        };
    };
}
