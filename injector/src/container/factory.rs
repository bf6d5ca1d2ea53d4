//! Factory functions and factory objects

use super::{Component, Error, FromContainer, Injectable};
use crate::{component::Unsupported, error::BoxError};

/// Describes what a factory function returns.
///
/// A factory function must return exactly one or two results:
/// - a [`Component`], the value to register;
/// - a `Result<V, E>`, the value to register or an error to propagate.
///
/// `()`, pairs without an error and triples are accepted by the type system
/// but rejected at registration.
pub trait FactoryOutput: Sized {
    /// The value produced by the factory function
    type Value: Component;

    /// Number of results the factory function returns
    const RESULTS: usize;

    /// Whether the second result is an error
    const SECOND_IS_ERROR: bool = false;

    /// Splits the output into the produced value or the factory's error
    fn into_result(self) -> Result<Self::Value, BoxError>;
}

impl<V: Component> FactoryOutput for V {
    type Value = V;

    const RESULTS: usize = 1;

    #[inline]
    fn into_result(self) -> Result<Self::Value, BoxError> {
        Ok(self)
    }
}

impl<V, E> FactoryOutput for Result<V, E>
where
    V: Component,
    E: Into<BoxError>
{
    type Value = V;

    const RESULTS: usize = 2;
    const SECOND_IS_ERROR: bool = true;

    #[inline]
    fn into_result(self) -> Result<Self::Value, BoxError> {
        self.map_err(Into::into)
    }
}

impl FactoryOutput for () {
    type Value = Unsupported;

    const RESULTS: usize = 0;

    #[inline]
    fn into_result(self) -> Result<Self::Value, BoxError> {
        Err(Box::new(Error::UnsupportedFactory(std::any::type_name::<Self>())))
    }
}

impl<A: Component, B: 'static> FactoryOutput for (A, B) {
    type Value = A;

    const RESULTS: usize = 2;

    #[inline]
    fn into_result(self) -> Result<Self::Value, BoxError> {
        Err(Box::new(Error::SecondResultNotError(std::any::type_name::<Self>())))
    }
}

impl<A: 'static, B: 'static, C: 'static> FactoryOutput for (A, B, C) {
    type Value = Unsupported;

    const RESULTS: usize = 3;

    #[inline]
    fn into_result(self) -> Result<Self::Value, BoxError> {
        Err(Box::new(Error::UnsupportedFactory(std::any::type_name::<Self>())))
    }
}

/// A trait that describes a factory function whose arguments
/// are resolved by type from the DI container
pub trait FactoryFn<Args: FromContainer> {
    /// What the function returns
    type Output: FactoryOutput;

    /// Calls the function with the resolved arguments
    fn call(self, args: Args) -> Self::Output;
}

macro_rules! define_factory_fn ({ $($param:ident)* } => {
    impl<F, O, $($param,)*> FactoryFn<($($param,)*)> for F
    where
        F: FnOnce($($param),*) -> O,
        O: FactoryOutput,
        ($($param,)*): FromContainer,
    {
        type Output = O;

        #[inline]
        #[allow(non_snake_case)]
        fn call(self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }
});

define_factory_fn! {}
define_factory_fn! { T1 }
define_factory_fn! { T1 T2 }
define_factory_fn! { T1 T2 T3 }
define_factory_fn! { T1 T2 T3 T4 }
define_factory_fn! { T1 T2 T3 T4 T5 }

/// An object that creates a value to register.
///
/// The factory is [`Injectable`]: its own tagged fields are populated
/// from the container before [`Factory::create`] is called.
///
/// # Example
/// ```ignore
/// use injector::{Container, Factory, Injectable, Shared, error::BoxError};
///
/// #[derive(Clone, Injectable)]
/// struct ClientFactory {
///     #[inject("base-url")]
///     base_url: Option<String>,
/// }
///
/// impl Factory for ClientFactory {
///     type Output = Shared<Client>;
///
///     fn create(self) -> Result<Self::Output, BoxError> {
///         let base_url = self.base_url.ok_or("base url is missing")?;
///         Ok(Shared::new(Client::new(base_url)))
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_named("base-url", String::from("http://localhost"));
/// container.register_named_from_factory("client", ClientFactory { base_url: None });
/// ```
pub trait Factory: Injectable + Sized {
    /// The value the factory creates
    type Output: Component;

    /// Creates the value or fails
    fn create(self) -> Result<Self::Output, BoxError>;
}
