//! Type descriptors of registrable values

use crate::inject::Tag;
use std::{
    any::{Any, TypeId, type_name},
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
    sync::Arc
};

/// A type-erased value on its way into a field or out of the container
pub type Erased = Box<dyn Any + Send>;

/// Type name and type id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    /// Name of the type, as reported by [`std::any::type_name`]
    pub type_name: &'static str,
    /// Id of the type
    pub type_id: TypeId,
}

impl Display for TypeInfo {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}

impl TypeInfo {
    /// Describes the `T`
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Structural shape of a registrable value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// An opaque value without injectable fields
    Value,
    /// A record handed over by value, its fields can't be assigned in place
    Record,
    /// A shared mutable handle to a record, see [`Shared`](crate::Shared)
    RecordRef,
}

type CastFn = Box<
    dyn Fn(&(dyn Any + Send + Sync)) -> Option<Erased>
    + Send
    + Sync
>;

/// A way of viewing a stored value as a value of the `target` type
pub(crate) struct Cast {
    pub(crate) target: TypeInfo,
    cast: CastFn,
}

impl Debug for Cast {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cast({})", self.target)
    }
}

impl Cast {
    #[inline]
    pub(crate) fn apply(&self, value: &(dyn Any + Send + Sync)) -> Option<Erased> {
        (self.cast)(value)
    }
}

/// Lists the types a value of `T` is assignable to.
///
/// Every value is assignable to its own type. [`Component::describe`] may add
/// capabilities, e.g. a trait object the type implements.
pub struct Descriptor<T> {
    casts: Vec<Cast>,
    _marker: PhantomData<fn(&T)>,
}

impl<T> Debug for Descriptor<T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.casts).finish()
    }
}

impl<T: Component> Descriptor<T> {
    /// Builds the descriptor of `T` out of its [`Component`] implementation
    pub(crate) fn build() -> Self {
        let mut descriptor = Self { casts: Vec::new(), _marker: PhantomData };
        descriptor.provide(T::clone);
        T::describe(&mut descriptor);
        descriptor
    }

    /// Declares that a value of `T` can be viewed as a `U`
    ///
    /// # Example
    /// ```ignore
    /// use std::sync::Arc;
    /// use injector::{Component, Descriptor};
    ///
    /// trait Log: Send + Sync {}
    ///
    /// #[derive(Clone)]
    /// struct ConsoleLogger;
    ///
    /// impl Log for ConsoleLogger {}
    ///
    /// impl Component for ConsoleLogger {
    ///     fn describe(descriptor: &mut Descriptor<Self>) {
    ///         descriptor.provide(|logger: &Self| -> Arc<dyn Log> { Arc::new(logger.clone()) });
    ///     }
    /// }
    /// ```
    pub fn provide<U: Send + 'static>(&mut self, cast: fn(&T) -> U) -> &mut Self {
        let target = TypeInfo::of::<U>();
        // the last declaration of a target wins
        self.casts.retain(|c| c.target != target);
        self.casts.push(Cast {
            target,
            cast: Box::new(move |value| value
                .downcast_ref::<T>()
                .map(|value| Box::new(cast(value)) as Erased))
        });
        self
    }

    #[inline]
    pub(crate) fn into_casts(self) -> Vec<Cast> {
        self.casts
    }
}

/// A type-descriptor of values that can be registered in the [`Container`](crate::Container)
///
/// Plain values use the defaults, so implementing it is a one-liner,
/// see the [`component!`](crate::component) macro.
/// Records are described by the [`Injectable`](crate::Injectable) trait
/// and registered either by value or through a [`Shared`](crate::Shared) handle.
pub trait Component: Clone + Send + Sync + 'static {
    /// Structural shape of `Self`
    #[inline]
    fn shape() -> Shape {
        Shape::Value
    }

    /// Injection tags of the underlying record
    #[inline]
    fn record_tags() -> Vec<Tag> {
        Vec::new()
    }

    /// Assigns a resolved value into the `field` of the underlying record.
    ///
    /// Gives the value back if there is no such field or its type differs.
    #[inline]
    fn assign_field(&mut self, field: &str, value: Erased) -> Result<(), Erased> {
        let _ = field;
        Err(value)
    }

    /// Declares additional types a value of `Self` is assignable to
    #[inline]
    fn describe(descriptor: &mut Descriptor<Self>) {
        let _ = descriptor;
    }
}

/// Uninhabited value of factory functions that return an unsupported number of results
#[derive(Debug, Clone, Copy)]
pub enum Unsupported {}

impl Component for Unsupported {}

/// A `component!` macro that implements the [`Component`] trait with the defaults
/// for one or more plain value types.
///
/// # Macro Syntax
/// ```ignore
/// component! {
///     Type1,
///     Type2,
///     …
///     TypeN
/// };
/// ```
///
/// # Example
/// ```ignore
/// use injector::{component, Container};
///
/// #[derive(Clone)]
/// struct Config { verbose: bool }
///
/// component! { Config }
///
/// let mut container = Container::new();
/// container.register_named("config", Config { verbose: true });
/// ```
#[macro_export]
macro_rules! component {
    ($($name:ty),* $(,)?) => {
        $(impl $crate::Component for $name {})*
    };
}

component! {
    bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String, &'static str,
    std::time::Duration,
}

impl<T: Clone + Send + Sync + 'static> Component for Vec<T> {}

impl<T: Clone + Send + Sync + 'static> Component for Option<T> {}

impl<T: ?Sized + Send + Sync + 'static> Component for Arc<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greet: Send + Sync {
        fn greet(&self) -> String;
    }

    #[derive(Clone)]
    struct English;

    impl Greet for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    impl Component for English {
        fn describe(descriptor: &mut Descriptor<Self>) {
            descriptor.provide(|english: &Self| -> Arc<dyn Greet> { Arc::new(english.clone()) });
        }
    }

    #[test]
    fn it_describes_plain_values_by_identity() {
        let casts = Descriptor::<i32>::build().into_casts();

        assert_eq!(casts.len(), 1);
        assert_eq!(casts[0].target, TypeInfo::of::<i32>());

        let value: Box<dyn Any + Send + Sync> = Box::new(10_i32);
        let cloned = casts[0].apply(value.as_ref()).unwrap();

        assert_eq!(*cloned.downcast::<i32>().unwrap(), 10);
    }

    #[test]
    fn it_describes_capabilities() {
        let casts = Descriptor::<English>::build().into_casts();

        assert_eq!(casts.len(), 2);
        assert_eq!(casts[1].target, TypeInfo::of::<Arc<dyn Greet>>());

        let value: Box<dyn Any + Send + Sync> = Box::new(English);
        let greeter = casts[1].apply(value.as_ref()).unwrap();
        let greeter = greeter.downcast::<Arc<dyn Greet>>().unwrap();

        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn it_does_not_cast_foreign_values() {
        let casts = Descriptor::<English>::build().into_casts();

        let value: Box<dyn Any + Send + Sync> = Box::new("English");

        assert!(casts.iter().all(|cast| cast.apply(value.as_ref()).is_none()));
    }

    #[test]
    fn it_has_value_shape_by_default() {
        assert_eq!(<String as Component>::shape(), Shape::Value);
        assert!(<Arc<dyn Greet> as Component>::record_tags().is_empty());
    }

    #[test]
    fn it_rejects_field_assignment_for_values() {
        let mut value = 1_u8;

        assert!(value.assign_field("field", Box::new(2_u8)).is_err());
        assert_eq!(value, 1);
    }
}
