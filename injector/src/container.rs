//! Dependency Injection container and tools

use crate::{
    component::{Cast, Component, Descriptor, Erased, Shape, TypeInfo},
    error::Error,
    inject::{Directive, Injectable, Tag, AUTO},
};
use std::{
    any::{Any, type_name},
    collections::HashMap,
    fmt::{Debug, Formatter}
};

pub use self::{
    factory::{Factory, FactoryFn, FactoryOutput},
    from_container::FromContainer,
};

pub mod factory;
pub mod from_container;

const UNNAMED_PREFIX: &str = "unnamed";

/// A registered value together with the types it is assignable to
pub(crate) struct Dependency {
    value: Box<dyn Any + Send + Sync>,
    info: TypeInfo,
    shape: Shape,
    casts: Vec<Cast>,
}

impl Debug for Dependency {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependency")
            .field("type", &self.info.type_name)
            .field("shape", &self.shape)
            .field("casts", &self.casts)
            .finish()
    }
}

impl Dependency {
    #[inline]
    fn new<T: Component>(value: T) -> Self {
        Self {
            value: Box::new(value),
            info: TypeInfo::of::<T>(),
            shape: T::shape(),
            casts: Descriptor::<T>::build().into_casts(),
        }
    }

    #[inline]
    fn is_assignable_to(&self, target: &TypeInfo) -> bool {
        self.casts.iter().any(|cast| cast.target == *target)
    }

    /// Views the stored value as a value of the `target` type
    #[inline]
    fn assign_as(&self, target: &TypeInfo) -> Result<Erased, Error> {
        self.casts.iter()
            .find(|cast| cast.target == *target)
            .and_then(|cast| cast.apply(self.value.as_ref()))
            .ok_or(Error::NotAssignable {
                expected: target.type_name,
                actual: self.info.type_name,
            })
    }
}

/// Markers that tell apart the inputs of [`Container::try_register_named`]
pub mod marker {
    use std::marker::PhantomData;

    /// The input is a [`Component`](crate::Component) value, registered as is
    #[derive(Debug)]
    pub struct Value;

    /// The input is a factory function taking `Args`
    #[derive(Debug)]
    pub struct Function<Args>(PhantomData<Args>);
}

/// An input that turns into a [`Component`] to register:
/// either a value or a factory function
pub trait IntoComponent<Marker> {
    /// The value to register
    type Value: Component;

    /// Produces the value, invoking the factory function if needed
    fn into_component(self, container: &Container) -> Result<Self::Value, Error>;
}

impl<V: Component> IntoComponent<marker::Value> for V {
    type Value = V;

    #[inline]
    fn into_component(self, _: &Container) -> Result<Self::Value, Error> {
        Ok(self)
    }
}

impl<F, Args> IntoComponent<marker::Function<Args>> for F
where
    F: FactoryFn<Args>,
    Args: FromContainer
{
    type Value = <F::Output as FactoryOutput>::Value;

    #[inline]
    fn into_component(self, container: &Container) -> Result<Self::Value, Error> {
        container.invoke(self)
    }
}

/// Represents a DI container that binds values to names
/// and populates tagged fields by name or by type.
///
/// # Example
/// ```ignore
/// use injector::{Container, Injectable, Shared};
///
/// #[derive(Clone, Default, Injectable)]
/// struct Service {
///     #[inject("config")]
///     config: i32,
///     #[inject(auto)]
///     name: Option<String>,
/// }
///
/// let mut container = Container::new();
/// container.register_named("config", 10);
/// container.register(String::from("billing"));
///
/// let service = Shared::new(Service::default());
/// container.register_named("service", service.clone());
///
/// assert_eq!(service.read().config, 10);
/// ```
#[derive(Default)]
pub struct Container {
    /// Registered dependencies by name
    dependencies: HashMap<String, Dependency>,
    /// Suffix of the next generated name
    unnamed_counter: usize,
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, dependency) in &self.dependencies {
            map.entry(name, &dependency.info.type_name);
        }
        map.finish()
    }
}

impl Container {
    /// Creates an empty DI container
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a dependency is registered under the `name`
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    /// Returns the number of registered dependencies
    #[inline]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns `true` if nothing is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Iterates over the registered names, in no particular order
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Registers a value or a factory function under the `name`.
    ///
    /// A factory function is called first, its arguments are resolved by type.
    /// Tagged fields of the value are then populated and the value is bound to the `name`.
    /// Nothing is bound if any of these steps fails.
    pub fn try_register_named<I, M>(&mut self, name: impl Into<String>, input: I) -> Result<(), Error>
    where
        I: IntoComponent<M>
    {
        let name = name.into();
        self.ensure_available(&name)?;

        let value = input.into_component(self)?;
        self.bind(name, value)
    }

    /// Registers a value or a factory function under a generated name
    /// and returns that name.
    ///
    /// Names are `unnamed.0`, `unnamed.1` and so on, names already taken are skipped.
    pub fn try_register<I, M>(&mut self, input: I) -> Result<String, Error>
    where
        I: IntoComponent<M>
    {
        let name = self.next_generated_name();
        self.try_register_named(name.clone(), input)?;
        Ok(name)
    }

    /// Populates the `factory`, creates a value with it
    /// and registers that value under the `name`.
    pub fn try_register_named_from_factory<F: Factory>(&mut self, name: impl Into<String>, mut factory: F) -> Result<(), Error> {
        self.try_inject(&mut factory)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("creating a dependency with {}", type_name::<F>());

        let value = factory.create().map_err(Error::Factory)?;

        let name = name.into();
        self.ensure_available(&name)?;
        self.bind(name, value)
    }

    /// Populates the `factory`, creates a value with it
    /// and registers that value under a generated name.
    pub fn try_register_from_factory<F: Factory>(&mut self, factory: F) -> Result<String, Error> {
        let name = self.next_generated_name();
        self.try_register_named_from_factory(name.clone(), factory)?;
        Ok(name)
    }

    /// Returns the value registered under the `name` as a `T`.
    ///
    /// The `T` is either the type of the registered value or one of its capabilities.
    /// Shared records come back as handles to the same record.
    pub fn try_get<T: 'static>(&self, name: &str) -> Result<T, Error> {
        let dependency = self.dependencies
            .get(name)
            .ok_or_else(|| Error::NotFound(name.into()))?;
        Self::downcast(dependency, &TypeInfo::of::<T>())
    }

    /// Resolves the only registered value assignable to `T`
    pub fn try_resolve<T: 'static>(&self) -> Result<T, Error> {
        let target = TypeInfo::of::<T>();
        let dependency = self.find_by_type(&target)?;
        Self::downcast(dependency, &target)
    }

    /// Populates tagged fields of the `object` without registering it
    #[inline]
    pub fn try_inject<T: Injectable>(&self, object: &mut T) -> Result<(), Error> {
        self.populate_fields(type_name::<T>(), T::tags(), |field, value| object.assign(field, value))
    }

    /// Same as [`Container::try_register_named`] but panics on error
    #[track_caller]
    pub fn register_named<I, M>(&mut self, name: impl Into<String>, input: I)
    where
        I: IntoComponent<M>
    {
        self.try_register_named(name, input)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Same as [`Container::try_register`] but panics on error
    #[track_caller]
    pub fn register<I, M>(&mut self, input: I) -> String
    where
        I: IntoComponent<M>
    {
        self.try_register(input)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Same as [`Container::try_register_named_from_factory`] but panics on error
    #[track_caller]
    pub fn register_named_from_factory<F: Factory>(&mut self, name: impl Into<String>, factory: F) {
        self.try_register_named_from_factory(name, factory)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Same as [`Container::try_register_from_factory`] but panics on error
    #[track_caller]
    pub fn register_from_factory<F: Factory>(&mut self, factory: F) -> String {
        self.try_register_from_factory(factory)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Same as [`Container::try_get`] but panics on error
    #[track_caller]
    pub fn get<T: 'static>(&self, name: &str) -> T {
        self.try_get(name)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Same as [`Container::try_resolve`] but panics on error
    #[track_caller]
    pub fn resolve<T: 'static>(&self) -> T {
        self.try_resolve()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Same as [`Container::try_inject`] but panics on error
    #[track_caller]
    pub fn inject<T: Injectable>(&self, object: &mut T) {
        self.try_inject(object)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    #[inline]
    fn ensure_available(&self, name: &str) -> Result<(), Error> {
        if self.dependencies.contains_key(name) {
            return Err(Error::DuplicateName(name.into()));
        }
        if name == AUTO {
            return Err(Error::ReservedName(name.into()));
        }
        Ok(())
    }

    /// Populates the `value` and binds it to the `name`
    fn bind<V: Component>(&mut self, name: String, mut value: V) -> Result<(), Error> {
        self.populate(&mut value)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("registered dependency {name}: {}", type_name::<V>());

        self.dependencies.insert(name, Dependency::new(value));
        Ok(())
    }

    fn next_generated_name(&mut self) -> String {
        loop {
            let name = format!("{UNNAMED_PREFIX}.{}", self.unnamed_counter);
            if !self.dependencies.contains_key(&name) {
                return name;
            }
            self.unnamed_counter += 1;
        }
    }

    /// Calls the factory function with arguments resolved by type
    fn invoke<F, Args>(&self, factory: F) -> Result<<F::Output as FactoryOutput>::Value, Error>
    where
        F: FactoryFn<Args>,
        Args: FromContainer
    {
        let results = <F::Output as FactoryOutput>::RESULTS;
        if !(1..=2).contains(&results) {
            return Err(Error::UnsupportedFactory(type_name::<F>()));
        }
        if results == 2 && !<F::Output as FactoryOutput>::SECOND_IS_ERROR {
            return Err(Error::SecondResultNotError(type_name::<F::Output>()));
        }

        let args = Args::from_container(self)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("calling factory function {}", type_name::<F>());

        FactoryFn::call(factory, args)
            .into_result()
            .map_err(Error::Factory)
    }

    /// Populates tagged fields of a value that is about to be registered
    fn populate<V: Component>(&self, value: &mut V) -> Result<(), Error> {
        let tags = V::record_tags();
        if V::shape() != Shape::RecordRef {
            return if tags.is_empty() {
                Ok(())
            } else {
                Err(Error::NotInjectable(type_name::<V>()))
            };
        }
        self.populate_fields(type_name::<V>(), tags, |field, erased| value.assign_field(field, erased))
    }

    /// Resolves every tag and assigns the result with `assign`.
    ///
    /// Fields assigned before a failing one stay assigned.
    fn populate_fields<A>(&self, _record: &'static str, tags: Vec<Tag>, mut assign: A) -> Result<(), Error>
    where
        A: FnMut(&str, Erased) -> Result<(), Erased>
    {
        for tag in tags {
            let (dependency, target) = self.lookup(&tag)?;
            let value = dependency.assign_as(&target)?;

            #[cfg(feature = "tracing")]
            tracing::trace!("injecting {}.{} ({:?})", _record, tag.field(), tag.directive());

            assign(tag.field(), value).map_err(|_| Error::NotAssignable {
                expected: target.type_name,
                actual: dependency.info.type_name,
            })?;
        }
        Ok(())
    }

    /// Finds the dependency of a tag and the type it is assigned as.
    ///
    /// The fallback type of the tag is tried only if nothing matches the target type.
    fn lookup(&self, tag: &Tag) -> Result<(&Dependency, TypeInfo), Error> {
        let target = tag.target();
        match (tag.directive(), tag.fallback()) {
            (Directive::ByType, None) => self.find_by_type(&target).map(|found| (found, target)),
            (Directive::ByType, Some(fallback)) => match self.find_by_type(&target) {
                Err(Error::NotFoundForType(_)) => match self.find_by_type(&fallback) {
                    Ok(found) => Ok((found, fallback)),
                    Err(Error::NotFoundForType(_)) => Err(Error::NotFoundForType(target.type_name)),
                    Err(err) => Err(err),
                },
                found => found.map(|found| (found, target)),
            },
            (Directive::ByName(name), fallback) => {
                let found = self.dependencies
                    .get(name)
                    .ok_or_else(|| Error::NotRegistered(name.clone()))?;
                match fallback {
                    Some(fallback) if !found.is_assignable_to(&target) && found.is_assignable_to(&fallback) => {
                        Ok((found, fallback))
                    },
                    _ => Ok((found, target)),
                }
            }
        }
    }

    /// Finds the only dependency assignable to the `target`
    fn find_by_type(&self, target: &TypeInfo) -> Result<&Dependency, Error> {
        let mut found = None;
        for dependency in self.dependencies.values() {
            if !dependency.is_assignable_to(target) {
                continue;
            }
            if found.is_some() {
                return Err(Error::AmbiguousType(target.type_name));
            }
            found = Some(dependency);
        }
        found.ok_or(Error::NotFoundForType(target.type_name))
    }

    #[inline]
    fn downcast<T: 'static>(dependency: &Dependency, target: &TypeInfo) -> Result<T, Error> {
        dependency
            .assign_as(target)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::NotAssignable {
                expected: target.type_name,
                actual: dependency.info.type_name,
            })
    }
}
