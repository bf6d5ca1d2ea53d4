//! Injection tags and records that receive dependencies

use crate::component::{Component, Descriptor, Erased, Shape, TypeInfo};
use std::{
    fmt::{Debug, Formatter},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard}
};

/// The tag value that requests resolving a field by its type
pub const AUTO: &str = "auto";

/// How a tagged field is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Look up the dependency registered under this name
    ByName(String),
    /// Look up the only dependency assignable to the field's type
    ByType,
}

impl From<&str> for Directive {
    #[inline]
    fn from(tag: &str) -> Self {
        if tag == AUTO {
            Directive::ByType
        } else {
            Directive::ByName(tag.to_owned())
        }
    }
}

/// Injection tag of a record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    field: &'static str,
    directive: Directive,
    target: TypeInfo,
    fallback: Option<TypeInfo>,
}

impl Tag {
    /// Creates a tag for the `field` that receives a `T`.
    ///
    /// The `tag` is either a dependency name or `auto` to resolve by type.
    #[inline]
    pub fn new<T: 'static>(field: &'static str, tag: &str) -> Self {
        Self { field, directive: Directive::from(tag), target: TypeInfo::of::<T>(), fallback: None }
    }

    /// Creates a tag for the `field` that receives the dependency registered under `name`
    #[inline]
    pub fn by_name<T: 'static>(field: &'static str, name: impl Into<String>) -> Self {
        Self { field, directive: Directive::ByName(name.into()), target: TypeInfo::of::<T>(), fallback: None }
    }

    /// Creates a tag for the `field` that receives the only dependency assignable to `T`
    #[inline]
    pub fn by_type<T: 'static>(field: &'static str) -> Self {
        Self { field, directive: Directive::ByType, target: TypeInfo::of::<T>(), fallback: None }
    }

    /// Adds a type the field also accepts when nothing matches the target type,
    /// e.g. `T` for an `Option<T>` field
    #[inline]
    pub fn with_fallback<U: 'static>(mut self) -> Self {
        self.fallback = Some(TypeInfo::of::<U>());
        self
    }

    /// Name of the tagged field
    #[inline]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// How the field is resolved
    #[inline]
    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    /// The type the field receives
    #[inline]
    pub fn target(&self) -> TypeInfo {
        self.target
    }

    /// The type tried when nothing matches the target type
    #[inline]
    pub fn fallback(&self) -> Option<TypeInfo> {
        self.fallback
    }
}

/// A record whose tagged fields are populated from the [`Container`](crate::Container)
///
/// Usually derived with `#[derive(Injectable)]` (the `macros` feature),
/// but it can also be implemented by hand:
///
/// # Example
/// ```ignore
/// use injector::{Container, Erased, Injectable, Shared, Tag};
///
/// #[derive(Default)]
/// struct Service {
///     retries: i32,
///     name: Option<String>,
/// }
///
/// impl Injectable for Service {
///     fn tags() -> Vec<Tag> {
///         vec![
///             Tag::new::<i32>("retries", "auto"),
///             Tag::new::<String>("name", "service-name"),
///         ]
///     }
///
///     fn assign(&mut self, field: &str, value: Erased) -> Result<(), Erased> {
///         match field {
///             "retries" => self.retries = *value.downcast::<i32>()?,
///             "name" => self.name = Some(*value.downcast::<String>()?),
///             _ => return Err(value),
///         }
///         Ok(())
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_named("service-name", String::from("billing"));
/// container.register(3);
/// container.register_named("service", Shared::new(Service::default()));
/// ```
pub trait Injectable: Send + Sync + 'static {
    /// Tagged fields, in declaration order
    fn tags() -> Vec<Tag>;

    /// Assigns the resolved value into the `field`.
    ///
    /// Gives the value back if there is no such field or its type differs.
    fn assign(&mut self, field: &str, value: Erased) -> Result<(), Erased>;

    /// Declares additional types a [`Shared`] handle of `Self` is assignable to
    #[inline]
    fn describe_shared(descriptor: &mut Descriptor<Shared<Self>>)
    where
        Self: Sized
    {
        let _ = descriptor;
    }
}

/// A shared mutable handle to a record.
///
/// Clones point to the same record, so fields populated by the container
/// are visible through every clone.
pub struct Shared<T: ?Sized>(Arc<RwLock<T>>);

impl<T: ?Sized> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized + Debug> Debug for Shared<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Shared").field(&&*self.read()).finish()
    }
}

impl<T: Default> Default for Shared<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Shared<T> {
    /// Wraps the `value` into a new shared handle
    #[inline]
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }
}

impl<T: ?Sized> Shared<T> {
    /// Creates a handle from an existing shared lock,
    /// e.g. an `Arc<RwLock<T>>` coerced to an `Arc<RwLock<dyn Trait>>`
    #[inline]
    pub fn from_arc(inner: Arc<RwLock<T>>) -> Self {
        Self(inner)
    }

    /// Returns the underlying shared lock
    #[inline]
    pub fn as_arc(&self) -> &Arc<RwLock<T>> {
        &self.0
    }

    /// Locks the record for reading
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the record for writing
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both handles point to the same record
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Injectable> Component for Shared<T> {
    #[inline]
    fn shape() -> Shape {
        Shape::RecordRef
    }

    #[inline]
    fn record_tags() -> Vec<Tag> {
        T::tags()
    }

    #[inline]
    fn assign_field(&mut self, field: &str, value: Erased) -> Result<(), Erased> {
        self.write().assign(field, value)
    }

    #[inline]
    fn describe(descriptor: &mut Descriptor<Self>) {
        T::describe_shared(descriptor);
    }
}
