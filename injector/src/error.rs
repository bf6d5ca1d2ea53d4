//! Describes dependency injection errors

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter}
};

/// A boxed error produced by a factory function or a [`Factory`](crate::Factory)
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors produced while registering, resolving or injecting dependencies
#[derive(Debug)]
pub enum Error {
    /// A dependency with this name is already registered
    DuplicateName(String),
    /// The name is reserved for resolving by type
    ReservedName(String),
    /// Nothing is registered under the requested name
    NotFound(String),
    /// A record carrying injection tags was handed over by value
    NotInjectable(&'static str),
    /// A field requested a name that is not registered
    NotRegistered(String),
    /// The resolved value can't be assigned to the requested type
    NotAssignable {
        /// Type requested by the field or the caller
        expected: &'static str,
        /// Type of the registered value
        actual: &'static str,
    },
    /// A factory function must return exactly one or two results
    UnsupportedFactory(&'static str),
    /// The second result of a factory function must be an error
    SecondResultNotError(&'static str),
    /// No registered value is assignable to the requested type
    NotFoundForType(&'static str),
    /// More than one registered value is assignable to the requested type
    AmbiguousType(&'static str),
    /// A failure reported by a factory, propagated as is
    Factory(BoxError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateName(name) => write!(f, "injector: {name} is already registered"),
            Error::ReservedName(name) => write!(f, "injector: {name} is reserved, please use a different name"),
            Error::NotFound(name) => write!(f, "injector: the requested dependency couldn't be found: {name}"),
            Error::NotInjectable(type_name) => write!(f, "injector: {type_name} is not injectable, a shared reference is expected"),
            Error::NotRegistered(name) => write!(f, "injector: {name} is not registered"),
            Error::NotAssignable { expected, actual } => write!(f, "injector: {expected} is not assignable from {actual}"),
            Error::UnsupportedFactory(type_name) => write!(f, "injector: unsupported factory function: {type_name}"),
            Error::SecondResultNotError(type_name) => write!(f, "injector: 2nd result of a factory function must be an error: {type_name}"),
            Error::NotFoundForType(type_name) => write!(f, "injector: couldn't find the dependency for {type_name}"),
            Error::AmbiguousType(type_name) => write!(f, "injector: there is a conflict when finding the dependency for {type_name}"),
            Error::Factory(err) => Display::fmt(err, f),
        }
    }
}

impl StdError for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Factory(err) => err.source(),
            _ => None,
        }
    }
}

impl Error {
    /// Returns the error produced by a factory, if this is one
    #[inline]
    pub fn factory_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Error::Factory(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
