//! A dependency injection container that binds values to names
//! and populates tagged fields of records by name or by type.
//!
//! # Example
//! ```ignore
//! use injector::{Container, Injectable, Shared};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Clone, Default, Injectable)]
//! #[provides(dyn Greeter)]
//! struct English {
//!     #[inject("punctuation")]
//!     punctuation: String,
//! }
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         format!("hello{}", self.punctuation)
//!     }
//! }
//!
//! #[derive(Clone, Default, Injectable)]
//! struct Service {
//!     #[inject(auto)]
//!     greeter: Option<Shared<dyn Greeter>>,
//! }
//!
//! let mut container = Container::new();
//! container.register_named("punctuation", String::from("!"));
//! container.register(Shared::new(English::default()));
//!
//! let mut service = Service::default();
//! container.inject(&mut service);
//! ```

pub use crate::{
    component::{Component, Descriptor, Erased, Shape, TypeInfo, Unsupported},
    container::{
        Container,
        IntoComponent,
        Factory,
        FactoryFn,
        FactoryOutput,
        FromContainer,
        marker
    },
    error::{BoxError, Error},
    inject::{AUTO, Directive, Injectable, Shared, Tag},
};

#[cfg(feature = "macros")]
pub use injector_macros::Injectable;

pub mod error;
pub mod component;
pub mod container;
pub mod inject;
