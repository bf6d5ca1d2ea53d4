//! Extractors for fetching factory arguments from DI container

use super::{Error, Container};

/// A trait that defines how to extract the `Self` from DI container
///
/// Implemented for tuples of up to five types, each element is resolved by type.
pub trait FromContainer: Sized {
    /// Extracts `Self` from DI container
    fn from_container(container: &Container) -> Result<Self, Error>;
}

impl FromContainer for () {
    #[inline]
    fn from_container(_: &Container) -> Result<Self, Error> {
        Ok(())
    }
}

macro_rules! define_generic_from_container {
    ($($T: ident),*) => {
        impl<$($T: 'static),+> FromContainer for ($($T,)+) {
            #[inline]
            #[allow(non_snake_case)]
            fn from_container(container: &Container) -> Result<Self, Error>{
                let tuple = (
                    $(
                    container.try_resolve::<$T>()?,
                    )*
                );
                Ok(tuple)
            }
        }
    }
}

define_generic_from_container! { T1 }
define_generic_from_container! { T1, T2 }
define_generic_from_container! { T1, T2, T3 }
define_generic_from_container! { T1, T2, T3, T4 }
define_generic_from_container! { T1, T2, T3, T4, T5 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_resolves_from_container() {
        let mut container = Container::new();
        container.register(1_i32);
        container.register(String::from("dep-1"));

        let (x, s) = <(i32, String)>::from_container(&container).unwrap();

        assert_eq!(x, 1);
        assert_eq!(s, "dep-1");
    }

    #[test]
    fn it_resolves_from_container_with_error() {
        let container = Container::new();

        let err = <(u8,)>::from_container(&container).unwrap_err();

        assert_eq!(err.to_string(), "injector: couldn't find the dependency for u8");
    }

    #[test]
    fn it_fails_on_first_unresolved_argument() {
        let mut container = Container::new();
        container.register(1_i32);
        container.register(2_i32);

        let err = <(u8, i32)>::from_container(&container).unwrap_err();
        assert!(matches!(err, Error::NotFoundForType("u8")));

        let err = <(i32, u8)>::from_container(&container).unwrap_err();
        assert!(matches!(err, Error::AmbiguousType("i32")));
    }
}
