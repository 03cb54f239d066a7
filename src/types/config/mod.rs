//! Non-zero limits used by the configuration layer
//!
//! Zero is never a meaningful size, count or port here, so each of these
//! wraps a `NonZero*` and refuses zero at every entry point (`new`,
//! `TryFrom`, serde).

/// Declares a `NonZero*` newtype
///
/// Each type gets `new`, `get`, a `const fn literal` for compile-time
/// constants, `Display`, `TryFrom<primitive>`, `From<Self>` for the
/// primitive and serde as the bare number.
macro_rules! nonzero_newtype {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($nonzero:ty : $primitive:ty);
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name($nonzero);

        impl $name {
            /// `None` if `value` is 0
            #[must_use]
            pub const fn new(value: $primitive) -> Option<Self> {
                match <$nonzero>::new(value) {
                    Some(nz) => Some(Self(nz)),
                    None => None,
                }
            }

            /// For `const` items; zero fails the build
            #[must_use]
            pub(crate) const fn literal(value: $primitive) -> Self {
                match Self::new(value) {
                    Some(v) => v,
                    None => panic!(concat!(stringify!($name), " literal cannot be 0")),
                }
            }

            #[must_use]
            #[inline]
            pub const fn get(&self) -> $primitive {
                self.0.get()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.get(), f)
            }
        }

        impl TryFrom<$primitive> for $name {
            type Error = $crate::types::ValidationError;

            fn try_from(value: $primitive) -> Result<Self, Self::Error> {
                Self::new(value).ok_or($crate::types::ValidationError::Zero(stringify!($name)))
            }
        }

        impl From<$name> for $primitive {
            fn from(val: $name) -> Self {
                val.get()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.get(), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <$primitive as serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod duration;
mod limits;
mod network;

pub use duration::duration_serde;
pub use limits::{RingCapacity, TailLines, ThreadCount};
pub use network::Port;
