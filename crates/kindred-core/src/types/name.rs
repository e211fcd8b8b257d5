//! Node and relationship type names.
//!
//! The store treats these as opaque strings; their meaning belongs to the
//! application's schema registry.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! type_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new type name.
            #[inline]
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Get the name as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&$name> for $name {
            #[inline]
            fn from(s: &$name) -> Self {
                s.clone()
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

type_name! {
    /// The type of a node, e.g. `place` or `citation`.
    NodeType
}

type_name! {
    /// The type of a relationship, e.g. `TRANSCRIPTION_FOR`.
    RelType
}
