//! Type-safe identifier wrappers around content keys.
//!
//! Species and items are keyed by short, human-authored strings (for
//! example `"rice"` or `"cow_milk"`) so that content files stay readable.
//! Each kind of key gets its own newtype to prevent accidental mixing of
//! identifiers at compile time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from any string-like key.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

define_id! {
    /// Identifier for a crop species in the content registry.
    CropSpeciesId
}

define_id! {
    /// Identifier for a livestock species in the content registry.
    LivestockSpeciesId
}

define_id! {
    /// Identifier for an item handed to the external inventory on harvest.
    ItemId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_compare_by_key() {
        let a = CropSpeciesId::new("rice");
        let b = CropSpeciesId::from("rice");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "rice");
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = ItemId::new("egg");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"egg\""));

        let restored: Result<ItemId, _> = serde_json::from_str("\"egg\"");
        assert_eq!(restored.ok(), Some(id));
    }

    #[test]
    fn id_display_matches_key() {
        let id = LivestockSpeciesId::new("cow");
        assert_eq!(id.to_string(), "cow");
        assert_eq!(id.into_inner(), String::from("cow"));
    }
}
