//! Newtype IDs for type-safe document references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different collections. Document IDs are
//! opaque strings assigned by the document database.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use clubhub_core::define_id;
/// define_id!(ClubId);
/// define_id!(PostId);
///
/// let club_id = ClubId::new("abc123");
/// let post_id = PostId::new("abc123");
///
/// // These are different types, so this won't compile:
/// // let _: ClubId = post_id;
/// assert_eq!(club_id.as_str(), post_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Default,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a document ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying document ID.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard document IDs
define_id!(UserId);
define_id!(ClubId);
define_id!(PostId);
define_id!(PositionId);
define_id!(ApplicationId);
define_id!(PendingClubId);
define_id!(CalendarEventId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = ClubId::new("club_42");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"club_42\"");

        let back: ClubId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display_and_conversions() {
        let id = PostId::from("p1");
        assert_eq!(id.to_string(), "p1");
        assert_eq!(id.as_str(), "p1");

        let raw: String = id.into();
        assert_eq!(raw, "p1");
    }

    #[test]
    fn test_default_id_is_empty() {
        assert!(UserId::default().as_str().is_empty());
    }
}
