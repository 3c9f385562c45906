//! Opaque string identities for groups and devices.
//!
//! Both are cheap to clone (`Arc<str>`) and borrow as `str`, so sets of ids can
//! be queried with plain string slices.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl From<$name> for Arc<str> {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }
    };
}

string_id! {
    /// Identity of a group registry; fixed at creation.
    GroupId
}

string_id! {
    /// Identity of a device, unique within its group.
    DeviceId
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_set_lookup_by_str() {
        let ids: HashSet<DeviceId> = ["device1", "device2"].into_iter().map(DeviceId::from).collect();
        assert!(ids.contains("device1"));
        assert!(!ids.contains("device3"));
    }

    #[test]
    fn test_display_and_compare() {
        let id = GroupId::from(String::from("group"));
        assert_eq!(id.to_string(), "group");
        assert_eq!(id, "group");
        assert_ne!(id, GroupId::from("groupId"));
    }
}
