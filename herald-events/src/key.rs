//! Event keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies an event category.
///
/// Keys are plain integers and never need to be declared up front: any value
/// is accepted by every [`EventService`](crate::EventService) operation.
/// Named identifiers (enums) map onto keys through `From` impls.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventKey(i32);

impl EventKey {
    /// Create a key from its raw value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw integer value
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for EventKey {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<EventKey> for i32 {
    fn from(key: EventKey) -> Self {
        key.0
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversions() {
        let key: EventKey = 42.into();
        assert_eq!(key, EventKey::new(42));
        assert_eq!(i32::from(key), 42);
        assert_eq!(EventKey::new(-7).get(), -7);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(EventKey::new(3).to_string(), "3");
        assert_eq!(EventKey::new(-1).to_string(), "-1");
    }
}
