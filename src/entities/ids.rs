//! Strongly-typed identifiers.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw numeric value.
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Session`](super::Session).
    SessionId
);
define_id!(
    /// Identifier of a [`Room`](super::Room).
    RoomId
);
define_id!(
    /// Identifier of a [`Timeslot`](super::Timeslot).
    TimeslotId
);
define_id!(
    /// Identifier of a presenter. Presenters are referenced by sessions,
    /// never owned by them.
    PresenterId
);
