//! Strongly typed identifier wrappers.
//!
//! Vehicles are created once at fleet initialisation and live in a fixed
//! `Vec`, so `VehicleId` is a dense integer index.  Requests arrive from the
//! intake boundary at any time and outlive the queue (they move to the
//! history ledger), so `RequestId` is an opaque UUID.

use std::fmt;

use uuid::Uuid;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a vehicle in the fleet.
    pub struct VehicleId(u32);
}

/// Opaque identifier of a delivery request.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// A fresh random (v4) identifier.
    pub fn new_v4() -> Self {
        RequestId(Uuid::new_v4())
    }

    /// Deterministic identifier built from a counter, for tests and fixtures.
    pub fn from_u128(n: u128) -> Self {
        RequestId(Uuid::from_u128(n))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
