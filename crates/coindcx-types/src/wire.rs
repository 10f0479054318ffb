//! Enum-or-raw-string normalization
//!
//! Request fields such as order side or time-in-force accept either the typed
//! enum or the raw string the exchange expects. Both forms go through
//! [`IntoWire`] at the API boundary; a raw string is checked against the closed
//! set of values for that field, so everything past the boundary only sees
//! valid values.

use crate::error::{TypesError, TypesResult};

/// An enum whose variants map one-to-one onto raw wire strings
pub trait WireEnum: Copy + Sized + 'static {
    /// Field name used in error messages
    const FIELD: &'static str;

    /// Every variant, in declaration order
    const ALL: &'static [Self];

    /// Raw value as sent to the exchange
    fn as_str(&self) -> &'static str;

    /// Look up the variant for a raw wire value
    fn from_wire(raw: &str) -> TypesResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == raw)
            .ok_or_else(|| TypesError::UnknownVariant {
                field: Self::FIELD,
                value: raw.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Conversion from an enum value or its raw string into a validated enum
pub trait IntoWire<E: WireEnum> {
    /// Normalize into the enum, rejecting unknown raw strings
    fn into_wire(self) -> TypesResult<E>;
}

/// Implements `IntoWire`, `FromStr` and `Display` for wire enums
macro_rules! wire_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::wire::IntoWire<$ty> for $ty {
                fn into_wire(self) -> $crate::error::TypesResult<$ty> {
                    Ok(self)
                }
            }

            impl $crate::wire::IntoWire<$ty> for &str {
                fn into_wire(self) -> $crate::error::TypesResult<$ty> {
                    <$ty as $crate::wire::WireEnum>::from_wire(self)
                }
            }

            impl $crate::wire::IntoWire<$ty> for String {
                fn into_wire(self) -> $crate::error::TypesResult<$ty> {
                    <$ty as $crate::wire::WireEnum>::from_wire(&self)
                }
            }

            impl $crate::wire::IntoWire<$ty> for &String {
                fn into_wire(self) -> $crate::error::TypesResult<$ty> {
                    <$ty as $crate::wire::WireEnum>::from_wire(self)
                }
            }

            impl std::str::FromStr for $ty {
                type Err = $crate::error::TypesError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as $crate::wire::WireEnum>::from_wire(s)
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(<$ty as $crate::wire::WireEnum>::as_str(self))
                }
            }
        )*
    };
}

pub(crate) use wire_conversions;
