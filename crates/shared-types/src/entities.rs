//! # Core Value Types
//!
//! - **Address**: 20-byte account/contract identifier, compared byte for byte.
//! - **Be256**: 32-byte big-endian unsigned integer used for every balance and
//!   amount, with overflow-checked addition.

use crate::errors::{ArithmeticOverflow, ParseBytesError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Decode `0x`-prefixed (or bare) hex into exactly `N` bytes.
fn decode_fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], ParseBytesError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|e| ParseBytesError::InvalidHex(e.to_string()))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ParseBytesError::InvalidLength {
            expected: N,
            got: bytes.len(),
        })
}

macro_rules! impl_hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte Ethereum-style address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Address width in bytes.
    pub const LEN: usize = 20;

    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        slice.try_into().ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ParseBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<20>(s).map(Self)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl_hex_serde!(Address);

// =============================================================================
// BE256 (32-byte big-endian unsigned integer)
// =============================================================================

/// A 256-bit unsigned integer stored as 32 big-endian bytes.
///
/// Byte 0 is the most significant. Because the representation is big-endian,
/// the derived lexicographic ordering is also the numeric ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Be256(pub [u8; 32]);

impl Be256 {
    /// Width in bytes.
    pub const LEN: usize = 32;

    /// Zero.
    pub const ZERO: Self = Self([0u8; 32]);

    /// 2^256 - 1.
    pub const MAX: Self = Self([0xFFu8; 32]);

    /// Creates a value from its 32 big-endian bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a value from a 32-byte big-endian slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        slice.try_into().ok().map(Self)
    }

    /// Widens a `u64` into the low 8 bytes.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Returns the 32 big-endian bytes.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Adds `other`, failing with [`ArithmeticOverflow`] if the true sum
    /// exceeds 2^256 - 1.
    ///
    /// Works byte by byte from the least significant end, carrying into the
    /// next byte.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ArithmeticOverflow> {
        let mut sum = [0u8; 32];
        let mut carry: u16 = 0;
        for i in (0..Self::LEN).rev() {
            let column = u16::from(self.0[i]) + u16::from(other.0[i]) + carry;
            sum[i] = (column & 0xFF) as u8;
            carry = column >> 8;
        }
        if carry == 0 {
            Ok(Self(sum))
        } else {
            Err(ArithmeticOverflow)
        }
    }
}

/// Free-function form of [`Be256::checked_add`].
pub fn checked_add(a: &Be256, b: &Be256) -> Result<Be256, ArithmeticOverflow> {
    a.checked_add(b)
}

impl fmt::Debug for Be256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Be256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Be256 {
    type Err = ParseBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<32>(s).map(Self)
    }
}

impl From<u64> for Be256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<[u8; 32]> for Be256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl_hex_serde!(Be256);

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;
    use proptest::prelude::*;

    fn to_u256(value: &Be256) -> U256 {
        U256::from_big_endian(value.as_bytes())
    }

    fn from_u256(value: U256) -> Be256 {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Be256(bytes)
    }

    #[test]
    fn test_address_parse_with_prefix() {
        let addr: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();
        assert_eq!(addr.0[0], 0x70);
        assert_eq!(addr.0[19], 0xC8);
    }

    #[test]
    fn test_address_parse_without_prefix() {
        let addr: Address = "c6e7DF5E7b4f2A278906862b61205850344D4e7d".parse().unwrap();
        assert_eq!(addr.0[0], 0xc6);
    }

    #[test]
    fn test_address_parse_wrong_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert_eq!(
            err,
            ParseBytesError::InvalidLength {
                expected: 20,
                got: 2
            }
        );
    }

    #[test]
    fn test_address_parse_bad_hex() {
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(ParseBytesError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_display_is_lowercase_hex() {
        let addr = Address::new([0xAB; 20]);
        assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_address_from_slice() {
        assert!(Address::from_slice(&[1u8; 20]).is_some());
        assert!(Address::from_slice(&[1u8; 21]).is_none());
    }

    #[test]
    fn test_address_serde_hex_string() {
        let addr = Address::new([0x11; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "11".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_be256_from_u64_is_big_endian() {
        let v = Be256::from_u64(0x0102);
        assert_eq!(v.0[31], 0x02);
        assert_eq!(v.0[30], 0x01);
        assert!(v.0[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_be256_simple_add() {
        let sum = Be256::from_u64(100)
            .checked_add(&Be256::from_u64(250))
            .unwrap();
        assert_eq!(sum, Be256::from_u64(350));
    }

    #[test]
    fn test_be256_carry_across_bytes() {
        let sum = Be256::from_u64(0xFF).checked_add(&Be256::from_u64(1)).unwrap();
        assert_eq!(sum, Be256::from_u64(0x100));
    }

    #[test]
    fn test_be256_carry_across_u64_limb() {
        let sum = Be256::from_u64(u64::MAX)
            .checked_add(&Be256::from_u64(1))
            .unwrap();
        let mut expected = [0u8; 32];
        expected[23] = 1;
        assert_eq!(sum, Be256(expected));
    }

    #[test]
    fn test_be256_max_plus_one_overflows() {
        assert_eq!(
            Be256::MAX.checked_add(&Be256::from_u64(1)),
            Err(ArithmeticOverflow)
        );
    }

    #[test]
    fn test_be256_max_plus_zero_is_max() {
        assert_eq!(Be256::MAX.checked_add(&Be256::ZERO), Ok(Be256::MAX));
    }

    #[test]
    fn test_be256_ordering_is_numeric() {
        assert!(Be256::from_u64(255) < Be256::from_u64(256));
        assert!(Be256::ZERO < Be256::MAX);
    }

    #[test]
    fn test_be256_is_zero() {
        assert!(Be256::ZERO.is_zero());
        assert!(!Be256::from_u64(1).is_zero());
    }

    #[test]
    fn test_be256_parse_and_display() {
        let text = format!("0x{}", "00".repeat(31) + "2a");
        let v: Be256 = text.parse().unwrap();
        assert_eq!(v, Be256::from_u64(42));
        assert_eq!(v.to_string(), text);
    }

    #[test]
    fn test_free_checked_add_matches_method() {
        let a = Be256::from_u64(7);
        let b = Be256::from_u64(8);
        assert_eq!(checked_add(&a, &b), a.checked_add(&b));
    }

    proptest! {
        #[test]
        fn prop_checked_add_matches_u256(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let (a, b) = (Be256(a), Be256(b));
            let (expected, overflow) = to_u256(&a).overflowing_add(to_u256(&b));
            match a.checked_add(&b) {
                Ok(sum) => {
                    prop_assert!(!overflow);
                    prop_assert_eq!(sum, from_u256(expected));
                }
                Err(ArithmeticOverflow) => prop_assert!(overflow),
            }
        }

        #[test]
        fn prop_checked_add_commutes(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let (a, b) = (Be256(a), Be256(b));
            prop_assert_eq!(a.checked_add(&b), b.checked_add(&a));
        }

        #[test]
        fn prop_small_sums_never_overflow(a in any::<u64>(), b in any::<u64>()) {
            let sum = Be256::from_u64(a).checked_add(&Be256::from_u64(b));
            prop_assert_eq!(sum.map(|v| to_u256(&v)), Ok(U256::from(a) + U256::from(b)));
        }
    }
}
