//! Limb-level helpers shared by the field implementations.

use core::fmt::Debug;
use subtle::{ConditionallySelectable, ConstantTimeEq, CtOption};

/// Compute a + b + carry, returning the result and the new carry.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (d, c1) = a.overflowing_add(b);
    let (d, c2) = d.overflowing_add(carry as u64);
    (d, c1 | c2)
}

/// Compute a - b - borrow, returning the result and the new borrow.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (d, b1) = a.overflowing_sub(b);
    let (d, b2) = d.overflowing_sub(borrow as u64);
    (d, b1 | b2)
}

/// Compute a + (b * c) + carry, returning the low and high halves.
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Compute a + (b * c), returning the low and high halves.
#[inline(always)]
pub const fn macx(a: u64, b: u64, c: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) * (c as u128);
    (t as u64, (t >> 64) as u64)
}

/// Divide a little-endian 4-limb integer by a single limb, returning the
/// quotient and the remainder. Used by the radix string conversions, which
/// operate on canonical representatives.
pub const fn div_rem_u64(n: [u64; 4], d: u64) -> ([u64; 4], u64) {
    let mut q = [0u64; 4];
    let mut rem: u128 = 0;
    let mut i = 4;
    while i > 0 {
        i -= 1;
        let cur = (rem << 64) | n[i] as u128;
        q[i] = (cur / (d as u128)) as u64;
        rem = cur % (d as u128);
    }
    (q, rem as u64)
}

/// Value of an ASCII digit in the given radix, following the GMP
/// convention: bases up to 36 accept either case, larger bases assign
/// `0-9` then `A-Z` then `a-z`.
pub(crate) fn digit_value(b: u8, radix: u32) -> Option<u64> {
    let v = if radix <= 36 {
        match b {
            b'0'..=b'9' => (b - b'0') as u64,
            b'a'..=b'z' => (b - b'a') as u64 + 10,
            b'A'..=b'Z' => (b - b'A') as u64 + 10,
            _ => return None,
        }
    } else {
        match b {
            b'0'..=b'9' => (b - b'0') as u64,
            b'A'..=b'Z' => (b - b'A') as u64 + 10,
            b'a'..=b'z' => (b - b'a') as u64 + 36,
            _ => return None,
        }
    };
    (v < radix as u64).then_some(v)
}

/// Inverse of [`digit_value`]; bases up to 36 render lowercase.
pub(crate) fn digit_char(d: u64, radix: u32) -> char {
    debug_assert!(d < radix as u64);
    let c = if radix <= 36 {
        match d {
            0..=9 => b'0' + d as u8,
            _ => b'a' + (d - 10) as u8,
        }
    } else {
        match d {
            0..=9 => b'0' + d as u8,
            10..=35 => b'A' + (d - 10) as u8,
            _ => b'a' + (d - 36) as u8,
        }
    };
    c as char
}

/// The operation surface the point formulas need from a coordinate field.
///
/// `Fq` and `Fq2` both implement this, which keeps the XYZZ group engine
/// generic over the curve it instantiates.
pub trait BaseField:
    Copy
    + Clone
    + Debug
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + ConstantTimeEq
    + ConditionallySelectable
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;
    fn double(&self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn square(&self) -> Self;
    fn invert(&self) -> CtOption<Self>;
}
