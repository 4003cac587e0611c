use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::arithmetic::{adc, digit_char, digit_value, div_rem_u64, mac, macx, sbb};

/// An element of the BN254 base field, in Montgomery form.
#[derive(Clone, Copy)]
pub struct Fq(pub(crate) [u64; 4]);

/// Constant representing the modulus
/// q = 0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47
pub const MODULUS: Fq = Fq([
    0x3c208c16d87cfd47,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

const MODULUS_STR: &str = "0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47";

/// INV = -(q^{-1} mod 2^64) mod 2^64
const INV: u64 = 0x87d20782e4866389;

/// R = 2^256 mod q
const R: Fq = Fq([
    0xd35d438dc58f0d9d,
    0x0a78eb28f5c70b3d,
    0x666ea36f7879462c,
    0x0e0a77c19a07df2f,
]);

/// R^2 = 2^512 mod q
const R2: Fq = Fq([
    0xf32cfc5b538afa89,
    0xb5e71911d44501fb,
    0x47ab1eff0a417ff6,
    0x06d89f71cab8351f,
]);

/// R^3 = 2^768 mod q
const R3: Fq = Fq([
    0xb1cd6dafda1530df,
    0x62f210e6a7283db6,
    0xef7f0b0c0ada0afb,
    0x20fd6e902d592544,
]);

/// 3 is a quadratic non-residue mod q and generates the multiplicative group.
const GENERATOR: Fq = Fq::from_raw([3, 0, 0, 0]);

/// The 2-adicity of q - 1.
const S: u32 = 1;

/// The 2^S-th root of unity, i.e. -1.
const ROOT_OF_UNITY: Fq = Fq::from_raw([
    0x3c208c16d87cfd46,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

/// (q + 1) / 4, the square-root exponent for q = 3 (mod 4).
const Q_PLUS_1_OVER_4: [u64; 4] = [
    0x4f082305b61f3f52,
    0x65e05aa45a1c72a3,
    0x6e14116da0605617,
    0x0c19139cb84c680a,
];

field_common!(Fq, MODULUS, INV, MODULUS_STR, R, R2, R3);
field_arithmetic!(Fq, MODULUS, INV);
impl_binops_additive!(Fq, Fq);
impl_binops_multiplicative!(Fq, Fq);

impl ff::Field for Fq {
    fn random(mut rng: impl RngCore) -> Self {
        let mut buf = [0u8; 64];
        rng.fill_bytes(&mut buf);
        Self::from_bytes_wide(&buf)
    }

    fn zero() -> Self {
        Self::zero()
    }

    fn one() -> Self {
        Self::one()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt(&self) -> CtOption<Self> {
        let tmp = self.pow_vartime(&Q_PLUS_1_OVER_4);
        CtOption::new(tmp, tmp.square().ct_eq(self))
    }
}

impl ff::PrimeField for Fq {
    type Repr = [u8; 32];

    const NUM_BITS: u32 = 254;
    const CAPACITY: u32 = 253;
    const S: u32 = S;

    fn from_repr(repr: Self::Repr) -> CtOption<Self> {
        Self::from_bytes(&repr)
    }

    fn to_repr(&self) -> Self::Repr {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    fn multiplicative_generator() -> Self {
        GENERATOR
    }

    fn root_of_unity() -> Self {
        ROOT_OF_UNITY
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ff::Field;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_sqrt() {
        let mut rng = XorShiftRng::seed_from_u64(0x5dbe6259_8d31_3e76);
        for _ in 0..100 {
            let a = Fq::random(&mut rng);
            let sq = a.square();
            let root = sq.sqrt().unwrap();
            assert!(root == a || root == -a);
        }
    }

    #[test]
    fn test_invert() {
        assert!(bool::from(Fq::zero().invert().is_none()));
        let mut rng = XorShiftRng::seed_from_u64(0x0102_0304_0506_0708);
        for _ in 0..100 {
            let a = Fq::random(&mut rng);
            if a == Fq::zero() {
                continue;
            }
            assert_eq!(a * a.invert().unwrap(), Fq::one());
        }
    }

    #[test]
    fn test_montgomery_round_trip() {
        let mut rng = XorShiftRng::seed_from_u64(0xdead_beef_cafe_f00d);
        for _ in 0..100 {
            let a = Fq::random(&mut rng);
            let bytes = a.to_bytes();
            assert_eq!(Fq::from_bytes(&bytes).unwrap(), a);
        }
    }
}
