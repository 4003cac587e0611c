use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::arithmetic::{adc, digit_char, digit_value, div_rem_u64, mac, macx, sbb};

/// An element of the BN254 scalar field, in Montgomery form.
#[derive(Clone, Copy)]
pub struct Fr(pub(crate) [u64; 4]);

/// Constant representing the modulus
/// r = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001
pub const MODULUS: Fr = Fr([
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

const MODULUS_STR: &str = "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

/// INV = -(r^{-1} mod 2^64) mod 2^64
const INV: u64 = 0xc2e1f593efffffff;

/// R = 2^256 mod r
const R: Fr = Fr([
    0xac96341c4ffffffb,
    0x36fc76959f60cd29,
    0x666ea36f7879462e,
    0x0e0a77c19a07df2f,
]);

/// R^2 = 2^512 mod r
const R2: Fr = Fr([
    0x1bb8e645ae216da7,
    0x53fe3ab1e35c59e3,
    0x8c49833d53bb8085,
    0x0216d0b17f4e44a5,
]);

/// R^3 = 2^768 mod r
const R3: Fr = Fr([
    0x5e94d8e1b4bf0040,
    0x2a489cbe1cfbb6b8,
    0x893cc664a19fcfed,
    0x0cf8594b7fcc657c,
]);

/// 7 generates the multiplicative group of the field.
const GENERATOR: Fr = Fr::from_raw([7, 0, 0, 0]);

/// The 2-adicity of r - 1; the FFT supports domains up to 2^S.
const S: u32 = 28;

/// A primitive 2^S-th root of unity, GENERATOR^((r - 1) >> S).
/// 0x3ddb9f5166d18b798865ea93dd31f743215cf6dd39329c8d34f1ed960c37c9
const ROOT_OF_UNITY: Fr = Fr::from_raw([
    0x8d34f1ed960c37c9,
    0x43215cf6dd39329c,
    0x798865ea93dd31f7,
    0x003ddb9f5166d18b,
]);

/// ((r - 1) >> S - 1) / 2, the Tonelli-Shanks pre-exponent.
const T_MINUS1_OVER2: [u64; 4] = [
    0xcdcb848a1f0fac9f,
    0x0c0ac2e9419f4243,
    0x098d014dc2822db4,
    0x0000000183227397,
];

field_common!(Fr, MODULUS, INV, MODULUS_STR, R, R2, R3);
field_arithmetic!(Fr, MODULUS, INV);
impl_binops_additive!(Fr, Fr);
impl_binops_multiplicative!(Fr, Fr);

impl ff::Field for Fr {
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

    /// Tonelli-Shanks, using the 2^28 root-of-unity tower.
    fn sqrt(&self) -> CtOption<Self> {
        let w = self.pow_vartime(&T_MINUS1_OVER2);

        let mut v = S;
        let mut x = *self * w;
        let mut b = x * w;
        let mut z = ROOT_OF_UNITY;

        for max_v in (1..=S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v: Choice = 1.into();

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Fr::one());
                let squared = Fr::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Fr::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Fr::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&k, &j, tmp_is_one);
                z = Fr::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Fr::conditional_select(&result, &x, b.ct_eq(&Fr::one()));
            z = z.square();
            b *= z;
            v = k;
        }

        CtOption::new(x, (x * x).ct_eq(self))
    }
}

impl ff::PrimeField for Fr {
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
