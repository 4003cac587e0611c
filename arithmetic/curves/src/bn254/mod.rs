//! The BN254 (alt-bn128) curve family: the base field, its quadratic
//! extension, the scalar field, and the two proof groups.

mod curve;
mod fq;
mod fq2;
mod fr;

pub use curve::{G1Affine, G1Curve, G2Affine, G2Curve, G1, G2};
pub use fq::{Fq, MODULUS as FQ_MODULUS};
pub use fq2::Fq2;
pub use fr::{Fr, MODULUS as FR_MODULUS};

use static_assertions::assert_eq_size;

assert_eq_size!(Fq, [u64; 4]);
assert_eq_size!(Fr, [u64; 4]);
assert_eq_size!(Fq2, [u64; 8]);
