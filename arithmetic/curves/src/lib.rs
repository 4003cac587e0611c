//! BN254 (alt-bn128) field and curve arithmetic.
//!
//! The crate provides the scalar field `Fr`, the base field `Fq`, its
//! quadratic extension `Fq2`, and the `G1`/`G2` groups in XYZZ coordinates.
//! Everything a Groth16 prover touches in its hot path lives here; the
//! multi-scalar and FFT kernels that consume these types live in the prover
//! crate.

mod arithmetic;

#[macro_use]
mod derive;

pub mod bn254;
pub mod xyzz;

pub use arithmetic::{adc, div_rem_u64, mac, macx, sbb, BaseField};

pub extern crate ff;
pub extern crate subtle;
