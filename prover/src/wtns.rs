//! Reader for the `.wtns` witness artifact (version 2).

use bn254curves::bn254::Fr;
use ff::PrimeField;

use crate::binfile::{limbs_le_bytes, BinFile, Reader};
use crate::error::ProverError;

const WTNS_VERSION: u32 = 2;

/// A parsed witness assignment.
///
/// The values are kept twice: in Montgomery form for the coefficient
/// accumulation, and as raw canonical bytes, which is exactly what the
/// multiexp kernels consume as scalars.
pub struct Witness {
    pub n_vars: u32,
    pub values: Vec<Fr>,
    pub bytes: Vec<[u8; 32]>,
}

impl Witness {
    pub fn parse(data: &[u8]) -> Result<Witness, ProverError> {
        let bin = BinFile::parse(data, b"wtns", WTNS_VERSION)?;

        let mut r = Reader::new(bin.section(1)?);
        let n8 = r.u32_le()?;
        if n8 != 32 {
            return Err(ProverError::UnsupportedCurve);
        }
        if r.bytes(32)? != limbs_le_bytes(&Fr::MODULUS_LIMBS) {
            return Err(ProverError::UnsupportedCurve);
        }
        let n_vars = r.u32_le()?;

        let payload = bin.section(2)?;
        if payload.len() != n_vars as usize * 32 {
            return Err(ProverError::MalformedContainer(
                "witness section size disagrees with the header count",
            ));
        }

        let mut values = Vec::with_capacity(n_vars as usize);
        let mut bytes = Vec::with_capacity(n_vars as usize);
        for chunk in payload.chunks_exact(32) {
            let repr: [u8; 32] = chunk.try_into().unwrap();
            let value = Option::from(Fr::from_repr(repr)).ok_or(
                ProverError::MalformedContainer("witness value is not reduced"),
            )?;
            values.push(value);
            bytes.push(repr);
        }

        Ok(Witness {
            n_vars,
            values,
            bytes,
        })
    }
}
