//! Reader for the `.zkey` proving-key artifact (version 1, Groth16).
//!
//! The container is parsed once and kept for the prover's lifetime; field
//! elements arrive in canonical little-endian form and are normalized to
//! Montgomery representation on the way in. Point data is trusted-setup
//! output and is taken at face value beyond the format checks.

use bn254curves::bn254::{Fq, Fq2, Fr, G1Affine, G2Affine};
use ff::PrimeField;

use crate::binfile::{limbs_le_bytes, BinFile, Reader};
use crate::error::ProverError;

const ZKEY_VERSION: u32 = 1;
const GROTH16_PROTOCOL_ID: u32 = 1;

/// One R1CS coefficient: `value * w[signal]` is accumulated into row
/// `constraint` of the A (matrix = 0) or B (matrix = 1) evaluation vector.
#[derive(Clone, Copy, Debug)]
pub struct Coef {
    pub matrix: u32,
    pub constraint: u32,
    pub signal: u32,
    pub value: Fr,
}

/// The parsed proving key.
#[derive(Debug)]
pub struct Zkey {
    pub n_vars: u32,
    pub n_public: u32,
    pub domain_size: u32,

    pub vk_alpha1: G1Affine,
    pub vk_beta1: G1Affine,
    pub vk_beta2: G2Affine,
    pub vk_gamma2: G2Affine,
    pub vk_delta1: G1Affine,
    pub vk_delta2: G2Affine,

    pub coefs: Vec<Coef>,
    pub a_points: Vec<G1Affine>,
    pub b1_points: Vec<G1Affine>,
    pub b2_points: Vec<G2Affine>,
    pub c_points: Vec<G1Affine>,
    pub h_points: Vec<G1Affine>,
}

impl Zkey {
    pub fn parse(data: &[u8]) -> Result<Zkey, ProverError> {
        let bin = BinFile::parse(data, b"zkey", ZKEY_VERSION)?;

        let mut r = Reader::new(bin.section(1)?);
        if r.u32_le()? != GROTH16_PROTOCOL_ID {
            return Err(ProverError::MalformedContainer("zkey is not groth16"));
        }

        let mut r = Reader::new(bin.section(2)?);
        let n8q = r.u32_le()?;
        if n8q != 32 {
            return Err(ProverError::UnsupportedCurve);
        }
        if r.bytes(32)? != limbs_le_bytes(&Fq::MODULUS_LIMBS) {
            return Err(ProverError::UnsupportedCurve);
        }
        let n8r = r.u32_le()?;
        if n8r != 32 {
            return Err(ProverError::UnsupportedCurve);
        }
        if r.bytes(32)? != limbs_le_bytes(&Fr::MODULUS_LIMBS) {
            return Err(ProverError::UnsupportedCurve);
        }

        let n_vars = r.u32_le()?;
        let n_public = r.u32_le()?;
        let domain_size = r.u32_le()?;
        if n_vars == 0 || n_vars <= n_public {
            return Err(ProverError::MalformedContainer("inconsistent variable counts"));
        }
        if domain_size == 0 || !domain_size.is_power_of_two() {
            return Err(ProverError::MalformedContainer(
                "domain size is not a power of two",
            ));
        }
        // The quotient evaluation runs on a coset of the doubled domain, so
        // one extra level of 2-adicity must be available.
        if domain_size.trailing_zeros() + 1 > Fr::S {
            return Err(ProverError::DomainOverflow {
                domain_size: domain_size as u64,
                max: 1u64 << (Fr::S - 1),
            });
        }

        let vk_alpha1 = g1_from_bytes(r.bytes(64)?)?;
        let vk_beta1 = g1_from_bytes(r.bytes(64)?)?;
        let vk_beta2 = g2_from_bytes(r.bytes(128)?)?;
        let vk_gamma2 = g2_from_bytes(r.bytes(128)?)?;
        let vk_delta1 = g1_from_bytes(r.bytes(64)?)?;
        let vk_delta2 = g2_from_bytes(r.bytes(128)?)?;

        let coefs = parse_coefs(bin.section(4)?, domain_size, n_vars)?;

        let a_points = g1_section(bin.section(5)?, n_vars as usize)?;
        let b1_points = g1_section(bin.section(6)?, n_vars as usize)?;
        let b2_points = g2_section(bin.section(7)?, n_vars as usize)?;
        let c_points = g1_section(bin.section(8)?, (n_vars - n_public - 1) as usize)?;
        let h_points = g1_section(bin.section(9)?, domain_size as usize)?;

        Ok(Zkey {
            n_vars,
            n_public,
            domain_size,
            vk_alpha1,
            vk_beta1,
            vk_beta2,
            vk_gamma2,
            vk_delta1,
            vk_delta2,
            coefs,
            a_points,
            b1_points,
            b2_points,
            c_points,
            h_points,
        })
    }
}

fn parse_coefs(data: &[u8], domain_size: u32, n_vars: u32) -> Result<Vec<Coef>, ProverError> {
    const RECORD: usize = 12 + 32;
    if data.len() % RECORD != 0 {
        return Err(ProverError::MalformedContainer(
            "coefficient section size is not a whole number of records",
        ));
    }
    let mut r = Reader::new(data);
    let n_coefs = data.len() / RECORD;
    let mut coefs = Vec::with_capacity(n_coefs);
    for _ in 0..n_coefs {
        let matrix = r.u32_le()?;
        let constraint = r.u32_le()?;
        let signal = r.u32_le()?;
        let value = fr_from_bytes(r.bytes(32)?)?;
        if matrix > 1 {
            return Err(ProverError::MalformedContainer("coefficient matrix id"));
        }
        if constraint >= domain_size {
            return Err(ProverError::MalformedContainer(
                "coefficient constraint index out of range",
            ));
        }
        if signal >= n_vars {
            return Err(ProverError::MalformedContainer(
                "coefficient signal index out of range",
            ));
        }
        coefs.push(Coef {
            matrix,
            constraint,
            signal,
            value,
        });
    }
    Ok(coefs)
}

fn g1_section(data: &[u8], expected: usize) -> Result<Vec<G1Affine>, ProverError> {
    if data.len() != expected * 64 {
        return Err(ProverError::MalformedContainer(
            "point section size disagrees with the header counts",
        ));
    }
    data.chunks_exact(64).map(g1_from_bytes).collect()
}

fn g2_section(data: &[u8], expected: usize) -> Result<Vec<G2Affine>, ProverError> {
    if data.len() != expected * 128 {
        return Err(ProverError::MalformedContainer(
            "point section size disagrees with the header counts",
        ));
    }
    data.chunks_exact(128).map(g2_from_bytes).collect()
}

fn fq_from_bytes(bytes: &[u8]) -> Result<Fq, ProverError> {
    Option::from(Fq::from_repr(bytes.try_into().unwrap()))
        .ok_or(ProverError::MalformedContainer("coordinate is not reduced"))
}

fn fr_from_bytes(bytes: &[u8]) -> Result<Fr, ProverError> {
    Option::from(Fr::from_repr(bytes.try_into().unwrap())).ok_or(
        ProverError::MalformedContainer("field element is not reduced"),
    )
}

fn g1_from_bytes(bytes: &[u8]) -> Result<G1Affine, ProverError> {
    Ok(G1Affine {
        x: fq_from_bytes(&bytes[0..32])?,
        y: fq_from_bytes(&bytes[32..64])?,
    })
}

fn g2_from_bytes(bytes: &[u8]) -> Result<G2Affine, ProverError> {
    Ok(G2Affine {
        x: Fq2::new(fq_from_bytes(&bytes[0..32])?, fq_from_bytes(&bytes[32..64])?),
        y: Fq2::new(
            fq_from_bytes(&bytes[64..96])?,
            fq_from_bytes(&bytes[96..128])?,
        ),
    })
}
