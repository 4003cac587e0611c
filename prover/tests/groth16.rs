//! End-to-end tests against a self-contained trusted setup.
//!
//! The fixture builds a real `.zkey` for the two-input multiplier circuit
//! (one public output, constraint `a * b = out`) from explicit toxic waste,
//! runs the prover on real `.wtns` bytes, and checks the emitted proof
//! against an independent pairing implementation (arkworks), never against
//! the code under test.

use std::str::FromStr;

use ark_ec::pairing::Pairing;
use ark_ec::AffineRepr;
use bn254curves::bn254::{Fq, Fr, G1Affine, G2Affine};
use bn254curves::ff::PrimeField;
use groth16_prover::{FullProver, ProverError, ProverState};
use num_bigint::BigUint;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

// ---------------------------------------------------------------------------
// trusted-setup fixture
// ---------------------------------------------------------------------------

struct VerifyKey {
    alpha1: G1Affine,
    beta2: G2Affine,
    gamma2: G2Affine,
    delta2: G2Affine,
    ic: Vec<G1Affine>,
}

struct TestSetup {
    zkey: Vec<u8>,
    vk: VerifyKey,
}

fn root_of_order(log: u32) -> Fr {
    let mut omega = Fr::root_of_unity();
    for _ in log..Fr::S {
        omega = omega.square();
    }
    omega
}

/// Evaluations of the Lagrange basis over the 2^log_d domain at tau.
fn lagrange_at(log_d: u32, tau: Fr) -> Vec<Fr> {
    let n = 1usize << log_d;
    let omega = root_of_order(log_d);
    let zd = tau.pow_vartime(&[n as u64]) - Fr::one();
    let n_inv = Fr::from(n as u64).invert().unwrap();
    (0..n)
        .map(|c| {
            let wc = omega.pow_vartime(&[c as u64]);
            wc * zd * n_inv * (tau - wc).invert().unwrap()
        })
        .collect()
}

fn g1(s: Fr) -> G1Affine {
    G1Affine::generator().mul_fr(&s).to_affine()
}

fn g2(s: Fr) -> G2Affine {
    G2Affine::generator().mul_fr(&s).to_affine()
}

fn g1_bytes(p: &G1Affine) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(&p.x.to_bytes());
    out.extend_from_slice(&p.y.to_bytes());
    out
}

fn g2_bytes(p: &G2Affine) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    out.extend_from_slice(&p.x.c0.to_bytes());
    out.extend_from_slice(&p.x.c1.to_bytes());
    out.extend_from_slice(&p.y.c0.to_bytes());
    out.extend_from_slice(&p.y.c1.to_bytes());
    out
}

fn section(out: &mut Vec<u8>, id: u32, payload: &[u8]) {
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(payload);
}

fn fr_modulus_bytes() -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, limb) in Fr::MODULUS_LIMBS.iter().enumerate() {
        out[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
    }
    out
}

fn fq_modulus_bytes() -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, limb) in Fq::MODULUS_LIMBS.iter().enumerate() {
        out[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
    }
    out
}

/// Builds the proving key for the multiplier circuit.
///
/// Signals: w0 = 1, w1 = out (public), w2 = a, w3 = b; the single
/// constraint is `a * b = out`. As the circom toolchain does, each public
/// signal also gets a stabilizing A-row past the real constraints, which
/// fixes the domain at 4.
fn multiplier2_setup(r_prime: Option<[u8; 32]>, domain_size: Option<u32>) -> TestSetup {
    let n_vars = 4u32;
    let n_public = 1u32;
    let d = 4usize;

    let tau = Fr::from(20u64);
    let alpha = Fr::from(3u64);
    let beta = Fr::from(5u64);
    let gamma = Fr::from(7u64);
    let delta = Fr::from(11u64);
    let gamma_inv = gamma.invert().unwrap();
    let delta_inv = delta.invert().unwrap();

    // A rows: constraint 0 reads w2; rows 1 and 2 stabilize w0 and w1.
    // B row: constraint 0 reads w3. C row: constraint 0 must equal w1.
    let l4 = lagrange_at(2, tau);
    let mut u = vec![Fr::zero(); n_vars as usize];
    let mut v = vec![Fr::zero(); n_vars as usize];
    let mut w = vec![Fr::zero(); n_vars as usize];
    u[2] += l4[0];
    u[0] += l4[1];
    u[1] += l4[2];
    v[3] += l4[0];
    w[1] += l4[0];

    let a_points: Vec<G1Affine> = u.iter().map(|s| g1(*s)).collect();
    let b1_points: Vec<G1Affine> = v.iter().map(|s| g1(*s)).collect();
    let b2_points: Vec<G2Affine> = v.iter().map(|s| g2(*s)).collect();
    let c_points: Vec<G1Affine> = (n_public as usize + 1..n_vars as usize)
        .map(|s| g1((beta * u[s] + alpha * v[s] + w[s]) * delta_inv))
        .collect();

    // H bases: the odd-index Lagrange polynomials over the doubled domain,
    // scaled by 1/delta; the prover's coset evaluations pair with exactly
    // these.
    let l8 = lagrange_at(3, tau);
    let h_points: Vec<G1Affine> = (0..d).map(|i| g1(l8[2 * i + 1] * delta_inv)).collect();

    let ic = (0..=n_public as usize)
        .map(|s| g1((beta * u[s] + alpha * v[s] + w[s]) * gamma_inv))
        .collect();

    let vk_alpha1 = g1(alpha);
    let vk_beta1 = g1(beta);
    let vk_beta2 = g2(beta);
    let vk_gamma2 = g2(gamma);
    let vk_delta1 = g1(delta);
    let vk_delta2 = g2(delta);

    // section 2: header
    let mut header = Vec::new();
    header.extend_from_slice(&32u32.to_le_bytes());
    header.extend_from_slice(&fq_modulus_bytes());
    header.extend_from_slice(&32u32.to_le_bytes());
    header.extend_from_slice(&r_prime.unwrap_or_else(fr_modulus_bytes));
    header.extend_from_slice(&n_vars.to_le_bytes());
    header.extend_from_slice(&n_public.to_le_bytes());
    header.extend_from_slice(&domain_size.unwrap_or(d as u32).to_le_bytes());
    header.extend_from_slice(&g1_bytes(&vk_alpha1));
    header.extend_from_slice(&g1_bytes(&vk_beta1));
    header.extend_from_slice(&g2_bytes(&vk_beta2));
    header.extend_from_slice(&g2_bytes(&vk_gamma2));
    header.extend_from_slice(&g1_bytes(&vk_delta1));
    header.extend_from_slice(&g2_bytes(&vk_delta2));

    // section 4: (matrix, constraint, signal, coefficient) records
    let mut coefs = Vec::new();
    for (m, c, s) in [(0u32, 0u32, 2u32), (0, 1, 0), (0, 2, 1), (1, 0, 3)] {
        coefs.extend_from_slice(&m.to_le_bytes());
        coefs.extend_from_slice(&c.to_le_bytes());
        coefs.extend_from_slice(&s.to_le_bytes());
        coefs.extend_from_slice(&Fr::one().to_bytes());
    }

    let flat_g1 = |pts: &[G1Affine]| -> Vec<u8> { pts.iter().flat_map(|p| g1_bytes(p)).collect() };
    let flat_g2 = |pts: &[G2Affine]| -> Vec<u8> { pts.iter().flat_map(|p| g2_bytes(p)).collect() };

    let mut zkey = Vec::new();
    zkey.extend_from_slice(b"zkey");
    zkey.extend_from_slice(&1u32.to_le_bytes());
    zkey.extend_from_slice(&8u32.to_le_bytes());
    section(&mut zkey, 1, &1u32.to_le_bytes());
    section(&mut zkey, 2, &header);
    section(&mut zkey, 4, &coefs);
    section(&mut zkey, 5, &flat_g1(&a_points));
    section(&mut zkey, 6, &flat_g1(&b1_points));
    section(&mut zkey, 7, &flat_g2(&b2_points));
    section(&mut zkey, 8, &flat_g1(&c_points));
    section(&mut zkey, 9, &flat_g1(&h_points));

    TestSetup {
        zkey,
        vk: VerifyKey {
            alpha1: vk_alpha1,
            beta2: vk_beta2,
            gamma2: vk_gamma2,
            delta2: vk_delta2,
            ic,
        },
    }
}

fn build_wtns(values: &[u64]) -> Vec<u8> {
    let mut sec1 = Vec::new();
    sec1.extend_from_slice(&32u32.to_le_bytes());
    sec1.extend_from_slice(&fr_modulus_bytes());
    sec1.extend_from_slice(&(values.len() as u32).to_le_bytes());

    let mut sec2 = Vec::new();
    for v in values {
        sec2.extend_from_slice(&Fr::from(*v).to_bytes());
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"wtns");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    section(&mut out, 1, &sec1);
    section(&mut out, 2, &sec2);
    out
}

// ---------------------------------------------------------------------------
// reference verifier (arkworks)
// ---------------------------------------------------------------------------

fn ark_fq(x: &Fq) -> ark_bn254::Fq {
    ark_bn254::Fq::from(BigUint::from_bytes_le(&x.to_bytes()))
}

fn ark_fq_dec(s: &str) -> ark_bn254::Fq {
    ark_bn254::Fq::from(BigUint::from_str(s).unwrap())
}

fn ark_g1(p: &G1Affine) -> ark_bn254::G1Affine {
    if p.is_identity() {
        ark_bn254::G1Affine::zero()
    } else {
        ark_bn254::G1Affine::new(ark_fq(&p.x), ark_fq(&p.y))
    }
}

fn ark_g2(p: &G2Affine) -> ark_bn254::G2Affine {
    ark_bn254::G2Affine::new(
        ark_bn254::Fq2::new(ark_fq(&p.x.c0), ark_fq(&p.x.c1)),
        ark_bn254::Fq2::new(ark_fq(&p.y.c0), ark_fq(&p.y.c1)),
    )
}

fn json_str(v: &serde_json::Value) -> &str {
    v.as_str().expect("expected a JSON string")
}

/// Checks the Groth16 pairing equation with arkworks:
/// e(pi_a, pi_b) == e(alpha, beta) * e(IC(pub), gamma) * e(pi_c, delta).
fn reference_verify(vk: &VerifyKey, proof_json: &str, public_json: &str) -> bool {
    let proof: serde_json::Value = serde_json::from_str(proof_json).unwrap();
    assert_eq!(proof["protocol"], "groth16");

    let pi_a = ark_bn254::G1Affine::new(
        ark_fq_dec(json_str(&proof["pi_a"][0])),
        ark_fq_dec(json_str(&proof["pi_a"][1])),
    );
    let pi_b = ark_bn254::G2Affine::new(
        ark_bn254::Fq2::new(
            ark_fq_dec(json_str(&proof["pi_b"][0][0])),
            ark_fq_dec(json_str(&proof["pi_b"][0][1])),
        ),
        ark_bn254::Fq2::new(
            ark_fq_dec(json_str(&proof["pi_b"][1][0])),
            ark_fq_dec(json_str(&proof["pi_b"][1][1])),
        ),
    );
    let pi_c = ark_bn254::G1Affine::new(
        ark_fq_dec(json_str(&proof["pi_c"][0])),
        ark_fq_dec(json_str(&proof["pi_c"][1])),
    );

    let publics: Vec<String> = serde_json::from_str(public_json).unwrap();
    assert_eq!(publics.len(), vk.ic.len() - 1);
    let mut ic_agg = vk.ic[0].to_projective();
    for (value, point) in publics.iter().zip(&vk.ic[1..]) {
        let scalar = Fr::from_string_radix(value, 10).unwrap();
        ic_agg = ic_agg.add(&point.mul_fr(&scalar));
    }

    let lhs = ark_bn254::Bn254::pairing(pi_a, pi_b);
    let rhs = ark_bn254::Bn254::pairing(ark_g1(&vk.alpha1), ark_g2(&vk.beta2))
        + ark_bn254::Bn254::pairing(ark_g1(&ic_agg.to_affine()), ark_g2(&vk.gamma2))
        + ark_bn254::Bn254::pairing(pi_c, ark_g2(&vk.delta2));
    lhs == rhs
}

// ---------------------------------------------------------------------------
// scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_prove_and_verify() {
    let setup = multiplier2_setup(None, None);
    let wtns = build_wtns(&[1, 6, 2, 3]);

    let prover = FullProver::new(&setup.zkey, None);
    assert_eq!(prover.state(), ProverState::Ready);

    let (proof_json, public_json) = prover.prove(&wtns).unwrap();
    assert_eq!(public_json, r#"["6"]"#);
    assert!(reference_verify(&setup.vk, &proof_json, &public_json));
}

#[test]
fn test_unsatisfied_witness_fails_verification() {
    let setup = multiplier2_setup(None, None);
    // 2 * 3 != 7: the prover does not check satisfiability, so it must
    // still emit points, and the reference verifier must reject them.
    let wtns = build_wtns(&[1, 7, 2, 3]);

    let prover = FullProver::new(&setup.zkey, None);
    let (proof_json, public_json) = prover.prove(&wtns).unwrap();
    assert!(!reference_verify(&setup.vk, &proof_json, &public_json));
}

#[test]
fn test_wrong_curve_zkey_rejected() {
    let mut wrong_r = fr_modulus_bytes();
    wrong_r[0] ^= 1;
    let setup = multiplier2_setup(Some(wrong_r), None);

    let prover = FullProver::new(&setup.zkey, None);
    assert_eq!(prover.state(), ProverState::Failed);
    assert_eq!(prover.init_error(), Some(&ProverError::UnsupportedCurve));
    assert_eq!(
        prover.prove(&build_wtns(&[1, 6, 2, 3])).unwrap_err(),
        ProverError::ProverNotReady
    );

    // the one-shot entry point surfaces the underlying cause
    assert_eq!(
        groth16_prover::prove(&setup.zkey, &build_wtns(&[1, 6, 2, 3])).unwrap_err(),
        ProverError::UnsupportedCurve
    );
}

#[test]
fn test_wrong_curve_witness_rejected() {
    let setup = multiplier2_setup(None, None);
    let mut wtns = build_wtns(&[1, 6, 2, 3]);
    // corrupt the declared prime inside section 1 (magic 4 + version 4 +
    // count 4 + section id 4 + size 8 + n8 4 puts it at offset 28)
    wtns[28] ^= 1;
    let prover = FullProver::new(&setup.zkey, None);
    assert_eq!(
        prover.prove(&wtns).unwrap_err(),
        ProverError::UnsupportedCurve
    );
}

#[test]
fn test_witness_length_mismatch() {
    let setup = multiplier2_setup(None, None);
    // one field element short, but internally consistent
    let wtns = build_wtns(&[1, 6, 2]);
    let prover = FullProver::new(&setup.zkey, None);
    assert_eq!(
        prover.prove(&wtns).unwrap_err(),
        ProverError::WitnessMismatch {
            expected: 4,
            found: 3
        }
    );
}

#[test]
fn test_thread_invariance() {
    let setup = multiplier2_setup(None, None);
    let wtns = build_wtns(&[1, 6, 2, 3]);

    let serial = FullProver::new(&setup.zkey, Some(1));
    let parallel = FullProver::new(&setup.zkey, Some(8));

    // with the blinding randomness pinned, the two proofs must be
    // bit-identical; with fresh randomness, both must verify
    let out1 = serial
        .prove_with_rng(&wtns, &mut ChaCha20Rng::seed_from_u64(7))
        .unwrap();
    let out8 = parallel
        .prove_with_rng(&wtns, &mut ChaCha20Rng::seed_from_u64(7))
        .unwrap();
    assert_eq!(out1, out8);

    let (p1, s1) = serial.prove(&wtns).unwrap();
    let (p8, s8) = parallel.prove(&wtns).unwrap();
    assert!(reference_verify(&setup.vk, &p1, &s1));
    assert!(reference_verify(&setup.vk, &p8, &s8));
}

#[test]
fn test_determinism_with_fixed_rng() {
    let setup = multiplier2_setup(None, None);
    let wtns = build_wtns(&[1, 6, 2, 3]);
    let prover = FullProver::new(&setup.zkey, None);

    let a = prover
        .prove_with_rng(&wtns, &mut ChaCha20Rng::seed_from_u64(42))
        .unwrap();
    let b = prover
        .prove_with_rng(&wtns, &mut ChaCha20Rng::seed_from_u64(42))
        .unwrap();
    assert_eq!(a, b);

    let c = prover
        .prove_with_rng(&wtns, &mut ChaCha20Rng::seed_from_u64(43))
        .unwrap();
    assert_ne!(a, c);
    // and the re-randomized proof still verifies
    let (proof_json, public_json) = c;
    assert!(reference_verify(&setup.vk, &proof_json, &public_json));
}

#[test]
fn test_domain_overflow() {
    let setup = multiplier2_setup(None, Some(1u32 << 29));
    let prover = FullProver::new(&setup.zkey, None);
    assert_eq!(prover.state(), ProverState::Failed);
    assert!(matches!(
        prover.init_error(),
        Some(&ProverError::DomainOverflow { .. })
    ));
}

#[test]
fn test_prove_into_buffers() {
    let setup = multiplier2_setup(None, None);
    let wtns = build_wtns(&[1, 6, 2, 3]);
    let prover = FullProver::new(&setup.zkey, None);

    let mut tiny = [0u8; 8];
    let mut tiny2 = [0u8; 8];
    let err = prover.prove_into(&wtns, &mut tiny, &mut tiny2).unwrap_err();
    let (proof_len, public_len) = match err {
        ProverError::ShortBuffer {
            proof_len,
            public_len,
        } => (proof_len, public_len),
        other => panic!("expected ShortBuffer, got {:?}", other),
    };
    assert!(proof_len > 8 && public_len > 8);

    let mut proof_buf = vec![0u8; proof_len + 64];
    let mut public_buf = vec![0u8; public_len + 64];
    let (wrote_proof, wrote_public) = prover
        .prove_into(&wtns, &mut proof_buf, &mut public_buf)
        .unwrap();
    let proof_json = std::str::from_utf8(&proof_buf[..wrote_proof]).unwrap();
    let public_json = std::str::from_utf8(&public_buf[..wrote_public]).unwrap();
    assert!(reference_verify(&setup.vk, proof_json, public_json));
}
