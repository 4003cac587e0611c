//! The Groth16 proving pipeline.
//!
//! Four witness multiexps run concurrently with the quotient-polynomial
//! evaluation; the blinding scalars are applied once everything joins.
//! Every call owns its scratch vectors, so a single prover instance can
//! serve concurrent calls.

use bn254curves::bn254::{Fr, G1};
use rand_core::RngCore;
use rayon::prelude::*;
use tracing::{info_span, trace};

use crate::error::ProverError;
use crate::fft::Radix2Domain;
use crate::msm::multiexp;
use crate::multicore::{parallelize, Worker};
use crate::proof::Proof;
use crate::wtns::Witness;
use crate::zkey::Zkey;

pub struct Prover {
    zkey: Zkey,
    domain: Radix2Domain,
    worker: Worker,
    log_domain: u32,
    stripe_len: usize,
    /// Coefficient indices grouped by `constraint / stripe_len`, so the
    /// accumulation into the evaluation vectors writes disjoint stripes.
    coef_stripes: Vec<Vec<u32>>,
}

impl Prover {
    pub fn new(zkey: Zkey, worker: Worker) -> Result<Prover, ProverError> {
        let log_domain = zkey.domain_size.trailing_zeros();
        // The coset pass needs 2n-th roots of unity.
        let domain = Radix2Domain::new(log_domain + 1, &worker)?;

        let d = zkey.domain_size as usize;
        let stripe_len = (d + worker.num_threads() - 1) / worker.num_threads();
        let n_stripes = (d + stripe_len - 1) / stripe_len;
        let mut coef_stripes = vec![Vec::new(); n_stripes];
        for (i, coef) in zkey.coefs.iter().enumerate() {
            coef_stripes[coef.constraint as usize / stripe_len].push(i as u32);
        }

        Ok(Prover {
            zkey,
            domain,
            worker,
            log_domain,
            stripe_len,
            coef_stripes,
        })
    }

    pub fn zkey(&self) -> &Zkey {
        &self.zkey
    }

    pub fn prove<R: RngCore>(&self, witness: &Witness, rng: &mut R) -> Result<Proof, ProverError> {
        let _span = info_span!(
            "groth16_prove",
            n_vars = self.zkey.n_vars,
            domain_size = self.zkey.domain_size
        )
        .entered();

        if witness.n_vars != self.zkey.n_vars {
            return Err(ProverError::WitnessMismatch {
                expected: self.zkey.n_vars,
                found: witness.n_vars,
            });
        }
        if witness.values.first() != Some(&Fr::one()) {
            return Err(ProverError::MalformedContainer(
                "witness does not start with the constant 1",
            ));
        }

        let n_public = self.zkey.n_public as usize;
        let w_bytes = &witness.bytes[..];

        trace!("dispatching multiexps a, b1, b2, c and the quotient evaluation");
        let (((pi_a, pi_b1), (pi_b, pi_c_aux)), pi_h) = self.worker.install(|| {
            rayon::join(
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || multiexp(&self.zkey.a_points, w_bytes, &self.worker),
                                || multiexp(&self.zkey.b1_points, w_bytes, &self.worker),
                            )
                        },
                        || {
                            rayon::join(
                                || multiexp(&self.zkey.b2_points, w_bytes, &self.worker),
                                || {
                                    multiexp(
                                        &self.zkey.c_points,
                                        &w_bytes[n_public + 1..],
                                        &self.worker,
                                    )
                                },
                            )
                        },
                    )
                },
                || self.quotient_msm(witness),
            )
        });

        let (r_bytes, r) = random_blind(rng);
        let (s_bytes, s) = random_blind(rng);

        trace!("blinding");
        let delta1 = self.zkey.vk_delta1;

        let mut pi_a = pi_a.add_mixed(&self.zkey.vk_alpha1);
        pi_a = pi_a.add(&delta1.mul_bytes(&r_bytes));

        let mut pi_b = pi_b.add_mixed(&self.zkey.vk_beta2);
        pi_b = pi_b.add(&self.zkey.vk_delta2.mul_bytes(&s_bytes));

        let mut pi_b1 = pi_b1.add_mixed(&self.zkey.vk_beta1);
        pi_b1 = pi_b1.add(&delta1.mul_bytes(&s_bytes));

        let mut pi_c = pi_c_aux.add(&pi_h);
        pi_c = pi_c.add(&pi_a.mul_bytes(&s_bytes));
        pi_c = pi_c.add(&pi_b1.mul_bytes(&r_bytes));
        let rs = (r * s).to_bytes();
        pi_c = pi_c.sub(&delta1.mul_bytes(&rs));

        Ok(Proof {
            a: pi_a.to_affine(),
            b: pi_b.to_affine(),
            c: pi_c.to_affine(),
        })
    }

    /// Steps 3-5 of the pipeline: accumulate the A/B evaluation vectors,
    /// move them (and their pointwise product) onto the shifted coset, and
    /// multiexp the quotient evaluations against the H bases.
    fn quotient_msm(&self, witness: &Witness) -> G1 {
        let d = self.zkey.domain_size as usize;

        trace!("building qap evaluation vectors");
        let mut a = vec![Fr::zero(); d];
        let mut b = vec![Fr::zero(); d];
        self.worker.install(|| {
            a.par_chunks_mut(self.stripe_len)
                .zip(b.par_chunks_mut(self.stripe_len))
                .enumerate()
                .for_each(|(stripe, (ac, bc))| {
                    let base = stripe * self.stripe_len;
                    for &ci in &self.coef_stripes[stripe] {
                        let coef = &self.zkey.coefs[ci as usize];
                        let t = witness.values[coef.signal as usize] * coef.value;
                        let slot = coef.constraint as usize - base;
                        if coef.matrix == 0 {
                            ac[slot] += t;
                        } else {
                            bc[slot] += t;
                        }
                    }
                });
        });

        let mut c: Vec<Fr> = self
            .worker
            .install(|| a.par_iter().zip(&b).map(|(x, y)| *x * *y).collect());

        trace!("coset evaluation");
        for v in [&mut a, &mut b, &mut c] {
            self.domain.ifft(v, &self.worker);
            let log = self.log_domain;
            parallelize(&self.worker, v, |chunk, start| {
                for (i, x) in chunk.iter_mut().enumerate() {
                    *x *= self.domain.root(log + 1, start + i);
                }
            });
            self.domain.fft(v, &self.worker);
        }

        // a*b - c on the coset is Z * H there; the multiexp consumes the
        // canonical byte form.
        let h_scalars: Vec<[u8; 32]> = self.worker.install(|| {
            a.par_iter()
                .zip(&b)
                .zip(&c)
                .map(|((x, y), z)| (*x * *y - *z).to_bytes())
                .collect()
        });
        drop(a);
        drop(b);
        drop(c);

        trace!("multiexp h");
        multiexp(&self.zkey.h_points, &h_scalars, &self.worker)
    }
}

/// Draws a blinding scalar: 31 random bytes with the top byte clear, so the
/// value is below the modulus without a rejection loop.
fn random_blind<R: RngCore>(rng: &mut R) -> ([u8; 32], Fr) {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes[..31]);
    let fe = Option::from(Fr::from_bytes(&bytes)).expect("a 248-bit value is below the modulus");
    (bytes, fe)
}
