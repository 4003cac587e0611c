//! Radix-2 number-theoretic transform over the BN254 scalar field.
//!
//! The domain precomputes every power of a primitive 2^s-th root of unity
//! up front; butterflies then index the table instead of multiplying
//! twiddles on the fly. The inverse transform reuses the forward pass and
//! fixes the ordering with a mirror swap plus one scaling sweep, so no
//! inverse-root table is needed.

use bn254curves::bn254::Fr;
use ff::PrimeField;
use rayon::prelude::*;

use crate::error::ProverError;
use crate::multicore::{parallelize, Worker};

/// Stage size above which the butterflies of a single block are split
/// across threads instead of the blocks themselves.
const PAR_INNER_THRESHOLD: usize = 1 << 11;

pub struct Radix2Domain {
    log_len: u32,
    roots: Vec<Fr>,
    pow_two_inv: Vec<Fr>,
}

impl Radix2Domain {
    /// Builds a domain supporting transforms up to 2^max_log_len, failing
    /// when that exceeds the 2-adicity of the scalar field.
    pub fn new(max_log_len: u32, worker: &Worker) -> Result<Radix2Domain, ProverError> {
        if max_log_len > Fr::S {
            return Err(ProverError::DomainOverflow {
                domain_size: 1u64 << max_log_len,
                max: 1u64 << Fr::S,
            });
        }

        let mut omega = Fr::root_of_unity();
        for _ in max_log_len..Fr::S {
            omega = omega.square();
        }

        let n = 1usize << max_log_len;
        let mut roots = vec![Fr::zero(); n];
        parallelize(worker, &mut roots, |chunk, start| {
            let mut cur = omega.pow_vartime(&[start as u64]);
            for r in chunk.iter_mut() {
                *r = cur;
                cur *= omega;
            }
        });
        debug_assert!(roots[n - 1] * omega == Fr::one());

        let two_inv = Fr::from(2)
            .invert()
            .expect("2 is invertible in a field of odd order");
        let mut pow_two_inv = Vec::with_capacity(max_log_len as usize + 1);
        pow_two_inv.push(Fr::one());
        for k in 1..=max_log_len as usize {
            let prev = pow_two_inv[k - 1];
            pow_two_inv.push(prev * two_inv);
        }

        Ok(Radix2Domain {
            log_len: max_log_len,
            roots,
            pow_two_inv,
        })
    }

    pub fn max_log_len(&self) -> u32 {
        self.log_len
    }

    /// The j-th power of the primitive 2^log_size-th root of unity.
    #[inline]
    pub fn root(&self, log_size: u32, j: usize) -> Fr {
        self.roots[j << (self.log_len - log_size)]
    }

    /// In-place forward transform. The length must be a power of two no
    /// larger than the domain.
    pub fn fft(&self, a: &mut [Fr], worker: &Worker) {
        let n = a.len();
        assert!(n.is_power_of_two());
        let log_n = n.trailing_zeros();
        assert!(log_n <= self.log_len);

        bit_reverse(a, log_n);

        worker.install(|| {
            for s in 1..=log_n {
                let m = 1usize << s;
                let mdiv2 = m >> 1;
                let twiddle_shift = (self.log_len - s) as usize;
                if mdiv2 >= PAR_INNER_THRESHOLD {
                    for block in a.chunks_mut(m) {
                        let (lo, hi) = block.split_at_mut(mdiv2);
                        lo.par_iter_mut()
                            .zip(hi.par_iter_mut())
                            .enumerate()
                            .for_each(|(j, (u, v))| {
                                let t = self.roots[j << twiddle_shift] * *v;
                                let tu = *u;
                                *u = tu + t;
                                *v = tu - t;
                            });
                    }
                } else {
                    a.par_chunks_mut(m).for_each(|block| {
                        let (lo, hi) = block.split_at_mut(mdiv2);
                        for j in 0..mdiv2 {
                            let t = self.roots[j << twiddle_shift] * hi[j];
                            let u = lo[j];
                            lo[j] = u + t;
                            hi[j] = u - t;
                        }
                    });
                }
            }
        });
    }

    /// In-place inverse transform: forward pass, mirror swap, then one
    /// multiplication by 2^-log(n) per entry.
    pub fn ifft(&self, a: &mut [Fr], worker: &Worker) {
        self.fft(a, worker);

        let n = a.len();
        let log_n = n.trailing_zeros();
        let inv = self.pow_two_inv[log_n as usize];
        if n == 1 {
            a[0] *= inv;
            return;
        }

        let (lo, hi) = a.split_at_mut(n / 2);
        worker.install(|| {
            lo[1..]
                .par_iter_mut()
                .zip(hi[1..].par_iter_mut().rev())
                .for_each(|(x, y)| {
                    let t = *x;
                    *x = *y * inv;
                    *y = t * inv;
                });
        });
        lo[0] *= inv;
        hi[0] *= inv;
    }
}

/// In-place bit-reversal permutation via 32-bit word reversal; the domain
/// bound of 2^28 keeps the shift in range.
fn bit_reverse(a: &mut [Fr], log_n: u32) {
    if log_n == 0 {
        return;
    }
    for i in 0..a.len() {
        let r = (i as u32).reverse_bits() as usize >> (32 - log_n);
        if i < r {
            a.swap(i, r);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ff::Field;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn random_poly(n: usize, seed: u64) -> Vec<Fr> {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        (0..n).map(|_| Fr::random(&mut rng)).collect()
    }

    #[test]
    fn test_round_trip() {
        let worker = Worker::new(Some(4));
        let domain = Radix2Domain::new(12, &worker).unwrap();
        for log_n in [0u32, 1, 4, 10, 12] {
            let orig = random_poly(1 << log_n, 0x40 + log_n as u64);
            let mut a = orig.clone();
            domain.fft(&mut a, &worker);
            domain.ifft(&mut a, &worker);
            assert_eq!(a, orig, "log_n = {}", log_n);
        }
    }

    #[test]
    fn test_dft_matches_direct_evaluation() {
        let worker = Worker::new(Some(2));
        let domain = Radix2Domain::new(6, &worker).unwrap();
        let n = 8usize;
        let coeffs = random_poly(n, 0x99);
        let mut evals = coeffs.clone();
        domain.fft(&mut evals, &worker);

        let omega = domain.root(3, 1);
        for (k, eval) in evals.iter().enumerate() {
            let x = omega.pow_vartime(&[k as u64]);
            let mut acc = Fr::zero();
            for c in coeffs.iter().rev() {
                acc = acc * x + c;
            }
            assert_eq!(*eval, acc, "k = {}", k);
        }
    }

    #[test]
    fn test_convolution_theorem() {
        // multiplication via pointwise product equals the schoolbook
        // product modulo x^n - 1
        let worker = Worker::default();
        let domain = Radix2Domain::new(4, &worker).unwrap();
        let n = 8usize;
        let a = random_poly(n, 0xa);
        let b = random_poly(n, 0xb);

        let mut fa = a.clone();
        let mut fb = b.clone();
        domain.fft(&mut fa, &worker);
        domain.fft(&mut fb, &worker);
        let mut fc: Vec<Fr> = fa.iter().zip(&fb).map(|(x, y)| *x * *y).collect();
        domain.ifft(&mut fc, &worker);

        let mut expected = vec![Fr::zero(); n];
        for i in 0..n {
            for j in 0..n {
                expected[(i + j) % n] += a[i] * b[j];
            }
        }
        assert_eq!(fc, expected);
    }

    #[test]
    fn test_domain_overflow() {
        let worker = Worker::default();
        assert!(matches!(
            Radix2Domain::new(Fr::S + 1, &worker),
            Err(ProverError::DomainOverflow { .. })
        ));
    }

    #[test]
    fn test_thread_invariance() {
        let orig = random_poly(1 << 10, 0xcc);
        let mut reference = orig.clone();
        let w1 = Worker::new(Some(1));
        let d1 = Radix2Domain::new(10, &w1).unwrap();
        d1.fft(&mut reference, &w1);
        for threads in [2usize, 8] {
            let w = Worker::new(Some(threads));
            let d = Radix2Domain::new(10, &w).unwrap();
            let mut a = orig.clone();
            d.fft(&mut a, &w);
            assert_eq!(a, reference);
        }
    }
}
