//! Bucketed parallel multi-scalar multiplication.
//!
//! Pippenger's algorithm over 256-bit little-endian scalars: the scalar is
//! cut into windows of `bits_per_chunk` bits, every window value gets a
//! bucket, and the bucket vector collapses to `sum(v * bucket[v])` with a
//! prefix-sum pass instead of a second windowed loop. Threads accumulate
//! into disjoint bucket slabs, so the inner loop needs no synchronization.

use bn254curves::xyzz::{CurveParams, Point, PointAffine};
use rayon::prelude::*;

use crate::multicore::Worker;

const PACK_FACTOR: usize = 2;
const MIN_CHUNK_BITS: u32 = 2;
const MAX_CHUNK_BITS: u32 = 16;

const SCALAR_BYTES: usize = 32;
const SCALAR_BITS: usize = SCALAR_BYTES * 8;

/// Computes `sum(scalars[i] * bases[i])`.
///
/// Identity bases are skipped; an empty input yields the identity and a
/// single pair dispatches to the NAF path.
pub fn multiexp<C: CurveParams>(
    bases: &[PointAffine<C>],
    scalars: &[[u8; SCALAR_BYTES]],
    worker: &Worker,
) -> Point<C> {
    assert_eq!(bases.len(), scalars.len());
    multiexp_inner(bases, scalars, worker, |_| true)
}

/// The strided variant: the base array is treated as `nx` interleaved
/// columns and only the first `lens[m]` entries of column `m` participate.
pub fn multiexp_striped<C: CurveParams>(
    bases: &[PointAffine<C>],
    scalars: &[[u8; SCALAR_BYTES]],
    nx: usize,
    lens: &[u64],
    worker: &Worker,
) -> Point<C> {
    assert_eq!(bases.len(), scalars.len());
    assert_eq!(lens.len(), nx);
    multiexp_inner(bases, scalars, worker, |i| {
        ((i / nx) as u64) < lens[i % nx]
    })
}

fn multiexp_inner<C: CurveParams>(
    bases: &[PointAffine<C>],
    scalars: &[[u8; SCALAR_BYTES]],
    worker: &Worker,
    keep: impl Fn(usize) -> bool + Send + Sync,
) -> Point<C> {
    let n = bases.len();
    if n == 0 {
        return Point::identity();
    }
    if n == 1 {
        return bases[0].mul_bytes(&scalars[0]);
    }

    let bits_per_chunk = ((n / PACK_FACTOR).max(1) as u64)
        .ilog2()
        .clamp(MIN_CHUNK_BITS, MAX_CHUNK_BITS);
    let n_chunks = (SCALAR_BITS - 1) / bits_per_chunk as usize + 1;
    let accs_per_chunk = 1usize << bits_per_chunk;

    // Split the pairs into one contiguous range per pool thread; every range
    // owns a full bucket slab.
    let range_len = (n + worker.num_threads() - 1) / worker.num_threads();

    let mut chunk_results = Vec::with_capacity(n_chunks);
    for chunk_idx in 0..n_chunks {
        let mut slabs: Vec<Vec<Point<C>>> = worker.install(|| {
            bases
                .par_chunks(range_len)
                .zip(scalars.par_chunks(range_len))
                .enumerate()
                .map(|(range_idx, (bs, ss))| {
                    let mut accs = vec![Point::<C>::identity(); accs_per_chunk];
                    let offset = range_idx * range_len;
                    for (i, (base, scalar)) in bs.iter().zip(ss.iter()).enumerate() {
                        if !keep(offset + i) || base.is_identity() {
                            continue;
                        }
                        let v = chunk_value(scalar, chunk_idx, bits_per_chunk);
                        if v != 0 {
                            accs[v] = accs[v].add_mixed(base);
                        }
                    }
                    accs
                })
                .collect()
        });

        // Fold the per-range slabs into the first one, bucket by bucket.
        let (head, rest) = slabs.split_at_mut(1);
        worker.install(|| {
            head[0].par_iter_mut().enumerate().for_each(|(v, acc)| {
                for slab in rest.iter() {
                    if !slab[v].is_identity() {
                        *acc = acc.add(&slab[v]);
                    }
                }
            })
        });

        chunk_results.push(reduce(&mut head[0], bits_per_chunk, worker));
    }

    // Combine the window results from the most significant chunk down.
    let mut r = chunk_results[n_chunks - 1];
    for chunk in chunk_results[..n_chunks - 1].iter().rev() {
        for _ in 0..bits_per_chunk {
            r = r.dbl();
        }
        r = r.add(chunk);
    }
    r
}

/// Collapses `accs[1..2^n_bits]` to `sum(v * accs[v])`.
///
/// Each level folds the upper half into the lower half while keeping a
/// running sum of the upper half; that sum, doubled `n_bits - 1` times,
/// contributes exactly the high window bit of every folded bucket.
fn reduce<C: CurveParams>(accs: &mut [Point<C>], n_bits: u32, worker: &Worker) -> Point<C> {
    if n_bits == 1 {
        return accs[1];
    }
    let ndiv2 = 1usize << (n_bits - 1);
    let (lo, hi) = accs.split_at_mut(ndiv2);

    let partial = worker.install(|| {
        lo[1..]
            .par_iter_mut()
            .zip(hi[1..].par_iter_mut())
            .map(|(a, b)| {
                if b.is_identity() {
                    Point::identity()
                } else {
                    let c = *b;
                    *a = a.add(&c);
                    c
                }
            })
            .reduce(Point::identity, |x, y| x.add(&y))
    });
    hi[0] = hi[0].add(&partial);

    let p1 = reduce(lo, n_bits - 1, worker);

    let mut shifted = hi[0];
    for _ in 0..n_bits - 1 {
        shifted = shifted.dbl();
    }
    p1.add(&shifted)
}

/// Extracts the `bits`-bit window of a scalar starting at bit
/// `chunk * bits`, reading a clamped 8-byte word like the original so the
/// top window shortens instead of over-reading.
fn chunk_value(scalar: &[u8; SCALAR_BYTES], chunk: usize, bits: u32) -> usize {
    let bit_start = chunk * bits as usize;
    let mut eff_bits = bits as usize;
    if bit_start + eff_bits > SCALAR_BITS {
        eff_bits = SCALAR_BITS - bit_start;
    }
    let byte_start = (bit_start / 8).min(SCALAR_BYTES - 8);
    let shift = bit_start - byte_start * 8;
    let word = u64::from_le_bytes(scalar[byte_start..byte_start + 8].try_into().unwrap());
    ((word >> shift) & ((1u64 << eff_bits) - 1)) as usize
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::multicore::Worker;
    use bn254curves::bn254::{G1Affine, G1Curve, G1};
    use rand::{RngCore, SeedableRng};
    use rand_xorshift::XorShiftRng;

    /// n distinct small multiples of the generator, built by a cheap
    /// addition chain.
    fn test_bases(n: usize) -> Vec<G1Affine> {
        let g = G1Affine::generator();
        let mut acc = G1::identity();
        (0..n)
            .map(|_| {
                acc = acc.add_mixed(&g);
                acc.to_affine()
            })
            .collect()
    }

    fn test_scalars(n: usize, seed: u64) -> Vec<[u8; 32]> {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let mut s = [0u8; 32];
                rng.fill_bytes(&mut s);
                s
            })
            .collect()
    }

    fn naive(bases: &[G1Affine], scalars: &[[u8; 32]]) -> G1 {
        bases
            .iter()
            .zip(scalars)
            .fold(G1::identity(), |acc, (b, s)| acc.add(&b.mul_bytes(s)))
    }

    #[test]
    fn test_matches_naive() {
        let worker = Worker::new(Some(4));
        for n in [1usize, 2, 100, 1000] {
            let bases = test_bases(n);
            let scalars = test_scalars(n, 0x1000 + n as u64);
            assert_eq!(
                multiexp::<G1Curve>(&bases, &scalars, &worker),
                naive(&bases, &scalars),
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn test_thread_count_invariance() {
        let n = 10_000;
        let bases = test_bases(n);
        let scalars = test_scalars(n, 0xabcd);
        let reference = multiexp::<G1Curve>(&bases, &scalars, &Worker::new(Some(1)));
        for threads in [2usize, 4, 16] {
            let worker = Worker::new(Some(threads));
            assert_eq!(
                multiexp::<G1Curve>(&bases, &scalars, &worker),
                reference,
                "threads = {}",
                threads
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let worker = Worker::default();
        assert!(multiexp::<G1Curve>(&[], &[], &worker).is_identity());
    }

    #[test]
    fn test_identity_bases_skipped() {
        let worker = Worker::default();
        let mut bases = test_bases(50);
        let scalars = test_scalars(50, 0x77);
        let full = multiexp::<G1Curve>(&bases, &scalars, &worker);
        // zeroing a base is the same as zeroing its scalar
        bases[7] = G1Affine::identity();
        let skipped = multiexp::<G1Curve>(&bases, &scalars, &worker);
        let expected = full.sub(&test_bases(50)[7].mul_bytes(&scalars[7]));
        assert_eq!(skipped, expected);
    }

    #[test]
    fn test_striped_filter() {
        let worker = Worker::default();
        let n = 64;
        let nx = 4;
        let lens = [16u64, 3, 0, 9];
        let bases = test_bases(n);
        let scalars = test_scalars(n, 0x5151);
        let expected = bases
            .iter()
            .zip(&scalars)
            .enumerate()
            .filter(|(i, _)| ((i / nx) as u64) < lens[i % nx])
            .fold(G1::identity(), |acc, (_, (b, s))| acc.add(&b.mul_bytes(s)));
        assert_eq!(
            multiexp_striped::<G1Curve>(&bases, &scalars, nx, &lens, &worker),
            expected
        );
    }
}
