//! The stateful façade over the pipeline.
//!
//! Construction parses the proving key and latches the outcome: a prover
//! that failed its checks stays in the failed state and answers
//! `ProverNotReady` instead of retrying. A panic escaping a `prove` call
//! poisons the instance for good.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use rand_core::{OsRng, RngCore};

use crate::error::ProverError;
use crate::multicore::Worker;
use crate::proof::public_signals_json;
use crate::prover::Prover;
use crate::wtns::Witness;
use crate::zkey::Zkey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProverState {
    Ready,
    Failed,
    Poisoned,
}

pub struct FullProver {
    prover: Option<Prover>,
    init_error: Option<ProverError>,
    poisoned: AtomicBool,
}

impl FullProver {
    /// Parses the proving key and builds the pipeline. `threads` overrides
    /// the worker-pool size; `Some(1)` serializes every kernel.
    pub fn new(zkey_bytes: &[u8], threads: Option<usize>) -> FullProver {
        match Zkey::parse(zkey_bytes).and_then(|zkey| Prover::new(zkey, Worker::new(threads))) {
            Ok(prover) => FullProver {
                prover: Some(prover),
                init_error: None,
                poisoned: AtomicBool::new(false),
            },
            Err(err) => FullProver {
                prover: None,
                init_error: Some(err),
                poisoned: AtomicBool::new(false),
            },
        }
    }

    pub fn state(&self) -> ProverState {
        if self.poisoned.load(Ordering::Acquire) {
            ProverState::Poisoned
        } else if self.prover.is_some() {
            ProverState::Ready
        } else {
            ProverState::Failed
        }
    }

    /// Why construction failed, if it did.
    pub fn init_error(&self) -> Option<&ProverError> {
        self.init_error.as_ref()
    }

    /// Proves against a witness artifact, drawing the blinding randomness
    /// from the OS generator. Returns the proof and public-signal JSON
    /// documents.
    pub fn prove(&self, wtns_bytes: &[u8]) -> Result<(String, String), ProverError> {
        self.prove_with_rng(wtns_bytes, &mut OsRng)
    }

    /// Like [`FullProver::prove`] with a caller-supplied randomness source;
    /// with a fixed generator the output is bit-reproducible.
    pub fn prove_with_rng<R: RngCore>(
        &self,
        wtns_bytes: &[u8],
        rng: &mut R,
    ) -> Result<(String, String), ProverError> {
        if self.poisoned.load(Ordering::Acquire) {
            return Err(ProverError::ProverNotReady);
        }
        let prover = match &self.prover {
            Some(p) => p,
            None => return Err(ProverError::ProverNotReady),
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let witness = Witness::parse(wtns_bytes)?;
            let proof = prover.prove(&witness, rng)?;
            let n_public = prover.zkey().n_public as usize;
            let publics = public_signals_json(&witness.values[1..=n_public]);
            Ok((proof.to_json(), publics))
        }));

        match outcome {
            Ok(result) => result,
            Err(_) => {
                self.poisoned.store(true, Ordering::Release);
                Err(ProverError::Internal(String::from(
                    "prover poisoned by a panic",
                )))
            }
        }
    }

    /// Buffer-oriented variant: writes both JSON documents into the
    /// caller's buffers and returns the written lengths, or `ShortBuffer`
    /// carrying the required sizes when they do not fit.
    pub fn prove_into(
        &self,
        wtns_bytes: &[u8],
        proof_buf: &mut [u8],
        public_buf: &mut [u8],
    ) -> Result<(usize, usize), ProverError> {
        let (proof_json, public_json) = self.prove(wtns_bytes)?;
        let (proof_bytes, public_bytes) = (proof_json.as_bytes(), public_json.as_bytes());
        if proof_bytes.len() > proof_buf.len() || public_bytes.len() > public_buf.len() {
            return Err(ProverError::ShortBuffer {
                proof_len: proof_bytes.len(),
                public_len: public_bytes.len(),
            });
        }
        proof_buf[..proof_bytes.len()].copy_from_slice(proof_bytes);
        public_buf[..public_bytes.len()].copy_from_slice(public_bytes);
        Ok((proof_bytes.len(), public_bytes.len()))
    }
}
