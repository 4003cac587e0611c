//! Groth16 proof generation over BN254.
//!
//! The crate consumes a compiled proving key (`.zkey`, Groth16 v1) and a
//! witness assignment (`.wtns` v2) and emits the three-point proof plus the
//! public-input vector as JSON, in the layout downstream snarkjs-style
//! verifiers expect.
//!
//! ```no_run
//! # fn load(_: &str) -> Vec<u8> { unimplemented!() }
//! let zkey = load("circuit.zkey");
//! let wtns = load("witness.wtns");
//! let (proof_json, public_json) = groth16_prover::prove(&zkey, &wtns)?;
//! # Ok::<(), groth16_prover::ProverError>(())
//! ```
//!
//! For repeated proving against the same key, construct a [`FullProver`]
//! once; the parsed key, the root-of-unity tables, and the worker pool are
//! all reused across calls.

mod binfile;
pub mod error;
pub mod fft;
pub mod fullprover;
pub mod msm;
pub mod multicore;
pub mod proof;
pub mod prover;
pub mod wtns;
pub mod zkey;

pub use error::ProverError;
pub use fullprover::{FullProver, ProverState};
pub use proof::Proof;
pub use prover::Prover;
pub use wtns::Witness;
pub use zkey::Zkey;

/// One-shot entry point: parse both artifacts, prove, and return the
/// `(proof, public signals)` JSON documents.
pub fn prove(zkey_bytes: &[u8], wtns_bytes: &[u8]) -> Result<(String, String), ProverError> {
    let full = FullProver::new(zkey_bytes, None);
    match full.state() {
        ProverState::Ready => full.prove(wtns_bytes),
        _ => Err(full
            .init_error()
            .cloned()
            .unwrap_or(ProverError::ProverNotReady)),
    }
}
