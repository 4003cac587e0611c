use std::error;
use std::fmt;

/// Everything that can go wrong between raw container bytes and a proof.
///
/// All fallible paths surface here at the public boundary; the arithmetic
/// kernels themselves are total over well-formed inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProverError {
    /// Magic/version mismatch, missing section, or a section size that
    /// disagrees with the declared counts.
    MalformedContainer(&'static str),
    /// The zkey or witness was produced for a field other than BN254's
    /// scalar field.
    UnsupportedCurve,
    /// The witness length disagrees with the proving key.
    WitnessMismatch { expected: u32, found: u32 },
    /// The evaluation domain exceeds the 2-adicity of the scalar field.
    DomainOverflow { domain_size: u64, max: u64 },
    /// A caller-supplied output buffer was too small; carries the required
    /// sizes. No proof is produced.
    ShortBuffer { proof_len: usize, public_len: usize },
    /// The prover failed construction or was poisoned by a panic.
    ProverNotReady,
    Internal(String),
}

impl fmt::Display for ProverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProverError::MalformedContainer(msg) => write!(f, "malformed container: {}", msg),
            ProverError::UnsupportedCurve => {
                write!(f, "the artifact uses a curve other than bn128")
            }
            ProverError::WitnessMismatch { expected, found } => write!(
                f,
                "witness has {} values but the proving key expects {}",
                found, expected
            ),
            ProverError::DomainOverflow { domain_size, max } => write!(
                f,
                "domain size {} exceeds the largest supported power-of-two domain {}",
                domain_size, max
            ),
            ProverError::ShortBuffer {
                proof_len,
                public_len,
            } => write!(
                f,
                "output buffers too small: need {} bytes for the proof and {} for the public signals",
                proof_len, public_len
            ),
            ProverError::ProverNotReady => write!(f, "prover is not ready"),
            ProverError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl error::Error for ProverError {}
