//! The three-point proof and its JSON wire shape.
//!
//! Downstream verifiers consume the exact snarkjs layout: projective-style
//! triples with a trailing `"1"` (or `["1", "0"]` in the extension field),
//! every coordinate a canonical decimal string.

use bn254curves::bn254::{Fq, Fr, G1Affine, G2Affine};
use serde::Serialize;

#[derive(Clone, Copy, Debug)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

#[derive(Serialize)]
struct ProofJson {
    pi_a: [String; 3],
    pi_b: [[String; 2]; 3],
    pi_c: [String; 3],
    protocol: &'static str,
}

fn dec(x: &Fq) -> String {
    x.to_string_radix(10)
}

impl Proof {
    pub fn to_json(&self) -> String {
        let doc = ProofJson {
            pi_a: [dec(&self.a.x), dec(&self.a.y), "1".into()],
            pi_b: [
                [dec(&self.b.x.c0), dec(&self.b.x.c1)],
                [dec(&self.b.y.c0), dec(&self.b.y.c1)],
                ["1".into(), "0".into()],
            ],
            pi_c: [dec(&self.c.x), dec(&self.c.y), "1".into()],
            protocol: "groth16",
        };
        serde_json::to_string(&doc).expect("serializing a proof cannot fail")
    }
}

/// The public-signal document: `w[1..=n_public]` as canonical decimals.
pub fn public_signals_json(values: &[Fr]) -> String {
    let out: Vec<String> = values.iter().map(|v| v.to_string_radix(10)).collect();
    serde_json::to_string(&out).expect("serializing strings cannot fail")
}

#[cfg(test)]
mod test {
    use super::*;
    use bn254curves::bn254::{G1Affine, G2Affine};

    #[test]
    fn test_json_shape() {
        let proof = Proof {
            a: G1Affine::generator(),
            b: G2Affine::generator(),
            c: G1Affine::generator(),
        };
        let json: serde_json::Value = serde_json::from_str(&proof.to_json()).unwrap();
        assert_eq!(json["protocol"], "groth16");
        assert_eq!(json["pi_a"][0], "1");
        assert_eq!(json["pi_a"][1], "2");
        assert_eq!(json["pi_a"][2], "1");
        assert_eq!(json["pi_b"][2][0], "1");
        assert_eq!(json["pi_b"][2][1], "0");
        assert_eq!(
            json["pi_b"][0][0],
            "10857046999023057135944570762232829481370756359578518086990519993285655852781"
        );
    }

    #[test]
    fn test_public_signals() {
        let vals = [Fr::from(6u64), Fr::from(123u64)];
        assert_eq!(public_signals_json(&vals), r#"["6","123"]"#);
    }
}
