//! The converted Structured Reference String and post-load utilities
//!
//! [`Srs`] is the in-memory result of one conversion: the τ·G1 proving basis
//! and the `[G2, τ·G2]` verifying pair. It is assembled once by
//! [`crate::read_srs`] and never mutated afterwards; ownership transfers
//! entirely to the caller.
//!
//! The parser only guarantees that every point is on its curve. Whether the
//! points are a *consistent* powers-of-tau sequence from the ceremony you
//! think they are is a separate question, answered two ways:
//!
//! - [`Srs::check_pairing`] — an algebraic spot check,
//!   `e(τ·G1, G2) = e(G1, τ·G2)`. Two pairings, so run it once after loading,
//!   not per use.
//! - [`Srs::g1_digest`] / [`Srs::g2_digest`] — BLAKE3 over the compressed
//!   canonical serialization, for comparison against published ceremony
//!   digests.
//!
//! [`Srs::save`] persists the result in compressed arkworks format
//! (`Vec<G1Affine>` and `[G2, τ·G2]`), the shape downstream KZG provers
//! load directly. The core parser itself does no file I/O.

#![forbid(unsafe_code)]

use std::path::Path;

use ark_bn254::{Bn254, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_serialize::CanonicalSerialize;

/// Errors from the post-conversion utilities (persistence and validation).
#[derive(Debug, thiserror::Error)]
pub enum SrsError {
    /// File I/O failure while persisting the SRS.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arkworks serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The SRS is not an algebraically consistent powers-of-tau sequence.
    #[error("pairing check failed: {0}")]
    PairingCheck(String),
}

/// KZG public parameters recovered from a powers-of-tau transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srs {
    /// Proving basis `[G1, τ·G1, τ²·G1, ...]`, length `2·2^power − 1`.
    pub g1_powers: Vec<G1Affine>,
    /// Verifying-key G1 generator; equals `g1_powers[0]` by construction.
    pub vk_g1: G1Affine,
    /// Verifying-key G2 pair `[G2, τ·G2]`.
    pub vk_g2: [G2Affine; 2],
}

impl Srs {
    /// Largest polynomial degree this basis can commit to.
    pub fn max_degree(&self) -> usize {
        self.g1_powers.len() - 1
    }

    /// Verify `e(τ·G1, G2) = e(G1, τ·G2)`.
    ///
    /// Holding means the degree-1 elements of both groups hide the same τ.
    /// It does **not** prove the full basis is consistent, nor that the SRS
    /// came from a trusted ceremony — compare digests for that.
    pub fn check_pairing(&self) -> Result<(), SrsError> {
        if self.g1_powers.len() < 2 {
            return Err(SrsError::PairingCheck(
                "need at least 2 G1 powers for the pairing check".into(),
            ));
        }

        let lhs = Bn254::pairing(self.g1_powers[1], self.vk_g2[0]);
        let rhs = Bn254::pairing(self.g1_powers[0], self.vk_g2[1]);
        if lhs != rhs {
            return Err(SrsError::PairingCheck(
                "e(τ·G1, G2) != e(G1, τ·G2)".into(),
            ));
        }
        Ok(())
    }

    /// BLAKE3 digest of the compressed G1 basis, for ceremony audit trails.
    pub fn g1_digest(&self) -> Result<[u8; 32], SrsError> {
        let mut bytes = Vec::new();
        self.g1_powers
            .serialize_compressed(&mut bytes)
            .map_err(|e| SrsError::Serialization(format!("G1 powers: {e}")))?;
        Ok(*blake3::hash(&bytes).as_bytes())
    }

    /// BLAKE3 digest of the compressed `[G2, τ·G2]` pair.
    pub fn g2_digest(&self) -> Result<[u8; 32], SrsError> {
        let mut bytes = Vec::new();
        self.vk_g2
            .to_vec()
            .serialize_compressed(&mut bytes)
            .map_err(|e| SrsError::Serialization(format!("G2 pair: {e}")))?;
        Ok(*blake3::hash(&bytes).as_bytes())
    }

    /// Persist the SRS as two compressed arkworks files: the full G1 basis
    /// and the `[G2, τ·G2]` pair.
    pub fn save(
        &self,
        g1_path: impl AsRef<Path>,
        g2_path: impl AsRef<Path>,
    ) -> Result<(), SrsError> {
        let mut g1_bytes = Vec::new();
        self.g1_powers
            .serialize_compressed(&mut g1_bytes)
            .map_err(|e| SrsError::Serialization(format!("G1 powers: {e}")))?;
        std::fs::write(g1_path.as_ref(), g1_bytes)?;

        let mut g2_bytes = Vec::new();
        self.vk_g2
            .to_vec()
            .serialize_compressed(&mut g2_bytes)
            .map_err(|e| SrsError::Serialization(format!("G2 pair: {e}")))?;
        std::fs::write(g2_path.as_ref(), g2_bytes)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, Group};
    use ark_ff::{Field, UniformRand};
    use ark_serialize::CanonicalDeserialize;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_srs(power: u32) -> Srs {
        let mut rng = StdRng::from_seed([42u8; 32]);
        let tau = Fr::rand(&mut rng);

        let num_g1 = (1usize << power) * 2 - 1;
        let g1_gen = G1Projective::generator();
        let mut g1_powers = Vec::with_capacity(num_g1);
        let mut tau_pow = Fr::ONE;
        for _ in 0..num_g1 {
            g1_powers.push((g1_gen * tau_pow).into_affine());
            tau_pow *= tau;
        }

        let g2_gen = G2Projective::generator();
        Srs {
            vk_g1: g1_powers[0],
            g1_powers,
            vk_g2: [g2_gen.into_affine(), (g2_gen * tau).into_affine()],
        }
    }

    #[test]
    fn max_degree_counts_from_basis_length() {
        assert_eq!(sample_srs(0).max_degree(), 0);
        assert_eq!(sample_srs(2).max_degree(), 6);
    }

    #[test]
    fn pairing_check_accepts_consistent_srs() {
        sample_srs(2).check_pairing().unwrap();
    }

    #[test]
    fn pairing_check_rejects_tampered_srs() {
        let mut srs = sample_srs(2);
        srs.g1_powers.swap(1, 2);
        assert!(matches!(
            srs.check_pairing(),
            Err(SrsError::PairingCheck(_))
        ));
    }

    #[test]
    fn pairing_check_needs_two_powers() {
        assert!(sample_srs(0).check_pairing().is_err());
    }

    #[test]
    fn digests_are_deterministic_and_distinguish_content() {
        let a = sample_srs(1);
        let b = sample_srs(1);
        assert_eq!(a.g1_digest().unwrap(), b.g1_digest().unwrap());
        assert_eq!(a.g2_digest().unwrap(), b.g2_digest().unwrap());

        let bigger = sample_srs(2);
        assert_ne!(a.g1_digest().unwrap(), bigger.g1_digest().unwrap());
    }

    #[test]
    fn save_writes_loadable_arkworks_files() {
        let dir = tempfile::tempdir().unwrap();
        let g1_path = dir.path().join("G1.bin");
        let g2_path = dir.path().join("G2.bin");

        let srs = sample_srs(2);
        srs.save(&g1_path, &g2_path).unwrap();

        let g1_bytes = std::fs::read(&g1_path).unwrap();
        let loaded_g1: Vec<G1Affine> =
            CanonicalDeserialize::deserialize_compressed(g1_bytes.as_slice()).unwrap();
        assert_eq!(loaded_g1, srs.g1_powers);

        let g2_bytes = std::fs::read(&g2_path).unwrap();
        let loaded_g2: Vec<G2Affine> =
            CanonicalDeserialize::deserialize_compressed(g2_bytes.as_slice()).unwrap();
        assert_eq!(loaded_g2, srs.vk_g2.to_vec());
    }
}
