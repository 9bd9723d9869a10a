//! PTAU → KZG SRS conversion for BN254
//!
//! This crate turns a snarkjs powers-of-tau transcript (`.ptau`) — the
//! binary artifact of a multi-party trusted-setup ceremony such as the
//! perpetual powers of tau — into the in-memory Structured Reference String
//! a KZG polynomial-commitment scheme consumes: the τ·G1 proving basis and
//! the `[G2, τ·G2]` verifying pair.
//!
//! ## Invariants
//!
//! - **Fixed target.** BN254 only (`ark_bn254`); the base field is 32 bytes
//!   wide on the wire and a transcript declaring any other width is
//!   rejected. All arithmetic comes from Arkworks; we **forbid unsafe**
//!   throughout the crate.
//!
//! - **One forward pass.** The parser owns the stream cursor for the
//!   duration of one [`read_srs`] call, never re-reads earlier bytes, and
//!   keeps no global state — converting several files in parallel from
//!   independent readers is safe by construction.
//!
//! - **All-or-nothing.** Every point of the result has passed its on-curve
//!   check; any malformed framing, length, or coordinate aborts the whole
//!   conversion with a precise [`PtauError`]. There is no partial SRS.
//!
//! ## Usage
//!
//! ```no_run
//! use std::{fs::File, io::BufReader};
//!
//! let file = File::open("powersOfTau28_hez_final_10.ptau")?;
//! let srs = ptau_kzg::read_srs(BufReader::new(file))?;
//!
//! srs.check_pairing()?;
//! println!("max degree: {}", srs.max_degree());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Serialization of the result to disk (compressed arkworks files) lives on
//! [`Srs::save`]; the `ptau2srs` binary wires the two together.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Primitive little-endian readers and the wire → field-element conversion.
pub mod decode;
/// Sectioned transcript parsing and SRS assembly.
pub mod ptau;
/// The converted SRS value, digests, pairing check, and persistence.
pub mod srs;

/// G1 affine group element of the target curve.
pub type G1 = ark_bn254::G1Affine;

/// G2 affine group element of the target curve.
pub type G2 = ark_bn254::G2Affine;

pub use crate::ptau::{read_srs, PtauError, MAX_POWER, PTAU_FIELD_WIDTH};
pub use crate::srs::{Srs, SrsError};
