//! PTAU transcript parsing — sectioned reader and SRS assembly
//!
//! # File layout
//!
//! A snarkjs powers-of-tau transcript is a sectioned binary file (all
//! integers little-endian):
//!
//! ```text
//! offset 0 : 4 bytes  magic tag          (read, not content-checked)
//! offset 4 : u32      format version     (read, not content-checked)
//! offset 8 : u32      section count      (must be >= 3)
//! then per section:
//!   u32  section id        (must equal the running index, starting at 1)
//!   u64  section length    (bytes of payload)
//!   ...  payload
//! ```
//!
//! Only the first three sections are consumed:
//!
//! 1. **Header** — `u32 field width | 32-byte prime | u32 power |
//!    u32 ceremony power`. The prime and the ceremony power are present for
//!    self-description and are read and discarded.
//! 2. **τ·G1 powers** — `2·2^power − 1` points, each `X | Y`, 32 wire bytes
//!    per coordinate.
//! 3. **τ·G2 powers** — G2 points, each `X.c0 | X.c1 | Y.c0 | Y.c1`; KZG
//!    verification needs only `[G2, τ·G2]`, so exactly two are consumed and
//!    any trailing records are left unread. Later sections (α·τ·G1 and
//!    friends) are ignored outright.
//!
//! # Design
//!
//! [`read_srs`] is a pure function of the byte stream — no global state, so
//! multiple files can be converted in parallel from independent readers. The
//! parse is a single forward pass with no backtracking: a linear state
//! machine `magic → version → count → section 1 → section 2 → section 3`,
//! where every state either advances or aborts the whole conversion with a
//! [`PtauError`]. There is no partial result: either every point of the SRS
//! decoded and passed its on-curve check, or the caller gets the first error
//! verbatim.
//!
//! `power` is untrusted input. It is bounded by [`MAX_POWER`] before any
//! size arithmetic or allocation, so a corrupt header cannot request a
//! multi-terabyte G1 array.

#![forbid(unsafe_code)]

use std::io::Read;

use ark_bn254::{G1Affine, G2Affine};
use tracing::{debug, info};

use crate::decode::{read_array, read_fq, read_g1, read_g2, read_u32_le, read_u64_le, FQ_BYTES};
use crate::srs::Srs;

/// Wire width of one base field element, as declared in the header.
pub const PTAU_FIELD_WIDTH: u32 = FQ_BYTES as u32;

/// Largest accepted `power`.
///
/// 28 is the ceiling of the snarkjs format itself (the perpetual ceremony
/// tops out at `2^28` constraints). Anything larger is either a corrupt file
/// or an allocation attack, and is rejected before the G1 array is sized.
pub const MAX_POWER: u32 = 28;

/// Sections consumed from the transcript: header, τ·G1, τ·G2.
const MANDATORY_SECTIONS: u32 = 3;

/// G2 points needed for KZG verification: `[G2, τ·G2]`.
const VK_G2_POINTS: usize = 2;

/// Failure modes of one conversion. Fail-fast: the first error aborts the
/// whole parse and is surfaced verbatim, with enough context (section id,
/// point index, expected vs. actual) to diagnose a malformed file.
#[derive(Debug, thiserror::Error)]
pub enum PtauError {
    /// The stream ended before the required byte count was available.
    #[error("input truncated: {0}")]
    TruncatedInput(#[from] std::io::Error),

    /// Fewer than the three mandatory sections were declared.
    #[error("unexpected section count {got}, expected at least {MANDATORY_SECTIONS}")]
    InsufficientSectionCount {
        /// Declared section count.
        got: u32,
    },

    /// A section id was out of sequence.
    #[error("unexpected section id {got}, expected {expected}")]
    UnexpectedSectionOrder {
        /// Section id found in the stream.
        got: u32,
        /// Running index that was required.
        expected: u32,
    },

    /// A declared section length disagrees with the formula for that section.
    #[error("section {section}: unexpected length {got}, expected {expected}")]
    SectionLengthMismatch {
        /// Section id being validated.
        section: u32,
        /// Length declared in the file.
        got: u64,
        /// Length implied by the header.
        expected: u64,
    },

    /// The header's field byte width does not match BN254.
    #[error("unexpected field width {got} bytes, expected {expected}")]
    UnexpectedFieldWidth {
        /// Width declared in the file.
        got: u32,
        /// Width of the target field.
        expected: u32,
    },

    /// The declared power would require an unreasonable allocation.
    #[error("power {got} exceeds supported maximum {max}")]
    PowerTooLarge {
        /// Power declared in the file.
        got: u32,
        /// Largest accepted power.
        max: u32,
    },

    /// A decoded point does not satisfy its curve equation.
    #[error("{group} point {index} is not on the curve: x = {x}, y = {y}")]
    InvalidCurvePoint {
        /// `"G1"` or `"G2"`.
        group: &'static str,
        /// Zero-based index of the offending point within its section.
        index: u64,
        /// X coordinate as decoded.
        x: String,
        /// Y coordinate as decoded.
        y: String,
    },
}

/// Convert a powers-of-tau transcript into an in-memory KZG [`Srs`].
///
/// One forward pass over `reader`; the stream cursor is exclusively owned by
/// this call and nothing is re-read. On success the proving basis holds
/// `2·2^power − 1` G1 points, the verifying-key G1 generator equals the
/// basis's first element, and the verifying key carries exactly two G2
/// points; every point has passed its on-curve check.
pub fn read_srs<R: Read>(mut reader: R) -> Result<Srs, PtauError> {
    // Magic tag and version are recorded by the ceremony tool but carry no
    // information we act on; any value is tolerated.
    let _magic: [u8; 4] = read_array(&mut reader)?;
    let _version = read_u32_le(&mut reader)?;

    let sections = read_u32_le(&mut reader)?;
    if sections < MANDATORY_SECTIONS {
        return Err(PtauError::InsufficientSectionCount { got: sections });
    }
    debug!(sections, "transcript declares sections");

    let header_len = expect_section(&mut reader, 1)?;
    let power = parse_header(&mut reader, header_len)?;
    if power > MAX_POWER {
        return Err(PtauError::PowerTooLarge {
            got: power,
            max: MAX_POWER,
        });
    }
    debug!(power, "parsed transcript header");

    let g1_len = expect_section(&mut reader, 2)?;
    let g1_powers = load_g1_powers(&mut reader, g1_len, power)?;

    let g2_len = expect_section(&mut reader, 3)?;
    let vk_g2 = load_vk_g2(&mut reader, g2_len, power)?;

    info!(
        power,
        g1_points = g1_powers.len(),
        "converted transcript to SRS"
    );

    Ok(Srs {
        vk_g1: g1_powers[0],
        g1_powers,
        vk_g2,
    })
}

/// Read one section framing record and require its id to be `expected`.
/// Returns the declared payload length.
fn expect_section<R: Read>(reader: &mut R, expected: u32) -> Result<u64, PtauError> {
    let id = read_u32_le(reader)?;
    if id != expected {
        return Err(PtauError::UnexpectedSectionOrder { got: id, expected });
    }
    Ok(read_u64_le(reader)?)
}

/// Parse the header section and return the declared `power`.
///
/// The 32-byte prime and the ceremony power are read and discarded without
/// cross-validation against BN254 — the ceremony tool writes them for
/// self-description only, and rejecting on them would change acceptance
/// behavior for files this converter otherwise handles.
fn parse_header<R: Read>(reader: &mut R, length: u64) -> Result<u32, PtauError> {
    let field_width = read_u32_le(reader)?;
    if field_width != PTAU_FIELD_WIDTH {
        return Err(PtauError::UnexpectedFieldWidth {
            got: field_width,
            expected: PTAU_FIELD_WIDTH,
        });
    }

    // field width (4) + prime (32) + power (4) + ceremony power (4)
    let expected = u64::from(field_width) + 12;
    if length != expected {
        return Err(PtauError::SectionLengthMismatch {
            section: 1,
            got: length,
            expected,
        });
    }

    let _prime = read_fq(reader)?;
    let power = read_u32_le(reader)?;
    let _ceremony_power = read_u32_le(reader)?;
    Ok(power)
}

/// Load the τ·G1 section: `2·2^power − 1` points, each checked on-curve
/// before it is admitted into the proving basis.
fn load_g1_powers<R: Read>(
    reader: &mut R,
    length: u64,
    power: u32,
) -> Result<Vec<G1Affine>, PtauError> {
    let num_points = (1u64 << power) * 2 - 1;
    let expected = num_points * 2 * u64::from(PTAU_FIELD_WIDTH);
    if length != expected {
        return Err(PtauError::SectionLengthMismatch {
            section: 2,
            got: length,
            expected,
        });
    }

    let mut powers = Vec::with_capacity(num_points as usize);
    for index in 0..num_points {
        let point = read_g1(reader)?;
        if !point.is_on_curve() {
            return Err(PtauError::InvalidCurvePoint {
                group: "G1",
                index,
                x: point.x.to_string(),
                y: point.y.to_string(),
            });
        }
        powers.push(point);
    }
    Ok(powers)
}

/// Load the τ·G2 section, consuming exactly the two points KZG verification
/// needs. The file carries one G2 record per power; the surplus records stay
/// unread, which is harmless because no later section is consumed.
fn load_vk_g2<R: Read>(
    reader: &mut R,
    length: u64,
    power: u32,
) -> Result<[G2Affine; VK_G2_POINTS], PtauError> {
    let expected = (1u64 << power) * 2 * u64::from(PTAU_FIELD_WIDTH);
    if length != expected {
        return Err(PtauError::SectionLengthMismatch {
            section: 3,
            got: length,
            expected,
        });
    }

    let mut vk_g2 = [G2Affine::identity(); VK_G2_POINTS];
    for (index, slot) in vk_g2.iter_mut().enumerate() {
        let point = read_g2(reader)?;
        if !point.is_on_curve() {
            return Err(PtauError::InvalidCurvePoint {
                group: "G2",
                index: index as u64,
                x: point.x.to_string(),
                y: point.y.to_string(),
            });
        }
        *slot = point;
    }
    Ok(vk_g2)
}
