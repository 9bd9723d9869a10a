//! Primitive and field-element decoding for the PTAU wire format
//!
//! Everything in the transcript is little-endian. Integers are fixed-width;
//! field elements are the four 64-bit Montgomery-form limbs of a BN254 base
//! field element, limb 0 first, each limb little-endian — i.e. the byte
//! layout the curve library uses internally, written straight to disk by the
//! ceremony tool.
//!
//! A short read is always an error (`io::ErrorKind::UnexpectedEof` from
//! `read_exact`), never a smaller value. Callers in [`crate::ptau`] map these
//! into [`crate::PtauError::TruncatedInput`].
//!
//! [`fq_from_ptau_bytes`] is the single place where wire bytes become a field
//! element, so the conversion can be golden-vector-tested in isolation rather
//! than folded ad hoc into point reading.

#![forbid(unsafe_code)]

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ff::BigInt;
use std::io::{self, Read};

/// Canonical byte width of one BN254 base field element on the wire.
pub const FQ_BYTES: usize = 32;

/// Read exactly `N` bytes into a fixed array.
#[inline]
pub fn read_array<R: Read, const N: usize>(reader: &mut R) -> io::Result<[u8; N]> {
    let mut buffer = [0u8; N];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Read a little-endian `u32`.
#[inline]
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    Ok(u32::from_le_bytes(read_array(reader)?))
}

/// Read a little-endian `u64`.
#[inline]
pub fn read_u64_le<R: Read>(reader: &mut R) -> io::Result<u64> {
    Ok(u64::from_le_bytes(read_array(reader)?))
}

/// Reinterpret 32 wire bytes as a BN254 base field element.
///
/// The buffer is split into four consecutive little-endian 64-bit words,
/// assigned to limbs 0..3 in the order read. No modular reduction is
/// performed: the bytes are taken to be an already-canonical Montgomery
/// residue, exactly as the ceremony tool wrote them. A corrupt encoding is
/// not detected here — it surfaces later when the containing point fails its
/// on-curve check.
///
/// Pure and deterministic: identical input bytes always yield the identical
/// four-limb element.
#[inline]
pub fn fq_from_ptau_bytes(bytes: &[u8; FQ_BYTES]) -> Fq {
    let mut limbs = [0u64; 4];
    for (limb, word) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        *limb = u64::from_le_bytes(word.try_into().expect("chunks_exact yields 8-byte words"));
    }
    Fq::new_unchecked(BigInt::new(limbs))
}

/// Read one base field element (32 wire bytes).
#[inline]
pub fn read_fq<R: Read>(reader: &mut R) -> io::Result<Fq> {
    Ok(fq_from_ptau_bytes(&read_array(reader)?))
}

/// Read one G1 point as two consecutive field elements, X then Y.
///
/// The point is constructed **unchecked**: curve membership is validated by
/// the section loaders, which know the point's index and can report it.
pub fn read_g1<R: Read>(reader: &mut R) -> io::Result<G1Affine> {
    let x = read_fq(reader)?;
    let y = read_fq(reader)?;
    Ok(G1Affine::new_unchecked(x, y))
}

/// Read one G2 point as four consecutive field elements in wire order
/// `X.c0, X.c1, Y.c0, Y.c1`.
///
/// Constructed unchecked, like [`read_g1`].
pub fn read_g2<R: Read>(reader: &mut R) -> io::Result<G2Affine> {
    let x_c0 = read_fq(reader)?;
    let x_c1 = read_fq(reader)?;
    let y_c0 = read_fq(reader)?;
    let y_c1 = read_fq(reader)?;
    Ok(G2Affine::new_unchecked(
        Fq2::new(x_c0, x_c1),
        Fq2::new(y_c0, y_c1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;
    use ark_ff::{BigInteger, PrimeField};
    use std::io::Cursor;

    /// Wire encoding of a field element: Montgomery limbs, little-endian.
    fn fq_to_wire(element: &Fq) -> [u8; FQ_BYTES] {
        element
            .0
            .to_bytes_le()
            .try_into()
            .expect("BN254 Fq is 32 bytes")
    }

    #[test]
    fn u32_and_u64_are_little_endian() {
        let mut cursor = Cursor::new(vec![0x78, 0x56, 0x34, 0x12, 0xff, 0x00, 0x00, 0x00]);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 0x1234_5678);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 0xff);
    }

    #[test]
    fn short_reads_never_return_partial_values() {
        let mut cursor = Cursor::new(vec![1, 2, 3]);
        let err = read_u32_le(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let mut cursor = Cursor::new(vec![0u8; 7]);
        assert!(read_u64_le(&mut cursor).is_err());

        let mut cursor = Cursor::new(vec![0u8; FQ_BYTES - 1]);
        assert!(read_fq(&mut cursor).is_err());
    }

    #[test]
    fn golden_vector_decodes_to_known_limbs() {
        let mut bytes = [0u8; FQ_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let expected = Fq::new_unchecked(BigInt::new([
            0x0706_0504_0302_0100,
            0x0f0e_0d0c_0b0a_0908,
            0x1716_1514_1312_1110,
            0x1f1e_1d1c_1b1a_1918,
        ]));
        assert_eq!(fq_from_ptau_bytes(&bytes), expected);
        // Deterministic: same bytes, same limbs.
        assert_eq!(fq_from_ptau_bytes(&bytes), fq_from_ptau_bytes(&bytes));
    }

    #[test]
    fn wire_roundtrip_matches_internal_representation() {
        for value in [0u64, 1, 2, 0xdead_beef, u64::MAX] {
            let element = Fq::from(value);
            assert_eq!(fq_from_ptau_bytes(&fq_to_wire(&element)), element);
        }
        // The modulus itself is a valid 32-byte buffer even though it is not
        // a canonical residue; decoding must still be loss-free on the limbs.
        let raw: [u8; FQ_BYTES] = Fq::MODULUS.to_bytes_le().try_into().unwrap();
        assert_eq!(fq_from_ptau_bytes(&raw).0, Fq::MODULUS);
    }

    #[test]
    fn g1_generator_roundtrips_through_wire_encoding() {
        let generator = G1Affine::generator();
        let mut wire = Vec::new();
        wire.extend_from_slice(&fq_to_wire(&generator.x));
        wire.extend_from_slice(&fq_to_wire(&generator.y));

        let point = read_g1(&mut Cursor::new(wire)).unwrap();
        assert_eq!(point, generator);
        assert!(point.is_on_curve());
    }

    #[test]
    fn g2_coordinate_order_is_x_c0_c1_then_y_c0_c1() {
        let generator = G2Affine::generator();
        let mut wire = Vec::new();
        for part in [
            generator.x.c0,
            generator.x.c1,
            generator.y.c0,
            generator.y.c1,
        ] {
            wire.extend_from_slice(&fq_to_wire(&part));
        }

        let point = read_g2(&mut Cursor::new(wire)).unwrap();
        assert_eq!(point, generator);
        assert!(point.is_on_curve());
    }
}
