//! Binary primitive codec.
//!
//! Every wire structure in nsgate is built from three primitives:
//!
//! - `U8`: a single byte
//! - `U32`: a 32-bit unsigned integer, little-endian
//! - `LenPrefixed(x)`: `U32(len(x))` followed by the raw bytes of `x`
//!
//! Readers never trust a length prefix for allocation. Bytes are pulled
//! through `Read::take`, so a forged prefix on a short buffer fails with
//! `UnexpectedEof` instead of reserving gigabytes up front.

use std::io::{self, Read, Write};

use crate::error::{CodecError, Result};

/// Upper bound on capacity reserved from a decoded element count.
pub const MAX_PREALLOC: usize = 1024;

/// Write a single byte.
pub fn write_u8<W: Write + ?Sized>(w: &mut W, value: u8) -> Result<()> {
    w.write_all(&[value])?;
    Ok(())
}

/// Read a single byte.
///
/// An exhausted reader is an error, distinct from a successfully read zero.
pub fn read_u8<R: Read + ?Sized>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Write a little-endian u32.
pub fn write_u32<W: Write + ?Sized>(w: &mut W, value: u32) -> Result<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Read a little-endian u32.
pub fn read_u32<R: Read + ?Sized>(r: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Write a collection length as a u32 count.
pub fn write_len<W: Write + ?Sized>(w: &mut W, len: usize) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
    write_u32(w, len)
}

/// Write a length-prefixed byte string.
pub fn write_var_bytes<W: Write + ?Sized>(w: &mut W, bytes: &[u8]) -> Result<()> {
    write_len(w, bytes.len())?;
    w.write_all(bytes)?;
    Ok(())
}

/// Read a length-prefixed byte string.
pub fn read_var_bytes<R: Read + ?Sized>(r: &mut R) -> Result<Vec<u8>> {
    let len = read_u32(r)? as usize;
    let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
    Read::take(&mut *r, len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, got {}", len, buf.len()),
        )
        .into());
    }
    Ok(buf)
}

/// Write a length-prefixed UTF-8 string.
pub fn write_var_string<W: Write + ?Sized>(w: &mut W, s: &str) -> Result<()> {
    write_var_bytes(w, s.as_bytes())
}

/// Read a length-prefixed UTF-8 string.
pub fn read_var_string<R: Read + ?Sized>(r: &mut R) -> Result<String> {
    let bytes = read_var_bytes(r)?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}

/// Capacity to reserve for `count` decoded elements.
pub fn prealloc(count: u32) -> usize {
    (count as usize).min(MAX_PREALLOC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_is_little_endian() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0x0102_0304).unwrap();
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(read_u32(&mut buf.as_slice()).unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_var_bytes_layout() {
        let mut buf = Vec::new();
        write_var_bytes(&mut buf, b"hr").unwrap();
        assert_eq!(buf, [2, 0, 0, 0, b'h', b'r']);

        let mut empty = Vec::new();
        write_var_bytes(&mut empty, b"").unwrap();
        assert_eq!(empty, [0, 0, 0, 0]);
        assert!(read_var_bytes(&mut empty.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn test_read_u8_distinguishes_zero_from_eof() {
        assert_eq!(read_u8(&mut [0u8].as_slice()).unwrap(), 0);

        let err = read_u8(&mut [0u8; 0].as_slice()).unwrap_err();
        assert!(err.is_unexpected_eof());
    }

    #[test]
    fn test_short_length_prefix_fails() {
        let err = read_var_bytes(&mut [5u8, 0].as_slice()).unwrap_err();
        assert!(err.is_unexpected_eof());
    }

    #[test]
    fn test_forged_length_does_not_allocate() {
        // Claims u32::MAX bytes but carries three.
        let buf = [0xff, 0xff, 0xff, 0xff, 1, 2, 3];
        let err = read_var_bytes(&mut buf.as_slice()).unwrap_err();
        assert!(err.is_unexpected_eof());
    }

    #[test]
    fn test_invalid_utf8_string() {
        let buf = [2u8, 0, 0, 0, 0xc3, 0x28];
        let err = read_var_string(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8));
    }

    #[test]
    fn test_prealloc_is_capped() {
        assert_eq!(prealloc(3), 3);
        assert_eq!(prealloc(u32::MAX), MAX_PREALLOC);
    }
}
