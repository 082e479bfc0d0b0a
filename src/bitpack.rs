//! Bit-level packing and unpacking of coded symbols
//!
//! Codes are concatenated most-significant-bit first and zero-padded
//! to a whole number of bytes; unpacking trims the padding and walks
//! the prefix tree bit by bit.

use std::collections::HashMap;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code::Code;
use crate::error::{CompressError, FormatError};
use crate::tree::HuffNode;

/// Substitute every input byte by its code and pack the concatenated
/// bits into whole bytes. Returns the packed bytes and the number of
/// zero bits appended to fill the final byte (0 for empty input).
pub fn pack(data: &[u8], codes: &HashMap<u8, Code>) -> Result<(Vec<u8>, u8), CompressError> {
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    let mut bit_count: u64 = 0;
    for &byte in data {
        let code = codes.get(&byte).ok_or(CompressError::MissingCode(byte))?;
        for &bit in code {
            writer.write_bit(bit)?;
        }
        bit_count += code.len() as u64;
    }
    let pad_count = ((8 - bit_count % 8) % 8) as u8;
    writer.byte_align()?;
    Ok((writer.into_writer(), pad_count))
}

/// Trim `pad_count` filler bits off the end of `payload` and walk the
/// tree to recover the original symbols.
///
/// A `None` root decodes to empty output regardless of the payload. A
/// padding count larger than the stream, a bare leaf at the root, or a
/// stream that ends inside a walk all surface as [`FormatError`]s.
pub fn unpack(
    payload: &[u8],
    pad_count: u8,
    root: Option<&HuffNode>,
) -> Result<Vec<u8>, FormatError> {
    let total_bits = payload.len() as u64 * 8;
    if u64::from(pad_count) > total_bits {
        return Err(FormatError::PaddingOverrun {
            pad: pad_count,
            bits: total_bits,
        });
    }
    let data_bits = total_bits - u64::from(pad_count);
    if data_bits == 0 {
        return Ok(Vec::new());
    }
    let root = match root {
        Some(root) => root,
        None => return Ok(Vec::new()),
    };
    if root.is_leaf() {
        // nowhere to descend, yet bits remain
        return Err(FormatError::CorruptBitStream);
    }

    let mut reader = BitReader::endian(payload, BigEndian);
    let mut out = Vec::new();
    let mut consumed: u64 = 0;
    while consumed < data_bits {
        let mut node = root;
        loop {
            match node {
                HuffNode::Leaf { symbol } => {
                    out.push(*symbol);
                    break;
                }
                HuffNode::Internal { left, right } => {
                    if consumed == data_bits {
                        return Err(FormatError::CorruptBitStream);
                    }
                    let bit = reader
                        .read_bit()
                        .map_err(|_| FormatError::CorruptBitStream)?;
                    consumed += 1;
                    node = if bit { right } else { left };
                }
            }
        }
    }
    Ok(out)
}
