//! Preorder serialization of the prefix tree
//!
//! One tag byte per node: an internal tag followed by the left then
//! right subtree, or a leaf tag followed by the symbol byte. A null
//! root serializes to an empty blob.

use crate::error::FormatError;
use crate::tree::HuffNode;

const TAG_INTERNAL: u8 = 0;
const TAG_LEAF: u8 = 1;

/// Deepest node a tree over a 256-symbol alphabet can legitimately
/// reach. Blobs nesting further are hostile and rejected before the
/// recursion can grow with them.
const MAX_DEPTH: usize = 256;

/// Serialize a tree to its preorder blob. `None` yields an empty blob.
pub fn serialize(root: Option<&HuffNode>) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(root) = root {
        write_node(root, &mut out);
    }
    out
}

fn write_node(node: &HuffNode, out: &mut Vec<u8>) {
    match node {
        HuffNode::Leaf { symbol } => {
            out.push(TAG_LEAF);
            out.push(*symbol);
        }
        HuffNode::Internal { left, right } => {
            out.push(TAG_INTERNAL);
            write_node(left, out);
            write_node(right, out);
        }
    }
}

/// Rebuild a tree from its preorder blob. An empty blob yields `None`;
/// anything malformed is a [`FormatError`].
pub fn deserialize(blob: &[u8]) -> Result<Option<HuffNode>, FormatError> {
    if blob.is_empty() {
        return Ok(None);
    }
    let (root, consumed) = read_node(blob, 0, 0)?;
    if consumed != blob.len() {
        return Err(FormatError::TrailingTreeBytes(blob.len() - consumed));
    }
    Ok(Some(root))
}

fn read_node(blob: &[u8], offset: usize, depth: usize) -> Result<(HuffNode, usize), FormatError> {
    if depth >= MAX_DEPTH {
        return Err(FormatError::TreeTooDeep);
    }
    let tag = *blob.get(offset).ok_or(FormatError::TruncatedTree(offset))?;
    match tag {
        TAG_LEAF => {
            let symbol = *blob
                .get(offset + 1)
                .ok_or(FormatError::TruncatedTree(offset + 1))?;
            Ok((HuffNode::Leaf { symbol }, offset + 2))
        }
        TAG_INTERNAL => {
            let (left, after_left) = read_node(blob, offset + 1, depth + 1)?;
            let (right, after_right) = read_node(blob, after_left, depth + 1)?;
            Ok((
                HuffNode::Internal {
                    left: Box::new(left),
                    right: Box::new(right),
                },
                after_right,
            ))
        }
        other => Err(FormatError::InvalidTreeTag { tag: other, offset }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;
    use crate::tree::build_tree;

    #[test]
    fn test_null_root_empty_blob() {
        assert!(serialize(None).is_empty());
        assert_eq!(deserialize(&[]).unwrap(), None);
    }

    #[test]
    fn test_two_symbol_blob_layout() {
        let freq = FrequencyTable::from_bytes(b"aaab");
        let root = build_tree(&freq);
        let blob = serialize(root.as_ref());
        assert_eq!(blob, vec![0, 1, b'b', 1, b'a']);
    }

    #[test]
    fn test_roundtrip() {
        let freq = FrequencyTable::from_bytes(b"the quick brown fox jumps over the lazy dog");
        let root = build_tree(&freq);
        let blob = serialize(root.as_ref());
        let rebuilt = deserialize(&blob).unwrap();
        assert_eq!(rebuilt, root);
    }

    #[test]
    fn test_single_symbol_roundtrip() {
        let freq = FrequencyTable::from_bytes(b"zzzzz");
        let root = build_tree(&freq);
        let blob = serialize(root.as_ref());
        assert_eq!(blob, vec![0, 1, b'z', 1, b'z']);
        assert_eq!(deserialize(&blob).unwrap(), root);
    }

    #[test]
    fn test_truncated_tag() {
        // internal node missing its right subtree
        assert_eq!(
            deserialize(&[0, 1, b'a']),
            Err(FormatError::TruncatedTree(3))
        );
    }

    #[test]
    fn test_truncated_leaf_symbol() {
        assert_eq!(deserialize(&[0, 1]), Err(FormatError::TruncatedTree(2)));
    }

    #[test]
    fn test_invalid_tag() {
        assert_eq!(
            deserialize(&[0, 2, b'a', 1, b'b']),
            Err(FormatError::InvalidTreeTag { tag: 2, offset: 1 })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        assert_eq!(
            deserialize(&[1, b'a', 0xFF]),
            Err(FormatError::TrailingTreeBytes(1))
        );
    }

    #[test]
    fn test_hostile_nesting_rejected() {
        let blob = vec![TAG_INTERNAL; 4096];
        assert_eq!(deserialize(&blob), Err(FormatError::TreeTooDeep));
    }
}
