//! Code table generation from the prefix tree

use std::collections::HashMap;

use crate::tree::HuffNode;

/// Bit-string code for a single symbol, most significant bit first.
pub type Code = Vec<bool>;

/// Derive the symbol-to-code table by walking the tree depth first,
/// recording `false` (0) for a left branch and `true` (1) for a right
/// branch. The first visit of a symbol wins, so the duplicated leaf of
/// a single-symbol tree yields the left path. An empty tree yields an
/// empty table.
pub fn build_codes(root: Option<&HuffNode>) -> HashMap<u8, Code> {
    let mut codes = HashMap::new();
    if let Some(root) = root {
        walk(root, Vec::new(), &mut codes);
    }
    codes
}

fn walk(node: &HuffNode, prefix: Vec<bool>, codes: &mut HashMap<u8, Code>) {
    match node {
        HuffNode::Leaf { symbol } => {
            // a bare leaf at the root still gets a one-bit code
            let code = if prefix.is_empty() { vec![false] } else { prefix };
            codes.entry(*symbol).or_insert(code);
        }
        HuffNode::Internal { left, right } => {
            let mut path = prefix.clone();
            path.push(false);
            walk(left, path, codes);
            let mut path = prefix;
            path.push(true);
            walk(right, path, codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;
    use crate::tree::build_tree;

    fn codes_for(data: &[u8]) -> HashMap<u8, Code> {
        let freq = FrequencyTable::from_bytes(data);
        let root = build_tree(&freq);
        build_codes(root.as_ref())
    }

    #[test]
    fn test_no_tree_no_codes() {
        assert!(build_codes(None).is_empty());
    }

    #[test]
    fn test_two_symbol_codes() {
        let codes = codes_for(b"aaab");
        assert_eq!(codes[&b'b'], vec![false]);
        assert_eq!(codes[&b'a'], vec![true]);
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let codes = codes_for(b"aaaa");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[&b'a'], vec![false]);
    }

    #[test]
    fn test_root_leaf_defensive_code() {
        let root = HuffNode::Leaf { symbol: b'x' };
        let codes = build_codes(Some(&root));
        assert_eq!(codes[&b'x'], vec![false]);
    }

    #[test]
    fn test_codes_nonempty_and_prefix_free() {
        let codes = codes_for(b"the quick brown fox jumps over the lazy dog");
        assert!(codes.values().all(|c| !c.is_empty()));
        let all: Vec<&Code> = codes.values().collect();
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(
                        !b.starts_with(a),
                        "code {:?} is a prefix of {:?}",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_frequent_symbols_get_short_codes() {
        let data = "aaaaaaaaaabbc".as_bytes();
        let codes = codes_for(data);
        assert!(codes[&b'a'].len() <= codes[&b'c'].len());
    }
}
