//! Tile assembly from per-layer fragments.
//!
//! Each fragment is already a complete, self-delimited layer message, so
//! a multi-layer tile is simply the fragments laid end to end. Fragments
//! are never decoded or re-encoded here.

/// Concatenate the present, non-empty fragments in slot order.
///
/// Absent (`None`) and zero-length slots are skipped. If nothing is
/// present the result is empty, which is a valid tile with no layers.
pub fn assemble<B: AsRef<[u8]>>(fragments: &[Option<B>]) -> Vec<u8> {
    let total = fragments
        .iter()
        .flatten()
        .map(|f| f.as_ref().len())
        .sum();

    let mut tile = Vec::with_capacity(total);
    for fragment in fragments.iter().flatten() {
        tile.extend_from_slice(fragment.as_ref());
    }
    tile
}

/// Number of slots that contribute bytes to the assembled tile.
pub fn present_layers<B: AsRef<[u8]>>(fragments: &[Option<B>]) -> usize {
    fragments
        .iter()
        .flatten()
        .filter(|f| !f.as_ref().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_second_layer_present() {
        let fragments: [Option<&[u8]>; 3] = [None, Some(&b"LAYER_B"[..]), None];
        assert_eq!(assemble(&fragments), b"LAYER_B");
        assert_eq!(present_layers(&fragments), 1);
    }

    #[test]
    fn all_absent_yields_empty_tile() {
        let fragments: [Option<Vec<u8>>; 2] = [None, None];
        assert!(assemble(&fragments).is_empty());
        assert_eq!(present_layers(&fragments), 0);
    }

    #[test]
    fn fragments_concatenate_in_order_without_separators() {
        let fragments = vec![
            Some(vec![0x1a, 0x02, 0xaa, 0xbb]),
            Some(vec![0x1a, 0x01, 0xcc]),
        ];
        assert_eq!(
            assemble(&fragments),
            vec![0x1a, 0x02, 0xaa, 0xbb, 0x1a, 0x01, 0xcc]
        );
    }

    #[test]
    fn empty_fragments_contribute_nothing() {
        let fragments = vec![Some(Vec::new()), Some(b"EEZ".to_vec())];
        assert_eq!(assemble(&fragments), b"EEZ");
        assert_eq!(present_layers(&fragments), 1);
    }
}
