use crate::{
    CellCover, CellId, Error, MAX_LEVEL,
    cell_cover::tests::{arb_small_cover, cell, leaf, max_level, to_flat_set},
};
use proptest::prelude::*;

#[test]
fn test_from_range_of_face() {
    let face = CellId::from_face(3).unwrap();
    let cover = CellCover::from_range(face.range_min(), face.range_max()).unwrap();
    assert_eq!(cover.cell_ids(), &[face]);
}

#[test]
fn test_from_range_counts_leaves() {
    let cover = CellCover::from_range(leaf(100), leaf(199)).unwrap();
    assert!(cover.is_normalized());
    assert_eq!(cover.leaf_cells_covered(), 100);
    assert!(cover.contains(&leaf(100)));
    assert!(cover.contains(&leaf(199)));
    assert!(!cover.contains(&leaf(99)));
    assert!(!cover.contains(&leaf(200)));
}

#[test]
fn test_from_range_single_leaf() {
    let cover = CellCover::from_range(leaf(7), leaf(7)).unwrap();
    assert_eq!(cover.cell_ids(), &[leaf(7)]);
}

#[test]
fn test_from_begin_end() {
    assert!(
        CellCover::from_begin_end(leaf(5), leaf(5))
            .unwrap()
            .is_empty()
    );

    // 球面全体
    let whole = CellCover::from_begin_end(CellId::begin(MAX_LEVEL), CellId::end(MAX_LEVEL)).unwrap();
    assert_eq!(whole.num_cells(), 6);
    assert!(whole.iter().all(|id| id.is_face()));

    // 面の境界をまたぐ区間
    let last = CellId::from_face(0).unwrap().range_max();
    let first = CellId::from_face(1).unwrap().range_min();
    let cover = CellCover::from_range(last, first).unwrap();
    assert_eq!(cover.cell_ids(), &[last, first]);
}

#[test]
fn test_from_range_errors() {
    let not_leaf = cell(0, &[1]);
    assert_eq!(
        CellCover::from_range(not_leaf, leaf(3)),
        Err(Error::NotLeaf { id: not_leaf.id() })
    );
    assert_eq!(
        CellCover::from_begin_end(leaf(3), not_leaf),
        Err(Error::NotLeaf { id: not_leaf.id() })
    );
    assert_eq!(
        CellCover::from_range(leaf(9), leaf(3)),
        Err(Error::InvertedRange {
            min: leaf(9).id(),
            max: leaf(3).id()
        })
    );
    assert!(matches!(
        CellCover::from_begin_end(leaf(9), leaf(3)),
        Err(Error::InvertedRange { .. })
    ));

    // 面6以降を指す奇数の値は、終端の CellId::end だけを受け付ける
    let sentinel = CellId::sentinel();
    assert_eq!(
        CellCover::from_begin_end(leaf(0), sentinel),
        Err(Error::NotLeaf { id: sentinel.id() })
    );
    assert_eq!(
        CellCover::from_range(leaf(0), sentinel),
        Err(Error::NotLeaf { id: sentinel.id() })
    );
    let past_end = CellId::new(CellId::end(MAX_LEVEL).id() + 2);
    assert_eq!(
        CellCover::from_begin_end(leaf(0), past_end),
        Err(Error::NotLeaf { id: past_end.id() })
    );
}

#[test]
fn test_denormalize_min_level() {
    let face = CellId::from_face(2).unwrap();
    let fine = cell(2, &[3, 1, 2]);
    let cover = CellCover::from_cell_ids(&[face.child(0), fine]);
    let cells = cover.denormalize(2, 1).unwrap();

    // レベル1のセルは4つの子に、レベル3のセルはそのまま
    assert_eq!(cells.len(), 5);
    assert!(cells[..4].iter().all(|id| id.level() == 2));
    assert_eq!(cells[4], fine);
}

#[test]
fn test_denormalize_level_mod() {
    let cover = CellCover::from_cell_ids(&[cell(1, &[0]), cell(1, &[2, 1])]);

    // レベル1からの差が2の倍数: 1→1, 2→3
    let cells = cover.denormalize(1, 2).unwrap();
    assert_eq!(cells.len(), 1 + 4);
    assert_eq!(cells[0], cell(1, &[0]));
    assert!(cells[1..].iter().all(|id| id.level() == 3));

    // レベル0からの差が3の倍数: 1→3, 2→3
    let cells = cover.denormalize(0, 3).unwrap();
    assert_eq!(cells.len(), 16 + 4);
    assert!(cells.iter().all(|id| id.level() == 3));
}

#[test]
fn test_denormalize_caps_at_max_level() {
    let cover = CellCover::from_cell_ids(&[leaf(0).parent()]);
    let cells = cover.denormalize(MAX_LEVEL, 1).unwrap();
    assert_eq!(cells.len(), 4);
    assert!(cells.iter().all(|id| id.is_leaf()));

    // レベル30からの差が2の倍数とはならないが、葉より細かくはしない
    let cover = CellCover::from_cell_ids(&[leaf(0)]);
    assert_eq!(cover.denormalize(29, 2).unwrap(), vec![leaf(0)]);
}

#[test]
fn test_denormalize_errors() {
    let cover = CellCover::from_cell_ids(&[leaf(0)]);
    assert_eq!(
        cover.denormalize(MAX_LEVEL + 1, 1),
        Err(Error::LevelOutOfRange {
            level: MAX_LEVEL + 1
        })
    );
    assert_eq!(
        cover.denormalize(0, 0),
        Err(Error::LevelModOutOfRange { level_mod: 0 })
    );
    assert_eq!(
        cover.denormalize(0, 4),
        Err(Error::LevelModOutOfRange { level_mod: 4 })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn random_range_reconstruction(start in 0u64..1_000_000, len in 0u64..100_000) {
        let (min, max) = (leaf(start), leaf(start + len));
        let cover = CellCover::from_range(min, max).unwrap();
        prop_assert!(cover.is_normalized());
        prop_assert_eq!(cover.leaf_cells_covered(), (max.id() - min.id()) / 2 + 1);
        prop_assert!(cover.contains(&min));
        prop_assert!(cover.contains(&max));
        prop_assert!(!cover.contains(&min.prev()));
        prop_assert!(!cover.contains(&max.next()));
    }

    #[test]
    fn random_denormalize_keeps_area(
        cover in arb_small_cover(10),
        min_level in 0u8..=5,
        level_mod in 1u8..=3
    ) {
        let cells = cover.denormalize(min_level, level_mod).unwrap();
        for id in &cells {
            let level = id.level();
            prop_assert!(level >= min_level);
            prop_assert!((level - min_level) % level_mod == 0);
        }
        // 正規化し直すと元に戻る
        let renormalized = CellCover::from_vec(cells);
        let level = max_level(&[&cover, &renormalized]);
        prop_assert_eq!(to_flat_set(&renormalized, level), to_flat_set(&cover, level));
        prop_assert_eq!(renormalized, cover);
    }
}
