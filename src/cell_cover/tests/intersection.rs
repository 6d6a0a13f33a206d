#[cfg(test)]
mod tests {
    use crate::{
        CellCover, CellId,
        cell_cover::tests::{
            arb_small_cover, cell, cover_a, cover_b, cover_c, leaf, max_level, to_flat_set,
        },
    };
    use proptest::prelude::ProptestConfig;
    use proptest::proptest;

    #[test]
    fn test_intersection() {
        let cover_a = cover_a();
        let cover_b = cover_b();

        let result = cover_a.intersection(&cover_b);
        let level = max_level(&[&cover_a, &cover_b, &result]);

        let actual = to_flat_set(&result, level);
        let expected = to_flat_set(&cover_a, level) & to_flat_set(&cover_b, level);

        assert_eq!(actual, expected, "intersection should match the flat leaf set");
        assert!(result.is_normalized());
        assert_eq!(result, cover_b.intersection(&cover_a));
    }

    #[test]
    fn test_intersection_three_covers() {
        let cover_a = cover_a();
        let cover_b = cover_b();
        let cover_c = cover_c();

        let result = cover_a.intersection(&cover_b).intersection(&cover_c);
        let level = max_level(&[&cover_a, &cover_b, &cover_c, &result]);

        let actual = to_flat_set(&result, level);
        let expected = to_flat_set(&cover_a, level)
            & to_flat_set(&cover_b, level)
            & to_flat_set(&cover_c, level);

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_intersection_with_empty() {
        let cover_a = cover_a();
        let empty = CellCover::new();
        assert!(cover_a.intersection(&empty).is_empty());
        assert!(empty.intersection(&cover_a).is_empty());
        assert_eq!(cover_a.intersection(&cover_a), cover_a);
    }

    #[test]
    fn test_intersection_of_overlapping_ranges() {
        let a = CellCover::from_range(leaf(100), leaf(199)).unwrap();
        let b = CellCover::from_range(leaf(150), leaf(250)).unwrap();
        let expected = CellCover::from_range(leaf(150), leaf(199)).unwrap();
        assert_eq!(a.intersection(&b), expected);
        assert_eq!(b.intersection(&a), expected);
    }

    #[test]
    fn test_intersection_with_cell() {
        let cover_a = cover_a();

        // カバーのセルに含まれるセルはそのまま返る
        let inner = cell(1, &[0, 1, 2]);
        assert_eq!(cover_a.intersection_with_cell(&inner).cell_ids(), &[inner]);

        // セルに含まれるカバーのセルだけが返る
        let outer = cell(1, &[2]);
        assert_eq!(
            cover_a.intersection_with_cell(&outer).cell_ids(),
            &[cell(1, &[2, 1]), cell(1, &[2, 3, 0])]
        );

        // 重ならないセル
        let disjoint = cell(5, &[0]);
        assert!(cover_a.intersection_with_cell(&disjoint).is_empty());
        assert!(CellCover::new().intersection_with_cell(&outer).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]
        #[test]
        fn random_test_intersection(
            cover_a in arb_small_cover(20),
            cover_b in arb_small_cover(20)
        ) {
            let result = cover_a.intersection(&cover_b);
            let level = max_level(&[&cover_a, &cover_b, &result]);

            let actual = to_flat_set(&result, level);
            let expected = to_flat_set(&cover_a, level) & to_flat_set(&cover_b, level);

            assert_eq!(
                actual, expected,
                "Intersection result consistency check failed.\n\
                 Cover A size: {}, Cover B size: {}, Result size: {}",
                cover_a.num_cells(), cover_b.num_cells(), result.num_cells()
            );
            assert!(result.is_normalized());
        }

        #[test]
        fn random_test_intersection_with_cell(
            cover in arb_small_cover(20),
            id in CellId::arb_within(0..=5)
        ) {
            let single = CellCover::from_cell_ids(&[id]);
            assert_eq!(cover.intersection_with_cell(&id), cover.intersection(&single));
        }
    }
}
