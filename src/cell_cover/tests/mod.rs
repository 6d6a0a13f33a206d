use proptest::prelude::*;
use roaring::RoaringTreemap;

use crate::{CellCover, CellId};

pub mod intersection;
pub mod range;

///レベルを合わせて葉の集合で比較するためのヘルパー関数
/// 各セルをレベル `level` の子孫に展開し、その ID の集合を返す
pub fn to_flat_set(cover: &CellCover, level: u8) -> RoaringTreemap {
    let mut result = RoaringTreemap::new();
    for id in cover.iter() {
        assert!(id.level() <= level, "{} is finer than level {}", id, level);
        let end = id.child_end_at(level);
        let mut child = id.child_begin_at(level);
        while child != end {
            result.insert(child.id());
            child = child.next();
        }
    }
    result
}

///与えられたカバーのうち最も細かいセルのレベル
pub fn max_level(covers: &[&CellCover]) -> u8 {
    covers
        .iter()
        .flat_map(|cover| cover.iter())
        .map(|id| id.level())
        .max()
        .unwrap_or(0)
}

/// 面0の先頭から数えて `n` 番目の葉セル
pub fn leaf(n: u64) -> CellId {
    let first = CellId::from_face(0).unwrap().range_min();
    CellId::new(first.id() + 2 * n)
}

/// 面 `face` の子の位置をたどったセル
pub fn cell(face: u8, path: &[u8]) -> CellId {
    path.iter()
        .fold(CellId::from_face(face).unwrap(), |id, &k| id.child(k))
}

///CoverAを生成する
pub fn cover_a() -> CellCover {
    CellCover::from_cell_ids(&[
        cell(1, &[0]),
        cell(1, &[2, 1]),
        cell(1, &[2, 3, 0]),
        cell(1, &[3, 3, 3, 3]),
    ])
}

///CoverBを生成する
pub fn cover_b() -> CellCover {
    CellCover::from_cell_ids(&[
        cell(1, &[0, 2]),
        cell(1, &[2]),
        cell(1, &[3, 3]),
        cell(4, &[1, 1]),
    ])
}

///CoverCを生成する
pub fn cover_c() -> CellCover {
    CellCover::from_cell_ids(&[
        cell(1, &[0, 2, 2, 2]),
        cell(1, &[1, 0]),
        cell(1, &[2, 3, 0, 1]),
        cell(4, &[1]),
    ])
}

///テストのために、ランダムなカバーを生成する関数
/// 計算負荷と重なりやすさの観点から、面を2つ、レベルを5までに制限
pub fn arb_small_cover(max_len: usize) -> impl Strategy<Value = CellCover> {
    let cell_strategy = (0u8..2, 0u8..=5, any::<u64>())
        .prop_map(|(face, level, pos)| CellId::from_face_pos_level(face, pos, level).unwrap());
    proptest::collection::vec(cell_strategy, 0..=max_len).prop_map(CellCover::from_vec)
}
