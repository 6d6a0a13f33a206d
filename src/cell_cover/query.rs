use crate::{
    cell_cover::{CellCover, set_ops::seek},
    cell_id::{CellId, constants::MAX_LEVEL},
    geometry::{cell::Cell, point::Point},
};

impl CellCover {
    /// セル `id` がカバーに完全に含まれるかを返す。O(log n)
    ///
    /// ```
    /// # use sphere_cells::{CellCover, CellId};
    /// let parent = CellId::from_face(3).unwrap().child(2);
    /// let cover = CellCover::from_cell_ids(&[parent]);
    /// assert!(cover.contains(&parent.child(1)));
    /// assert!(!cover.contains(&parent.parent()));
    /// ```
    pub fn contains(&self, id: &CellId) -> bool {
        let i = seek(&self.cell_ids, 0, *id);
        if i < self.cell_ids.len() && self.cell_ids[i].range_min() <= *id {
            return true;
        }
        i > 0 && self.cell_ids[i - 1].range_max() >= *id
    }

    /// セル `id` とカバーが重なりを持つかを返す。O(log n)
    pub fn intersects(&self, id: &CellId) -> bool {
        let i = seek(&self.cell_ids, 0, *id);
        if i < self.cell_ids.len() && self.cell_ids[i].range_min() <= id.range_max() {
            return true;
        }
        i > 0 && self.cell_ids[i - 1].range_max() >= id.range_min()
    }

    /// `other` のすべてのセルがこのカバーに含まれるかを返す。O(n + m)
    pub fn contains_cover(&self, other: &CellCover) -> bool {
        debug_assert!(self.is_normalized() && other.is_normalized());
        let x = &self.cell_ids;
        let mut i = 0usize;
        for id in other.iter() {
            // id より手前で終わるセルを読み飛ばす
            while i < x.len() && x[i].range_max() < id.range_min() {
                i += 1;
            }
            if i == x.len() || !x[i].contains(&id) {
                return false;
            }
        }
        true
    }

    /// 2つのカバーが重なりを持つかを返す。O(n + m)
    pub fn intersects_cover(&self, other: &CellCover) -> bool {
        debug_assert!(self.is_normalized() && other.is_normalized());
        let x = &self.cell_ids;
        let y = &other.cell_ids;
        let (mut i, mut j) = (0usize, 0usize);
        while i < x.len() && j < y.len() {
            if x[i].range_max() < y[j].range_min() {
                i += 1;
            } else if y[j].range_max() < x[i].range_min() {
                j += 1;
            } else {
                return true;
            }
        }
        false
    }

    /// 点 `p` を含む葉セルがカバーに含まれるかを返す
    pub fn contains_point(&self, p: &Point) -> bool {
        self.contains(&CellId::from_point(p))
    }

    /// カバーが覆う葉セルの個数
    ///
    /// ```
    /// # use sphere_cells::{CellCover, CellId};
    /// let cover = CellCover::from_cell_ids(&[CellId::from_face(0).unwrap().child_begin_at(29)]);
    /// assert_eq!(cover.leaf_cells_covered(), 4);
    /// ```
    pub fn leaf_cells_covered(&self) -> u64 {
        self.iter()
            .map(|id| 1u64 << (2 * (MAX_LEVEL - id.level()) as u32))
            .sum()
    }

    /// 各レベルの平均面積から求めた面積（ステラジアン）
    pub fn average_based_area(&self) -> f64 {
        self.iter().map(|id| Cell::average_area(id.level())).sum()
    }

    /// 各セルの近似面積の合計（ステラジアン）
    pub fn approx_area(&self) -> f64 {
        self.iter().map(|id| Cell::from(id).approx_area()).sum()
    }

    /// 各セルの正確な面積の合計（ステラジアン）
    pub fn exact_area(&self) -> f64 {
        self.iter().map(|id| Cell::from(id).exact_area()).sum()
    }
}
