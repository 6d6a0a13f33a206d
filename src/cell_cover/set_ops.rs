use crate::{cell_cover::CellCover, cell_id::CellId};

impl CellCover {
    /// 和集合を返す。
    pub fn union(&self, other: &CellCover) -> CellCover {
        let mut cell_ids = Vec::with_capacity(self.num_cells() + other.num_cells());
        cell_ids.extend_from_slice(&self.cell_ids);
        cell_ids.extend_from_slice(&other.cell_ids);
        CellCover::from_vec(cell_ids)
    }

    /// 共通部分を返す。
    ///
    /// 2つの列を先頭から同時に走査し、一方が他方を含む場合は含まれる側のセルを出力する。
    /// 重ならない区間は二分探索で読み飛ばす。
    pub fn intersection(&self, other: &CellCover) -> CellCover {
        debug_assert!(self.is_normalized() && other.is_normalized());
        let x = &self.cell_ids;
        let y = &other.cell_ids;
        let mut out = Vec::new();

        let (mut i, mut j) = (0usize, 0usize);
        while i < x.len() && j < y.len() {
            let imin = x[i].range_min();
            let jmin = y[j].range_min();
            if imin > jmin {
                // x[i] は y[j] に含まれるか、y[j] より後ろにある
                if x[i] <= y[j].range_max() {
                    out.push(x[i]);
                    i += 1;
                } else {
                    j = seek(y, j + 1, imin);
                    if x[i] <= y[j - 1].range_max() {
                        j -= 1;
                    }
                }
            } else if jmin > imin {
                if y[j] <= x[i].range_max() {
                    out.push(y[j]);
                    j += 1;
                } else {
                    i = seek(x, i + 1, jmin);
                    if y[j] <= x[i - 1].range_max() {
                        i -= 1;
                    }
                }
            } else {
                // 開始位置が同じなら小さい方のセルが他方に含まれる
                if x[i] < y[j] {
                    out.push(x[i]);
                    i += 1;
                } else {
                    out.push(y[j]);
                    j += 1;
                }
            }
        }

        // SAFETY: 正規化された入力からは、互いに素で昇順のセルだけが出力される
        let result = unsafe { CellCover::from_vec_unchecked(out) };
        debug_assert!(result.is_normalized());
        result
    }

    /// セル `id` との共通部分を返す。
    ///
    /// 正規化されたカバーでは `id` と重なるセルは `id` を含むか `id` に含まれるかのどちらかなので、
    /// 切り出しは不要となる。
    pub fn intersection_with_cell(&self, id: &CellId) -> CellCover {
        debug_assert!(self.is_normalized());
        if self.contains(id) {
            // SAFETY: セル1つだけの列は正規化されている
            return unsafe { CellCover::from_vec_unchecked(vec![*id]) };
        }
        let start = seek(&self.cell_ids, 0, id.range_min());
        let id_max = id.range_max();
        let out: Vec<CellId> = self.cell_ids[start..]
            .iter()
            .copied()
            .take_while(|c| *c <= id_max)
            .collect();
        // SAFETY: 正規化された列の連続した部分列は正規化されている
        unsafe { CellCover::from_vec_unchecked(out) }
    }

    /// `self` から `other` を取り除いた差集合を返す。
    ///
    /// 各セルについて、`other` と重ならなければそのまま残し、
    /// 含まれていれば捨て、それ以外は4つの子に分割して調べ直す。
    pub fn difference(&self, other: &CellCover) -> CellCover {
        debug_assert!(self.is_normalized() && other.is_normalized());
        let mut out = Vec::new();
        let mut stack: Vec<CellId> = Vec::new();

        for &id in &self.cell_ids {
            stack.push(id);
            while let Some(id) = stack.pop() {
                if !other.intersects(&id) {
                    out.push(id);
                } else if !other.contains(&id) {
                    // 子の位置の順に取り出せるよう、逆順に積む
                    for k in (0..4).rev() {
                        stack.push(id.child(k));
                    }
                }
            }
        }
        CellCover::from_vec(out)
    }
}

/// `from` 以降で `target` 以上となる最初の位置
pub(crate) fn seek(cell_ids: &[CellId], from: usize, target: CellId) -> usize {
    from + cell_ids[from..].partition_point(|c| *c < target)
}
