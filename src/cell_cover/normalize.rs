use tracing::trace;

use crate::cell_cover::{CellCover, are_siblings, is_normalized_slice};

impl CellCover {
    /// セルの列を正規化する。
    ///
    /// 昇順に並べ替えたあと、他のセルに含まれるセルを取り除き、
    /// 4つの兄弟が揃ったセルを親へまとめる。まとめた結果さらに兄弟が揃えば、
    /// 面のセルに達するまで繰り返す。
    ///
    /// セルの個数が減った場合に `true` を返す。
    ///
    /// ```
    /// # use sphere_cells::{CellCover, CellId};
    /// let parent = CellId::from_face(0).unwrap().child(3);
    /// let mut cover = unsafe { CellCover::new_unchecked(&[parent]) };
    /// assert!(!cover.normalize());
    /// ```
    pub fn normalize(&mut self) -> bool {
        let before = self.cell_ids.len();
        if before == 0 {
            return false;
        }
        self.cell_ids.sort_unstable();

        // 入力と同じ領域を出力のスタックとして使う
        let mut out = 0usize;
        for i in 0..self.cell_ids.len() {
            let mut id = self.cell_ids[i];

            // 直前に残したセルに含まれるなら捨てる
            if out > 0 && self.cell_ids[out - 1].contains(&id) {
                continue;
            }

            // 新しいセルに含まれる、すでに残したセルを取り除く
            while out > 0 && id.contains(&self.cell_ids[out - 1]) {
                out -= 1;
            }

            // 兄弟が4つ揃ったら親にまとめる。親でさらに揃う場合も続けて処理する
            while out >= 3
                && are_siblings(
                    self.cell_ids[out - 3],
                    self.cell_ids[out - 2],
                    self.cell_ids[out - 1],
                    id,
                )
            {
                out -= 3;
                id = id.parent();
            }

            self.cell_ids[out] = id;
            out += 1;
        }
        self.cell_ids.truncate(out);
        debug_assert!(is_normalized_slice(&self.cell_ids));

        let shrunk = out < before;
        if shrunk {
            trace!(before, after = out, "normalized cell cover");
        }
        shrunk
    }

    /// 正規化の条件を満たしているかを返す
    pub fn is_normalized(&self) -> bool {
        is_normalized_slice(&self.cell_ids)
    }
}
