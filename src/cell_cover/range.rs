use crate::{
    cell_cover::CellCover,
    cell_id::{CellId, constants::MAX_LEVEL},
    error::Error,
};

impl CellCover {
    /// 葉セル `min` から `max` まで（両端を含む）を覆う、最小のカバーを作成する。
    ///
    /// ```
    /// # use sphere_cells::{CellCover, CellId};
    /// let face = CellId::from_face(2).unwrap();
    /// let cover = CellCover::from_range(face.range_min(), face.range_max()).unwrap();
    /// assert_eq!(cover.cell_ids(), &[face]);
    /// ```
    pub fn from_range(min: CellId, max: CellId) -> Result<CellCover, Error> {
        check_leaf(min)?;
        check_leaf(max)?;
        if min > max {
            return Err(Error::InvertedRange {
                min: min.id(),
                max: max.id(),
            });
        }
        Self::from_begin_end(min, max.next())
    }

    /// 葉セル `begin` から `end` の手前までを覆う、最小のカバーを作成する。
    ///
    /// `begin == end` なら空のカバーとなる。`end` には [`CellId::end`] のように
    /// 最後の面の次を指す値も指定できる。
    pub fn from_begin_end(begin: CellId, end: CellId) -> Result<CellCover, Error> {
        check_leaf(begin)?;
        check_leaf(end)?;
        if begin > end {
            return Err(Error::InvertedRange {
                min: begin.id(),
                max: end.id(),
            });
        }

        let mut cell_ids = Vec::new();
        let mut id = begin.maximum_tile(end);
        while id != end {
            cell_ids.push(id);
            id = id.next().maximum_tile(end);
        }
        // SAFETY: maximum_tile で敷き詰めた列は昇順で重なりがなく、兄弟の4つ組も生じない
        Ok(unsafe { CellCover::from_vec_unchecked(cell_ids) })
    }

    /// 正規化を解いたセルの列を返す。
    ///
    /// 各セルのレベルが `min_level` 以上、かつ `(level - min_level)` が `level_mod` の倍数
    /// となるように、条件を満たさないセルをその子孫で置き換える。ただし [`MAX_LEVEL`]
    /// を超えて細かくすることはない。
    ///
    /// ```
    /// # use sphere_cells::{CellCover, CellId};
    /// let face = CellId::from_face(0).unwrap();
    /// let cover = CellCover::from_cell_ids(&[face]);
    /// let cells = cover.denormalize(1, 1).unwrap();
    /// assert_eq!(cells.len(), 4);
    /// assert!(cells.iter().all(|id| id.level() == 1));
    /// ```
    pub fn denormalize(&self, min_level: u8, level_mod: u8) -> Result<Vec<CellId>, Error> {
        if min_level > MAX_LEVEL {
            return Err(Error::LevelOutOfRange { level: min_level });
        }
        if !(1..=3).contains(&level_mod) {
            return Err(Error::LevelModOutOfRange { level_mod });
        }

        let mut out = Vec::with_capacity(self.num_cells());
        for id in self.iter() {
            let level = id.level();
            let mut new_level = level.max(min_level);
            if level_mod > 1 {
                // min_level からの差が level_mod の倍数になるよう切り上げる
                new_level += (MAX_LEVEL - (new_level - min_level)) % level_mod;
                new_level = new_level.min(MAX_LEVEL);
            }
            if new_level == level {
                out.push(id);
            } else {
                let end = id.child_end_at(new_level);
                let mut child = id.child_begin_at(new_level);
                while child != end {
                    out.push(child);
                    child = child.next();
                }
            }
        }
        Ok(out)
    }
}

/// 有効な葉セルか、最後の面の次を指す [`CellId::end`] であること
fn check_leaf(id: CellId) -> Result<(), Error> {
    if id.is_leaf() && (id.is_valid() || id == CellId::end(MAX_LEVEL)) {
        Ok(())
    } else {
        Err(Error::NotLeaf { id: id.id() })
    }
}
