use tracing::debug;

use crate::{
    cell_cover::CellCover,
    cell_id::{CellId, constants::MAX_LEVEL},
    error::Error,
    geometry::{angle::Angle, metric::MIN_WIDTH},
};

impl CellCover {
    /// 各セルにレベル `level` の隣接セルを加えて、カバーを外側へ広げる。
    ///
    /// `level` より細かいセルは、先にレベル `level` の祖先へ置き換えられる。
    ///
    /// ```
    /// # use sphere_cells::{CellCover, CellId};
    /// let id = CellId::from_face(1).unwrap().child(0).child(3);
    /// let mut cover = CellCover::from_cell_ids(&[id]);
    /// cover.expand_by_level(2).unwrap();
    /// assert!(cover.contains(&id));
    /// assert!(cover.num_cells() > 1);
    /// ```
    pub fn expand_by_level(&mut self, level: u8) -> Result<(), Error> {
        if level > MAX_LEVEL {
            return Err(Error::LevelOutOfRange { level });
        }
        self.expand_at(level);
        Ok(())
    }

    /// 少なくとも角度 `min_radius` だけカバーを広げる。
    ///
    /// 広げる際のセルのレベルは、カバー内で最も粗いセルのレベルに `max_level_diff` を
    /// 加えたものより細かくはならない。そのため、細かいセルしか含まないカバーを
    /// 大きな半径で広げても、セル数が爆発的に増えることはない。
    pub fn expand_by_radius(&mut self, min_radius: Angle, max_level_diff: u8) {
        let min_level = self.iter().map(|id| id.level()).min().unwrap_or(MAX_LEVEL);
        let radius_level = MIN_WIDTH.max_level(min_radius.radians());

        // 面のセル1つ分より大きな半径では、まず隣の面まで広げる
        if radius_level == 0 && min_radius.radians() > MIN_WIDTH.value(0) {
            self.expand_at(0);
        }

        let level = min_level
            .saturating_add(max_level_diff)
            .min(radius_level)
            .min(MAX_LEVEL);
        debug!(
            radius = %min_radius,
            min_level,
            radius_level,
            level,
            "expanding cell cover by radius"
        );
        self.expand_at(level);
    }

    /// `level` は `MAX_LEVEL` 以下であること
    fn expand_at(&mut self, level: u8) {
        let level_lsb = CellId::lsb_for_level(level);
        let before = self.num_cells();
        let mut output = Vec::with_capacity(before * 9);

        // 末尾から走査し、祖先に置き換えたセルに含まれる手前のセルは読み飛ばす
        let mut i = self.cell_ids.len();
        while i > 0 {
            i -= 1;
            let mut id = self.cell_ids[i];
            if id.lsb() < level_lsb {
                id = id.parent_at(level);
                while i > 0 && id.contains(&self.cell_ids[i - 1]) {
                    i -= 1;
                }
            }
            output.push(id);
            id.append_all_neighbors(level, &mut output);
        }

        *self = CellCover::from_vec(output);
        debug!(level, before, after = self.num_cells(), "expanded cell cover");
    }
}
