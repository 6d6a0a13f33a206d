use crate::{
    cell_id::{
        CellId,
        constants::{MAX_LEVEL, MAX_SIZE},
    },
    geometry::projection::{face_uv_to_xyz, st_to_ij, xyz_to_face_uv},
};

impl CellId {
    /// 辺で接する同じレベルの4つのセルを、南・東・北・西の順に返します。
    ///
    /// 面の境界では隣の面のセルが返ります。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let id = CellId::from_face(0).unwrap().child(1).child(2);
    /// for neighbor in id.edge_neighbors() {
    ///     assert_eq!(neighbor.level(), id.level());
    ///     assert!(neighbor.edge_neighbors().contains(&id));
    /// }
    /// ```
    pub fn edge_neighbors(&self) -> [CellId; 4] {
        let level = self.level();
        let size = Self::size_ij(level) as i64;
        let (face, i, j) = self.to_face_ij();
        let (i, j) = (i as i64, j as i64);
        let max = MAX_SIZE as i64;

        [
            Self::from_face_ij_same(face, i, j - size, j - size >= 0).parent_at(level),
            Self::from_face_ij_same(face, i + size, j, i + size < max).parent_at(level),
            Self::from_face_ij_same(face, i, j + size, j + size < max).parent_at(level),
            Self::from_face_ij_same(face, i - size, j, i - size >= 0).parent_at(level),
        ]
    }

    /// このセルに辺または頂点で接する、レベル `nbr_level` のすべてのセルを返します。
    ///
    /// `nbr_level` はこのセルのレベル以上でなければなりません。
    /// 面の頂点付近では同じセルが重複して含まれることがあります。
    pub fn all_neighbors(&self, nbr_level: u8) -> Vec<CellId> {
        let mut output = Vec::with_capacity(8);
        self.append_all_neighbors(nbr_level, &mut output);
        output
    }

    pub(crate) fn append_all_neighbors(&self, nbr_level: u8, output: &mut Vec<CellId>) {
        debug_assert!(nbr_level >= self.level() && nbr_level <= MAX_LEVEL);
        let (face, i, j) = self.to_face_ij();

        // nbr_level の方が細かい場合に備えて、セルの左下の葉セルへ揃える
        let size = Self::size_ij(self.level()) as i64;
        let i = i as i64 & -size;
        let j = j as i64 & -size;
        let nbr_size = Self::size_ij(nbr_level) as i64;
        let max = MAX_SIZE as i64;

        // 上下・左右・斜めの隣接セルを1回の走査でまとめて求める
        let mut k = -nbr_size;
        loop {
            let same_face = if k < 0 {
                j + k >= 0
            } else if k >= size {
                j + k < max
            } else {
                // 南北
                output.push(
                    Self::from_face_ij_same(face, i + k, j - nbr_size, j - size >= 0)
                        .parent_at(nbr_level),
                );
                output.push(
                    Self::from_face_ij_same(face, i + k, j + size, j + size < max)
                        .parent_at(nbr_level),
                );
                true
            };
            // 東西と斜め
            output.push(
                Self::from_face_ij_same(face, i - nbr_size, j + k, same_face && i - size >= 0)
                    .parent_at(nbr_level),
            );
            output.push(
                Self::from_face_ij_same(face, i + size, j + k, same_face && i + size < max)
                    .parent_at(nbr_level),
            );
            if k >= size {
                break;
            }
            k += nbr_size;
        }
    }

    fn from_face_ij_same(face: u8, i: i64, j: i64, same_face: bool) -> CellId {
        if same_face {
            Self::from_face_ij(face, i as u32, j as u32)
        } else {
            Self::from_face_ij_wrap(face, i, j)
        }
    }

    /// 面の外側にはみ出した (i, j) を、隣の面の葉セルへ写す。
    fn from_face_ij_wrap(face: u8, i: i64, j: i64) -> CellId {
        let max = MAX_SIZE as i64;
        // 面のすぐ外側の葉セルへ寄せる
        let i = i.clamp(-1, max);
        let j = j.clamp(-1, max);

        // 葉セルの中心の (u, v)。ここでは線形の射影で十分
        let scale = 1.0 / MAX_SIZE as f64;
        let u = scale * (2 * i + 1 - max) as f64;
        let v = scale * (2 * j + 1 - max) as f64;

        let p = face_uv_to_xyz(face, u, v);
        let (face, u, v) = xyz_to_face_uv(&p);
        Self::from_face_ij(face, st_to_ij(0.5 * (u + 1.0)), st_to_ij(0.5 * (v + 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::cell_id::{
        CellId,
        constants::{MAX_LEVEL, MAX_SIZE},
    };

    /// 面の中心の葉セルを含む、レベル `level` のセル。面の境界から離れている
    fn center_cell(face: u8, level: u8) -> CellId {
        CellId::from_face_ij(face, MAX_SIZE / 2, MAX_SIZE / 2).parent_at(level)
    }

    #[test]
    fn face_edge_neighbors() {
        // 面0 (+x) に接するのは面 1, 2, 4, 5。反対側の面3とは接しない
        let face = CellId::from_face(0).unwrap();
        let faces: BTreeSet<u8> = face.edge_neighbors().iter().map(|n| n.face()).collect();
        assert_eq!(faces, BTreeSet::from([1, 2, 4, 5]));
        for n in face.edge_neighbors() {
            assert!(n.is_face());
        }
    }

    #[test]
    fn face_all_neighbors() {
        let face = CellId::from_face(0).unwrap();
        let faces: BTreeSet<u8> = face.all_neighbors(0).iter().map(|n| n.face()).collect();
        assert_eq!(faces, BTreeSet::from([1, 2, 4, 5]));
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let id = center_cell(2, 4);
        let neighbors: BTreeSet<CellId> = id.all_neighbors(id.level()).into_iter().collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&id));
        for n in &neighbors {
            assert_eq!(n.level(), id.level());
            assert!(!n.intersects(&id));
        }
        // 辺で接するセルはすべて含まれる
        for n in id.edge_neighbors() {
            assert!(neighbors.contains(&n));
        }
    }

    #[test]
    fn finer_neighbors_surround_cell() {
        let id = center_cell(3, 2);
        let level = id.level() + 2;
        let neighbors: BTreeSet<CellId> = id.all_neighbors(level).into_iter().collect();
        // 一辺4個の細かいセルで囲むと 4 * 4 + 4 = 20 個
        assert_eq!(neighbors.len(), 20);
        for n in &neighbors {
            assert_eq!(n.level(), level);
            assert!(!id.intersects(n));
        }
    }

    #[test]
    fn leaf_neighbors_across_face_boundary() {
        // 面の辺の中央にある葉セル
        let edge_leaf = CellId::from_face_ij(4, MAX_SIZE / 2, 0);
        assert_eq!(edge_leaf.level(), MAX_LEVEL);
        let neighbors = edge_leaf.edge_neighbors();
        assert!(neighbors.iter().any(|n| n.face() != 4));
        for n in neighbors {
            assert!(n.is_leaf());
            assert!(n.edge_neighbors().contains(&edge_leaf));
        }
    }
}
