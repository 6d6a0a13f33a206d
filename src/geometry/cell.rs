use std::f64::consts::FRAC_1_PI;

use crate::{
    cell_id::{CellId, constants::MAX_SIZE},
    geometry::{
        cap::Cap,
        metric::AVG_AREA,
        point::Point,
        projection::{face_uv_to_xyz, face_xyz_to_uv, st_to_uv},
        rect::LatLngRect,
    },
};

/// 境界上の点を取りこぼさないための `(u, v)` の許容誤差
const UV_EPSILON: f64 = 4.0 * f64::EPSILON;

/// [`CellId`] が表すセルの幾何情報。
///
/// 面上の `(u, v)` 座標での範囲を保持し、頂点・中心・面積・外接図形を計算する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    id: CellId,
    face: u8,
    level: u8,
    /// `[[u_lo, u_hi], [v_lo, v_hi]]`
    uv: [[f64; 2]; 2],
}

impl From<CellId> for Cell {
    fn from(id: CellId) -> Self {
        let level = id.level();
        let (face, i, j) = id.to_face_ij();
        let size = CellId::size_ij(level);
        let (i, j) = (i & !(size - 1), j & !(size - 1));
        let bound = |lo: u32| {
            let scale = 1.0 / MAX_SIZE as f64;
            [
                st_to_uv(scale * lo as f64),
                st_to_uv(scale * (lo as u64 + size as u64) as f64),
            ]
        };
        Cell {
            id,
            face,
            level,
            uv: [bound(i), bound(j)],
        }
    }
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn face(&self) -> u8 {
        self.face
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_leaf(&self) -> bool {
        self.id.is_leaf()
    }

    /// `(u, v)` 座標での範囲
    pub fn uv_bound(&self) -> [[f64; 2]; 2] {
        self.uv
    }

    /// 反時計回りに数えて `k` 番目（0..4）の頂点。単位ベクトルで返す。
    pub fn vertex(&self, k: usize) -> Point {
        self.vertex_raw(k).normalize()
    }

    fn vertex_raw(&self, k: usize) -> Point {
        let k = k & 3;
        face_uv_to_xyz(self.face, self.uv[0][(k >> 1) ^ (k & 1)], self.uv[1][k >> 1])
    }

    /// セルの中心点
    pub fn center(&self) -> Point {
        self.id.to_point()
    }

    /// レベル `level` のセルの平均面積（ステラジアン）
    pub fn average_area(level: u8) -> f64 {
        AVG_AREA.value(level)
    }

    /// 4頂点を結ぶ平面四角形から見積もった面積。誤差はおおむね数％以内。
    pub fn approx_area(&self) -> f64 {
        // 面全体に近い大きなセルでは平均値の方が正確
        if self.level < 2 {
            return Self::average_area(self.level);
        }
        let flat_area = 0.5
            * (self.vertex(2) - self.vertex(0))
                .cross(self.vertex(3) - self.vertex(1))
                .norm();
        // 球面の曲がりを補正する
        flat_area * 2.0 / (1.0 + (1.0 - (FRAC_1_PI * flat_area).min(1.0)).sqrt())
    }

    /// 2つの球面三角形に分けて求めた正確な面積。
    pub fn exact_area(&self) -> f64 {
        let v0 = self.vertex(0);
        let v1 = self.vertex(1);
        let v2 = self.vertex(2);
        let v3 = self.vertex(3);
        triangle_area(v0, v1, v2) + triangle_area(v0, v2, v3)
    }

    /// セルを囲む球冠。軸は `(u, v)` 範囲の中心で、4頂点を含むように広げる。
    pub fn cap_bound(&self) -> Cap {
        let u = 0.5 * (self.uv[0][0] + self.uv[0][1]);
        let v = 0.5 * (self.uv[1][0] + self.uv[1][1]);
        let mut cap = Cap::from_axis_height(face_uv_to_xyz(self.face, u, v).normalize(), 0.0);
        for k in 0..4 {
            cap.add_point(&self.vertex(k));
        }
        cap
    }

    /// セルを囲む緯度経度矩形。球冠の外接矩形から求めるため、やや大きめになる。
    pub fn rect_bound(&self) -> LatLngRect {
        self.cap_bound().rect_bound()
    }

    /// 点 `p` がセルの内部または境界上にあるか
    pub fn contains_point(&self, p: &Point) -> bool {
        let Some((u, v)) = face_xyz_to_uv(self.face, p) else {
            return false;
        };
        u >= self.uv[0][0] - UV_EPSILON
            && u <= self.uv[0][1] + UV_EPSILON
            && v >= self.uv[1][0] - UV_EPSILON
            && v <= self.uv[1][1] + UV_EPSILON
    }

    pub fn contains_cell(&self, other: &Cell) -> bool {
        self.id.contains(&other.id)
    }

    pub fn intersects_cell(&self, other: &Cell) -> bool {
        self.id.intersects(&other.id)
    }
}

/// 単位ベクトル `a`, `b`, `c` を頂点とする球面三角形の面積
fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    let numerator = a.dot(b.cross(c)).abs();
    let denominator = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    2.0 * numerator.atan2(denominator)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn face_cells_tile_the_sphere() {
        let total: f64 = (0..6)
            .map(|face| Cell::from(CellId::from_face(face).unwrap()).exact_area())
            .sum();
        assert!((total - 4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn children_areas_sum_to_parent() {
        let id = CellId::from_face(1).unwrap().child(3).child(0).child(2);
        let parent = Cell::from(id);
        let mut child = id.child_begin();
        let mut sum = 0.0;
        while child != id.child_end() {
            sum += Cell::from(child).exact_area();
            child = child.next();
        }
        assert!((sum - parent.exact_area()).abs() < 1e-12);
    }

    #[test]
    fn approx_area_close_to_exact() {
        let id = CellId::from_point(&Point::from_lat_lng_degrees(35.0, 139.0)).parent_at(10);
        let cell = Cell::from(id);
        let exact = cell.exact_area();
        assert!((cell.approx_area() - exact).abs() / exact < 0.03);
        assert!((cell.approx_area() / Cell::average_area(10)) > 0.3);
    }

    #[test]
    fn bounds_contain_vertices_and_center() {
        let id = CellId::from_point(&Point::from_lat_lng_degrees(-20.0, 70.0)).parent_at(6);
        let cell = Cell::from(id);
        let cap = cell.cap_bound();
        let rect = cell.rect_bound();
        assert!(cell.contains_point(&cell.center()));
        assert!(cap.contains_point(&cell.center()));
        assert!(rect.contains_point(&cell.center()));
        for k in 0..4 {
            let v = cell.vertex(k);
            assert!(cap.contains_point(&v));
            assert!(cell.contains_point(&v));
        }
    }

    #[test]
    fn point_outside_cell() {
        let id = CellId::from_face(0).unwrap().child(0);
        let cell = Cell::from(id);
        let other = Cell::from(CellId::from_face(0).unwrap().child(2));
        assert!(!cell.contains_point(&other.center()));
        // 反対側の面の点
        assert!(!cell.contains_point(&Point::new(-1.0, 0.0, 0.0)));
    }
}
