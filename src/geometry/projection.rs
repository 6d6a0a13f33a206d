//! 立方体の面座標と球面上の点の間の変換。
//!
//! - `(u, v)`: 面上の座標。範囲は `[-1, 1]`。
//! - `(s, t)`: `(u, v)` を二次の射影で歪めた座標。範囲は `[0, 1]`。
//!   セルの面積ができるだけ均一になるように選ばれている。
//! - `(i, j)`: `(s, t)` を葉セル単位に量子化した整数座標。

use crate::{cell_id::constants::MAX_SIZE, geometry::point::Point};

/// `s` または `t` を `u` または `v` へ変換する。
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1.0 / 3.0) * (4.0 * s * s - 1.0)
    } else {
        (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
    }
}

/// [`st_to_uv`] の逆変換。
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        0.5 * (1.0 + 3.0 * u).sqrt()
    } else {
        1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
    }
}

/// `s` を含む葉セルの `i` 座標。範囲外の値は面の端へ丸める。
pub fn st_to_ij(s: f64) -> u32 {
    let ij = (MAX_SIZE as f64 * s).floor();
    ij.clamp(0.0, (MAX_SIZE - 1) as f64) as u32
}

/// 面番号と `(u, v)` から、正規化されていない3次元の点を求める。
pub fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Point {
    match face {
        0 => Point::new(1.0, u, v),
        1 => Point::new(-u, 1.0, v),
        2 => Point::new(-u, -v, 1.0),
        3 => Point::new(-1.0, -v, -u),
        4 => Point::new(v, -1.0, -u),
        _ => Point::new(v, u, -1.0),
    }
}

/// 点 `p` が面 `face` 側にあることを前提に `(u, v)` を求める。
fn valid_face_xyz_to_uv(face: u8, p: &Point) -> (f64, f64) {
    match face {
        0 => (p.y() / p.x(), p.z() / p.x()),
        1 => (-p.x() / p.y(), p.z() / p.y()),
        2 => (-p.x() / p.z(), -p.y() / p.z()),
        3 => (p.z() / p.x(), p.y() / p.x()),
        4 => (p.z() / p.y(), -p.x() / p.y()),
        _ => (-p.y() / p.z(), -p.x() / p.z()),
    }
}

/// 点 `p` を含む面と、その面上の `(u, v)` を求める。
pub fn xyz_to_face_uv(p: &Point) -> (u8, f64, f64) {
    let axis = p.largest_abs_component();
    let face = if p.component(axis) < 0.0 {
        axis as u8 + 3
    } else {
        axis as u8
    };
    let (u, v) = valid_face_xyz_to_uv(face, p);
    (face, u, v)
}

/// 点 `p` を面 `face` 上へ投影した `(u, v)`。点が面の裏側にある場合は `None`。
pub fn face_xyz_to_uv(face: u8, p: &Point) -> Option<(f64, f64)> {
    let axis = (face % 3) as usize;
    let c = p.component(axis);
    let on_face_side = if face < 3 { c > 0.0 } else { c < 0.0 };
    on_face_side.then(|| valid_face_xyz_to_uv(face, p))
}
