use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::point::Point;

/// 緯度経度（ラジアン）で定義される矩形。
///
/// 経度方向は円周上の区間として扱い、`lng_lo > lng_hi` の場合は
/// 日付変更線（±π）をまたぐ区間を表す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngRect {
    lat: [f64; 2],
    lng: [f64; 2],
}

impl LatLngRect {
    pub fn new(lat: [f64; 2], lng: [f64; 2]) -> LatLngRect {
        // 経度の -π は π と同一視する（区間が全周でない限り）
        let mut lng = lng;
        if lng[0] == -PI && lng[1] != PI {
            lng[0] = PI;
        }
        if lng[1] == -PI && lng[0] != PI {
            lng[1] = PI;
        }
        LatLngRect { lat, lng }
    }

    pub fn empty() -> LatLngRect {
        LatLngRect {
            lat: [1.0, 0.0],
            lng: [PI, -PI],
        }
    }

    pub fn full() -> LatLngRect {
        LatLngRect {
            lat: [-FRAC_PI_2, FRAC_PI_2],
            lng: [-PI, PI],
        }
    }

    pub fn lat_lo(&self) -> f64 {
        self.lat[0]
    }

    pub fn lat_hi(&self) -> f64 {
        self.lat[1]
    }

    pub fn lng_lo(&self) -> f64 {
        self.lng[0]
    }

    pub fn lng_hi(&self) -> f64 {
        self.lng[1]
    }

    pub fn is_empty(&self) -> bool {
        self.lat[0] > self.lat[1]
    }

    pub fn is_full(&self) -> bool {
        self.lat == [-FRAC_PI_2, FRAC_PI_2] && lng_is_full(self.lng)
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        let lat = p.latitude();
        let mut lng = p.longitude();
        if lng == -PI {
            lng = PI;
        }
        lat >= self.lat[0] && lat <= self.lat[1] && lng_contains(self.lng, lng)
    }

    /// 2つの矩形を両方とも含む最小の矩形
    pub fn union(&self, other: &LatLngRect) -> LatLngRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        LatLngRect {
            lat: [
                self.lat[0].min(other.lat[0]),
                self.lat[1].max(other.lat[1]),
            ],
            lng: lng_union(self.lng, other.lng),
        }
    }
}

fn lng_is_full(x: [f64; 2]) -> bool {
    x[1] - x[0] == 2.0 * PI
}

fn lng_is_empty(x: [f64; 2]) -> bool {
    x[0] == PI && x[1] == -PI
}

fn lng_is_inverted(x: [f64; 2]) -> bool {
    x[0] > x[1]
}

fn lng_contains(x: [f64; 2], p: f64) -> bool {
    if lng_is_inverted(x) {
        (p >= x[0] || p <= x[1]) && !lng_is_empty(x)
    } else {
        p >= x[0] && p <= x[1]
    }
}

fn lng_contains_interval(x: [f64; 2], y: [f64; 2]) -> bool {
    if lng_is_inverted(x) {
        if lng_is_inverted(y) {
            return y[0] >= x[0] && y[1] <= x[1];
        }
        (y[0] >= x[0] || y[1] <= x[1]) && !lng_is_empty(x)
    } else {
        if lng_is_inverted(y) {
            return lng_is_full(x) || lng_is_empty(y);
        }
        y[0] >= x[0] && y[1] <= x[1]
    }
}

/// `a` から反時計回りに `b` まで進む距離（0..2π）
fn positive_distance(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d >= 0.0 { d } else { (b + PI) - (a - PI) }
}

/// 円周上の2区間を含む最小の区間
fn lng_union(x: [f64; 2], y: [f64; 2]) -> [f64; 2] {
    if lng_is_empty(y) {
        return x;
    }
    if lng_contains(x, y[0]) {
        if lng_contains(x, y[1]) {
            // x が y を含むか、和は全周になる
            if lng_contains_interval(x, y) {
                return x;
            }
            return [-PI, PI];
        }
        return [x[0], y[1]];
    }
    if lng_contains(x, y[1]) {
        return [y[0], x[1]];
    }
    // x は y の端点をどちらも含まないので、y が x を含むか互いに素
    if lng_is_empty(x) || lng_contains(y, x[0]) {
        return y;
    }
    // 近い方の端点同士をつなぐ
    let dlo = positive_distance(y[1], x[0]);
    let dhi = positive_distance(x[1], y[0]);
    if dlo < dhi { [y[0], x[1]] } else { [x[0], y[1]] }
}
