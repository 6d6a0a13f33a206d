use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{angle::Angle, point::Point, rect::LatLngRect};

/// 丸め誤差を吸収するために境界を広げる係数
const ROUND_UP: f64 = 1.0 + 2.0 * f64::EPSILON;

/// 球冠（軸と高さで定義される球面上の円板）を表す型。
///
/// 高さ `h` は軸から測った平面までの距離で、`h = 1 - cos(θ)` の関係にある。
/// 高さが負なら空、2 以上なら球面全体を表す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cap {
    axis: Point,
    height: f64,
}

impl Cap {
    /// 軸と高さから作る。`axis` は単位ベクトルでなければならない。
    pub fn from_axis_height(axis: Point, height: f64) -> Cap {
        Cap { axis, height }
    }

    /// 軸と中心角から作る。
    pub fn from_axis_angle(axis: Point, angle: Angle) -> Cap {
        Cap {
            axis,
            height: height_for_angle(angle.radians()),
        }
    }

    pub fn empty() -> Cap {
        Cap {
            axis: Point::new(1.0, 0.0, 0.0),
            height: -1.0,
        }
    }

    pub fn full() -> Cap {
        Cap {
            axis: Point::new(1.0, 0.0, 0.0),
            height: 2.0,
        }
    }

    pub fn axis(&self) -> Point {
        self.axis
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.height < 0.0
    }

    pub fn is_full(&self) -> bool {
        self.height >= 2.0
    }

    /// 球冠の半径を中心角で返す。空の場合は負の値。
    pub fn angle(&self) -> Angle {
        if self.is_empty() {
            return Angle::from_radians(-1.0);
        }
        Angle::from_radians(2.0 * (0.5 * self.height).sqrt().min(1.0).asin())
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        (self.axis - *p).norm2() <= 2.0 * self.height
    }

    /// 点 `p` を含むように高さを広げる。
    pub fn add_point(&mut self, p: &Point) {
        if self.is_empty() {
            self.axis = *p;
            self.height = 0.0;
        } else {
            let dist2 = (self.axis - *p).norm2();
            self.height = self.height.max(ROUND_UP * 0.5 * dist2);
        }
    }

    /// 球冠 `other` を含むように高さを広げる。
    pub fn add_cap(&mut self, other: &Cap) {
        if self.is_empty() {
            *self = *other;
        } else if !other.is_empty() {
            let angle = self.axis.angle(other.axis) + other.angle().radians();
            if angle >= PI {
                self.height = 2.0;
            } else {
                self.height = self.height.max(ROUND_UP * height_for_angle(angle));
            }
        }
    }

    /// 球冠を囲む緯度経度矩形
    pub fn rect_bound(&self) -> LatLngRect {
        if self.is_empty() {
            return LatLngRect::empty();
        }
        let axis_lat = self.axis.latitude();
        let axis_lng = self.axis.longitude();
        let cap_angle = self.angle().radians();

        let mut all_longitudes = false;
        let mut lat = [axis_lat - cap_angle, axis_lat + cap_angle];
        let mut lng = [-PI, PI];

        // 極を含むなら経度方向は全周になる
        if lat[0] <= -FRAC_PI_2 {
            lat[0] = -FRAC_PI_2;
            all_longitudes = true;
        }
        if lat[1] >= FRAC_PI_2 {
            lat[1] = FRAC_PI_2;
            all_longitudes = true;
        }
        if !all_longitudes {
            let sin_a = (self.height * (2.0 - self.height)).sqrt();
            let sin_c = axis_lat.cos();
            if sin_a <= sin_c {
                let angle_a = (sin_a / sin_c).asin();
                lng[0] = remainder(axis_lng - angle_a, 2.0 * PI);
                lng[1] = remainder(axis_lng + angle_a, 2.0 * PI);
            }
        }
        LatLngRect::new(lat, lng)
    }
}

/// 中心角 `radians` の球冠の高さ
fn height_for_angle(radians: f64) -> f64 {
    if radians < 0.0 {
        return -1.0;
    }
    if radians >= PI {
        return 2.0;
    }
    let d = (0.5 * radians).sin();
    2.0 * d * d
}

/// IEEE の remainder。結果は `[-y/2, y/2]` に収まる
fn remainder(x: f64, y: f64) -> f64 {
    x - (x / y).round() * y
}
