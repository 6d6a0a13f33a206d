use std::ops::{Add, Mul, Neg, Sub};

/// 球面上の点、または3次元ベクトルを表す型。
///
/// 球面上の点として扱う場合は単位ベクトルであることを想定していますが、
/// [`crate::CellId::from_point`] のように正規化されていない点を受け付ける操作もあります。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
    z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 緯度・経度（度）から球面上の点を作る。
    ///
    /// ```
    /// # use sphere_cells::Point;
    /// let p = Point::from_lat_lng_degrees(90.0, 0.0);
    /// assert!((p.z() - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_lat_lng_degrees(latitude: f64, longitude: f64) -> Self {
        let (lat, lng) = (latitude.to_radians(), longitude.to_radians());
        Self::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Point) -> Point {
        Point {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// ベクトルの長さの二乗を返す
    pub fn norm2(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.norm2().sqrt()
    }

    /// 単位ベクトルに正規化する。零ベクトルはそのまま返す。
    pub fn normalize(self) -> Point {
        let len = self.norm();
        if len == 0.0 { self } else { self * (1.0 / len) }
    }

    /// 2つのベクトルのなす角（ラジアン）
    pub fn angle(self, other: Point) -> f64 {
        self.cross(other).norm().atan2(self.dot(other))
    }

    /// 絶対値が最大の成分の軸（0: x, 1: y, 2: z）
    pub fn largest_abs_component(&self) -> usize {
        let (ax, ay, az) = (self.x.abs(), self.y.abs(), self.z.abs());
        if ax > ay {
            if ax > az { 0 } else { 2 }
        } else if ay > az {
            1
        } else {
            2
        }
    }

    /// 軸番号で成分を取り出す
    pub(crate) fn component(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// 緯度（ラジアン）
    pub fn latitude(&self) -> f64 {
        self.z.atan2((self.x * self.x + self.y * self.y).sqrt())
    }

    /// 経度（ラジアン）
    pub fn longitude(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}
