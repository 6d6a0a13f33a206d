use std::fmt;

/// 球面上の角度（中心角）を表す型。内部的にはラジアンで保持する。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle(f64);

impl Angle {
    pub fn from_radians(radians: f64) -> Angle {
        Angle(radians)
    }

    pub fn from_degrees(degrees: f64) -> Angle {
        Angle(degrees.to_radians())
    }

    /// 地球を半径 `radius` の球とみなし、地表の距離 `distance` を中心角へ変換する。
    ///
    /// ```
    /// # use sphere_cells::Angle;
    /// let angle = Angle::from_distance(1_000.0, 6_371_000.0);
    /// assert!((angle.radians() - 1.0 / 6_371.0).abs() < 1e-15);
    /// ```
    pub fn from_distance(distance: f64, radius: f64) -> Angle {
        Angle(distance / radius)
    }

    pub fn radians(&self) -> f64 {
        self.0
    }

    pub fn degrees(&self) -> f64 {
        self.0.to_degrees()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
