use std::f64::consts::PI;

use crate::cell_id::constants::MAX_LEVEL;

/// レベルに応じて指数的に変化するセルの大きさの指標。
///
/// レベル `level` での値は `deriv * 2^(-dim * level)` となる。
/// `dim` は 1 なら長さ、2 なら面積を表す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    dim: u8,
    deriv: f64,
}

/// どのセルも少なくともこの幅を持つ（二次の射影での値）
pub const MIN_WIDTH: Metric = Metric::new(1, 2.0 * std::f64::consts::SQRT_2 / 3.0);

/// 各レベルのセルの平均面積（ステラジアン）
pub const AVG_AREA: Metric = Metric::new(2, 4.0 * PI / 6.0);

impl Metric {
    pub const fn new(dim: u8, deriv: f64) -> Metric {
        Metric { dim, deriv }
    }

    /// レベル `level` での値
    pub fn value(&self, level: u8) -> f64 {
        self.deriv * 2f64.powi(-(self.dim as i32) * level as i32)
    }

    /// 値が `value` 以上となる最大のレベル。そのようなレベルが無い場合は 0。
    /// `value` が正でない場合（NaN を含む）は [`MAX_LEVEL`]。
    ///
    /// ```
    /// # use sphere_cells::MIN_WIDTH;
    /// let level = MIN_WIDTH.max_level(MIN_WIDTH.value(7));
    /// assert_eq!(level, 7);
    /// assert!(MIN_WIDTH.value(MIN_WIDTH.max_level(1e-3)) >= 1e-3);
    /// ```
    pub fn max_level(&self, value: f64) -> u8 {
        if value.is_nan() || value <= 0.0 {
            return MAX_LEVEL;
        }
        // floor(log2(deriv / value)) を次元で割る
        let exponent = (self.deriv / value).log2().floor() as i32;
        let level = exponent.div_euclid(self.dim as i32);
        level.clamp(0, MAX_LEVEL as i32) as u8
    }
}
