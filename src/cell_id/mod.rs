use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(any(test))]
use proptest::prelude::*;
#[cfg(any(test, feature = "random"))]
use rand::Rng;
#[cfg(any(test, feature = "random"))]
use std::ops::RangeInclusive;

use crate::{
    error::Error,
    geometry::{
        point::Point,
        projection::{face_uv_to_xyz, st_to_ij, st_to_uv, uv_to_st, xyz_to_face_uv},
    },
};

pub mod constants;
mod hilbert;
mod neighbors;
mod relation;

use constants::{MAX_LEVEL, MAX_SIZE, NUM_FACES, POS_BITS};
pub use relation::CellRelation;

/// 位置ビット（面番号を除いた下位61ビット）を取り出すマスク
const POS_MASK: u64 = (1 << POS_BITS) - 1;

/// CellIdは球面を階層的に分割したセルを表す 64 ビットの識別子。
///
/// 立方体の6つの面を球面に投影し、各面を四分木で再帰的に分割する。
/// 内部的には下記のようなビット列で構成されている。
///
/// ```text
/// | face (3 bit) | 子の位置 (2 bit × level) | 1 | 0 ... 0 |
/// ```
///
/// 末尾の `1` の位置がレベルを表し、それより下位のビットはすべて 0 になる。
/// 子の位置はヒルベルト曲線の順序で割り当てられるため、数値としての大小関係が
/// そのまま空間的な順序となる。あるセルの子孫は `[range_min, range_max]` の
/// 連続した範囲に必ず収まる。
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(u64);

impl fmt::Display for CellId {
    /// `CellId` を `"{face}/{子の位置の列}"` の形式で表示する。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let id = CellId::from_face(3).unwrap().child(2).child(0);
    /// assert_eq!(id.to_string(), "3/20");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Invalid: {:016x}", self.0);
        }
        write!(f, "{}/", self.face())?;
        for level in 1..=self.level() {
            write!(f, "{}", self.child_position(level))?;
        }
        Ok(())
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({})", self)
    }
}

impl From<u64> for CellId {
    fn from(id: u64) -> Self {
        CellId(id)
    }
}

impl From<CellId> for u64 {
    fn from(id: CellId) -> Self {
        id.0
    }
}

impl CellId {
    /// 64 ビットの値からそのまま [`CellId`] を構築する。妥当性は [`CellId::is_valid`] で確認できる。
    pub const fn new(id: u64) -> CellId {
        CellId(id)
    }

    /// どのセルも表さない無効な ID。
    pub const fn none() -> CellId {
        CellId(0)
    }

    /// すべての有効なセルより大きい無効な ID。番兵として使う。
    pub const fn sentinel() -> CellId {
        CellId(u64::MAX)
    }

    /// 指定された面全体を表すレベル0のセルを返します。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// # use sphere_cells::Error;
    /// let id = CellId::from_face(2).unwrap();
    /// assert_eq!(id.face(), 2);
    /// assert_eq!(id.level(), 0);
    /// assert_eq!(CellId::from_face(6), Err(Error::FaceOutOfRange { face: 6 }));
    /// ```
    pub fn from_face(face: u8) -> Result<CellId, Error> {
        if face >= NUM_FACES {
            return Err(Error::FaceOutOfRange { face });
        }
        Ok(CellId(((face as u64) << POS_BITS) + Self::lsb_for_level(0)))
    }

    /// 面番号、ヒルベルト曲線上の位置 `pos`、レベルから [`CellId`] を構築します。
    ///
    /// `pos` は葉セル単位の位置で、上位ビットは無視されます。
    /// 指定したレベルより細かい部分の位置情報は切り捨てられます。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let id = CellId::from_face_pos_level(1, 0, 5).unwrap();
    /// assert_eq!(id.level(), 5);
    /// assert_eq!(id.range_min(), CellId::from_face(1).unwrap().range_min());
    /// ```
    pub fn from_face_pos_level(face: u8, pos: u64, level: u8) -> Result<CellId, Error> {
        if face >= NUM_FACES {
            return Err(Error::FaceOutOfRange { face });
        }
        if level > MAX_LEVEL {
            return Err(Error::LevelOutOfRange { level });
        }
        Ok(Self::from_face_pos_level_unchecked(face, pos, level))
    }

    fn from_face_pos_level_unchecked(face: u8, pos: u64, level: u8) -> CellId {
        CellId(((face as u64) << POS_BITS) | ((pos & POS_MASK) | 1)).parent_at(level)
    }

    /// 点を含む葉セルを返します。点は正規化されている必要はありません。
    ///
    /// ```
    /// # use sphere_cells::{CellId, Point};
    /// let p = Point::new(1.0, 0.2, -0.3);
    /// let leaf = CellId::from_point(&p);
    /// assert!(leaf.is_leaf());
    /// assert_eq!(leaf.face(), 0);
    /// ```
    pub fn from_point(p: &Point) -> CellId {
        let (face, u, v) = xyz_to_face_uv(p);
        Self::from_face_ij(face, st_to_ij(uv_to_st(u)), st_to_ij(uv_to_st(v)))
    }

    /// レベル `level` における最初のセル。
    pub fn begin(level: u8) -> CellId {
        CellId(Self::lsb_for_level(0)).child_begin_at(level)
    }

    /// レベル `level` における最後のセルの次（終端）。
    pub fn end(level: u8) -> CellId {
        CellId(((NUM_FACES as u64 - 1) << POS_BITS) + Self::lsb_for_level(0)).child_end_at(level)
    }

    /// 64 ビットの値を返す。
    pub fn id(&self) -> u64 {
        self.0
    }

    /// このセルが属する面番号（0..6）。
    pub fn face(&self) -> u8 {
        (self.0 >> POS_BITS) as u8
    }

    /// 面内でのヒルベルト曲線上の位置（末尾の目印ビットを含む）。
    pub fn pos(&self) -> u64 {
        self.0 & POS_MASK
    }

    /// 面番号が範囲内で、末尾の目印ビットが正しい位置にあるかを返す。
    pub fn is_valid(&self) -> bool {
        self.face() < NUM_FACES && (self.lsb() & 0x1555_5555_5555_5555) != 0
    }

    /// セルのレベルを返す。0 が面全体、[`MAX_LEVEL`] が葉セル。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let id = CellId::from_face(4).unwrap().child(1).child(3);
    /// assert_eq!(id.level(), 2);
    /// ```
    pub fn level(&self) -> u8 {
        MAX_LEVEL.saturating_sub((self.0.trailing_zeros() / 2) as u8)
    }

    /// 葉セルかどうか。
    pub fn is_leaf(&self) -> bool {
        self.0 & 1 != 0
    }

    /// 面全体（レベル0）のセルかどうか。
    pub fn is_face(&self) -> bool {
        self.0 & (Self::lsb_for_level(0) - 1) == 0
    }

    /// 最下位の立っているビット。
    pub fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    /// レベル `level` のセルが持つ最下位ビット。
    pub fn lsb_for_level(level: u8) -> u64 {
        1 << (2 * (MAX_LEVEL - level) as u32)
    }

    /// レベル `level` のセルの一辺が葉セル何個分かを返す。
    pub fn size_ij(level: u8) -> u32 {
        1 << (MAX_LEVEL - level)
    }

    /// このセルを含む範囲の最初の葉セル。
    pub fn range_min(&self) -> CellId {
        CellId(self.0 - (self.lsb() - 1))
    }

    /// このセルを含む範囲の最後の葉セル。
    pub fn range_max(&self) -> CellId {
        CellId(self.0 + (self.lsb() - 1))
    }

    /// `other` がこのセル自身か、その子孫であるかを返す。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let parent = CellId::from_face(0).unwrap();
    /// let child = parent.child(3);
    /// assert!(parent.contains(&child));
    /// assert!(!child.contains(&parent));
    /// ```
    pub fn contains(&self, other: &CellId) -> bool {
        *other >= self.range_min() && *other <= self.range_max()
    }

    /// 2つのセルが重なりを持つかを返す。
    pub fn intersects(&self, other: &CellId) -> bool {
        other.range_min() <= self.range_max() && other.range_max() >= self.range_min()
    }

    /// 1つ上のレベルの親セル。面セルに対して呼んではならない。
    pub fn parent(&self) -> CellId {
        debug_assert!(!self.is_face(), "face cell has no parent");
        let new_lsb = self.lsb() << 2;
        CellId((self.0 & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// レベル `level` における祖先セル。`level` はこのセルのレベル以下でなければならない。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let face = CellId::from_face(5).unwrap();
    /// let leaf = face.child_begin_at(30);
    /// assert_eq!(leaf.parent_at(0), face);
    /// ```
    pub fn parent_at(&self, level: u8) -> CellId {
        debug_assert!(level <= self.level());
        let new_lsb = Self::lsb_for_level(level);
        CellId((self.0 & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// `position`（0..4）番目の子セル。葉セルに対して呼んではならない。
    pub fn child(&self, position: u8) -> CellId {
        debug_assert!(!self.is_leaf(), "leaf cell has no children");
        debug_assert!(position < 4);
        let new_lsb = self.lsb() >> 2;
        let offset = (2 * position as u64 + 1)
            .wrapping_sub(4)
            .wrapping_mul(new_lsb);
        CellId(self.0.wrapping_add(offset))
    }

    /// 最初の子セル。
    pub fn child_begin(&self) -> CellId {
        let old_lsb = self.lsb();
        CellId(self.0 - old_lsb + (old_lsb >> 2))
    }

    /// レベル `level` における最初の子孫セル。
    pub fn child_begin_at(&self, level: u8) -> CellId {
        debug_assert!(level >= self.level() && level <= MAX_LEVEL);
        CellId(self.0 - self.lsb() + Self::lsb_for_level(level))
    }

    /// 最後の子セルの次（終端）。
    pub fn child_end(&self) -> CellId {
        let old_lsb = self.lsb();
        CellId(self.0 + old_lsb + (old_lsb >> 2))
    }

    /// レベル `level` における最後の子孫セルの次（終端）。
    pub fn child_end_at(&self, level: u8) -> CellId {
        debug_assert!(level >= self.level() && level <= MAX_LEVEL);
        CellId(self.0 + self.lsb() + Self::lsb_for_level(level))
    }

    /// レベル `level` の祖先から見た、このセルの系統の子の位置（0..4）。
    pub fn child_position(&self, level: u8) -> u8 {
        debug_assert!(level >= 1 && level <= self.level());
        ((self.0 >> (2 * (MAX_LEVEL - level) as u32 + 1)) & 3) as u8
    }

    /// 同じレベルでヒルベルト順の次のセル。面の境界をまたいで進む。
    pub fn next(&self) -> CellId {
        CellId(self.0.wrapping_add(self.lsb() << 1))
    }

    /// 同じレベルでヒルベルト順の前のセル。
    pub fn prev(&self) -> CellId {
        CellId(self.0.wrapping_sub(self.lsb() << 1))
    }

    /// `self.range_min()` から始まり、`limit` の手前で終わる最大のセルを返します。
    ///
    /// `self.range_min() >= limit.range_min()` の場合は `limit` を返します。
    /// 連続する葉セルの区間を最小個数のセルで敷き詰める際に使います。
    pub fn maximum_tile(&self, limit: CellId) -> CellId {
        let mut id = *self;
        let start = id.range_min();
        if start >= limit.range_min() {
            return limit;
        }

        if id.range_max() >= limit {
            // 大きすぎるので縮める。start < limit.range_min() なので葉セルまでに必ず止まる
            loop {
                id = id.child(0);
                if id.range_max() < limit {
                    return id;
                }
            }
        }

        // 小さすぎる場合は、開始位置が変わらない範囲で親へ広げる
        while !id.is_face() {
            let parent = id.parent();
            if parent.range_min() != start || parent.range_max() >= limit {
                break;
            }
            id = parent;
        }
        id
    }

    /// セルの中心点を単位ベクトルとして返す。
    pub fn to_point(&self) -> Point {
        let (face, i, j) = self.to_face_ij();
        let size = Self::size_ij(self.level());
        let i = i & !(size - 1);
        let j = j & !(size - 1);
        let half = 0.5 * size as f64;
        let s = (i as f64 + half) / MAX_SIZE as f64;
        let t = (j as f64 + half) / MAX_SIZE as f64;
        face_uv_to_xyz(face, st_to_uv(s), st_to_uv(t)).normalize()
    }

    /// 末尾の 0 を省いた16進表記を返す。無効な ID は `"X"`。
    ///
    /// ```
    /// # use sphere_cells::CellId;
    /// let id = CellId::from_face(3).unwrap();
    /// assert_eq!(id.to_token(), "7");
    /// assert_eq!(CellId::from_token("7").unwrap(), id);
    /// ```
    pub fn to_token(&self) -> String {
        if self.0 == 0 {
            return "X".to_string();
        }
        let num_zero_digits = (self.0.trailing_zeros() / 4) as usize;
        let mut token = format!("{:016x}", self.0);
        token.truncate(16 - num_zero_digits);
        token
    }

    /// [`CellId::to_token`] の逆変換。
    pub fn from_token(token: &str) -> Result<CellId, Error> {
        let invalid = || Error::InvalidToken {
            token: token.to_string(),
        };
        if token == "X" {
            return Ok(CellId::none());
        }
        if token.is_empty()
            || token.len() > 16
            || !token.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(invalid());
        }
        let value = u64::from_str_radix(token, 16).map_err(|_| invalid())?;
        Ok(CellId(value << (4 * (16 - token.len()) as u32)))
    }

    /// ランダムな [`CellId`] を生成します。
    #[cfg(any(test, feature = "random"))]
    pub fn random() -> Self {
        Self::random_within(0..=MAX_LEVEL)
    }

    /// 特定のレベル `level` でランダムな [`CellId`] を生成します。
    #[cfg(any(test, feature = "random"))]
    pub fn random_at(level: u8) -> Self {
        Self::random_within(level..=level)
    }

    /// 指定されたレベル範囲内でランダムな [`CellId`] を生成します。
    #[cfg(any(test, feature = "random"))]
    pub fn random_within(level_range: RangeInclusive<u8>) -> Self {
        let mut rng = rand::rng();
        Self::random_within_using(&mut rng, level_range)
    }

    /// 外部の乱数生成器を使用してランダムな [`CellId`] を生成します。
    #[cfg(any(test, feature = "random"))]
    pub fn random_within_using<R: Rng>(rng: &mut R, level_range: RangeInclusive<u8>) -> Self {
        let start = *level_range.start();
        let end = (*level_range.end()).min(MAX_LEVEL);
        let level = if start > end {
            end
        } else {
            rng.random_range(start..=end)
        };
        let face = rng.random_range(0..NUM_FACES);
        let pos: u64 = rng.random();
        Self::from_face_pos_level_unchecked(face, pos, level)
    }

    #[cfg(any(test))]
    pub fn arb_within(level_range: RangeInclusive<u8>) -> impl Strategy<Value = Self> {
        (level_range, 0..NUM_FACES, any::<u64>()).prop_map(|(level, face, pos)| {
            Self::from_face_pos_level_unchecked(face, pos, level.min(MAX_LEVEL))
        })
    }
}
