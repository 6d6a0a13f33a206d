use std::fmt::{self, Display};

use crate::cell_id::CellId;

mod expand;
mod normalize;
mod query;
mod range;
mod region;
mod set_ops;

#[cfg(test)]
mod tests;

/// 球面の領域を [`CellId`] の集合で表す型。
///
/// 内部ではセルを昇順に並べた `Vec<CellId>` を保持する。
/// 正規化されたカバーは次の条件をすべて満たす。
///
/// - セルは厳密に昇順に並ぶ
/// - あるセルの範囲が別のセルの範囲に含まれることはない
/// - 同じ親を持つ4つの兄弟セルがすべて揃うことはない（親1つにまとめられる）
///
/// 集合演算や検索はこの条件を前提とする。
///
/// ```
/// # use sphere_cells::{CellCover, CellId};
/// let parent = CellId::from_face(2).unwrap().child(1);
/// let cover = CellCover::from_cell_ids(&[
///     parent.child(0),
///     parent.child(1),
///     parent.child(2),
///     parent.child(3),
/// ]);
/// assert_eq!(cover.cell_ids(), &[parent]);
/// ```
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct CellCover {
    cell_ids: Vec<CellId>,
}

impl CellCover {
    /// 空のカバーを作成する
    pub fn new() -> Self {
        Self::default()
    }

    ///スライスをコピーして正規化したカバーを作成する
    pub fn from_cell_ids(cell_ids: &[CellId]) -> Self {
        Self::from_vec(cell_ids.to_vec())
    }

    ///`u64` の列をコピーして正規化したカバーを作成する
    pub fn from_u64s(ids: &[u64]) -> Self {
        ids.iter().map(|&id| CellId::new(id)).collect()
    }

    /// 所有権を受け取り、正規化したカバーを作成する。メモリの再確保は行わない。
    pub fn from_vec(cell_ids: Vec<CellId>) -> Self {
        let mut cover = Self { cell_ids };
        cover.normalize();
        cover
    }

    /// スライスをコピーして、正規化せずにカバーを作成する。
    ///
    /// # Safety
    /// `cell_ids` は正規化済み（昇順・包含なし・兄弟の4つ組なし）でなければならない。
    /// 満たさない場合、以降の集合演算や検索の結果は不定となる。
    pub unsafe fn new_unchecked(cell_ids: &[CellId]) -> Self {
        // SAFETY: 条件は呼び出し側が保証する
        unsafe { Self::from_vec_unchecked(cell_ids.to_vec()) }
    }

    /// 所有権を受け取り、正規化せずにカバーを作成する。
    ///
    /// # Safety
    /// [`CellCover::new_unchecked`] と同じ条件を満たさなければならない。
    pub unsafe fn from_vec_unchecked(cell_ids: Vec<CellId>) -> Self {
        Self { cell_ids }
    }

    /// 内部の `Vec` を取り出し、自身を空にする。
    pub fn detach(&mut self) -> Vec<CellId> {
        std::mem::take(&mut self.cell_ids)
    }

    pub fn into_cell_ids(self) -> Vec<CellId> {
        self.cell_ids
    }

    ///内部にあるセルの個数を返す
    pub fn num_cells(&self) -> usize {
        self.cell_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_ids.is_empty()
    }

    /// `i` 番目のセル。範囲外なら `None`。
    pub fn cell_id(&self, i: usize) -> Option<CellId> {
        self.cell_ids.get(i).copied()
    }

    pub fn cell_ids(&self) -> &[CellId] {
        &self.cell_ids
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cell_ids.iter().copied()
    }

    /// 余分な確保領域を解放し、容量を最大でも `len + excess` に抑える。
    pub fn pack(&mut self, excess: usize) {
        let len = self.cell_ids.len();
        if self.cell_ids.capacity() - len > excess {
            self.cell_ids.shrink_to(len + excess);
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.cell_ids.capacity()
    }
}

impl FromIterator<CellId> for CellCover {
    fn from_iter<T: IntoIterator<Item = CellId>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl IntoIterator for CellCover {
    type Item = CellId;
    type IntoIter = std::vec::IntoIter<CellId>;

    fn into_iter(self) -> Self::IntoIter {
        self.cell_ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a CellCover {
    type Item = CellId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, CellId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cell_ids.iter().copied()
    }
}

impl Display for CellCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.cell_ids.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for CellCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellCover{}", self)
    }
}

/// 正規化の条件を満たしているかを確認する
pub(crate) fn is_normalized_slice(cell_ids: &[CellId]) -> bool {
    cell_ids.windows(2).all(|w| w[0].range_max() < w[1].range_min())
        && cell_ids
            .windows(4)
            .all(|w| !are_siblings(w[0], w[1], w[2], w[3]))
}

/// 4つのセルが同じ親を持つ兄弟の完全な組か
pub(crate) fn are_siblings(a: CellId, b: CellId, c: CellId, d: CellId) -> bool {
    // 排他的論理和による高速な事前判定。兄弟なら a ^ b ^ c == d となる
    if (a.id() ^ b.id() ^ c.id()) != d.id() {
        return false;
    }
    // 面のセルはこれ以上まとめられない
    if d.is_face() {
        return false;
    }
    // 子の位置のビットを除いて比較する
    let lsb = d.lsb();
    let mut mask = lsb << 1;
    mask = !(mask + (mask << 1));
    let id_masked = d.id() & mask;
    (a.id() & mask) == id_masked
        && (b.id() & mask) == id_masked
        && (c.id() & mask) == id_masked
}
