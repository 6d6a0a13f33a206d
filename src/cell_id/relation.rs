use crate::cell_id::CellId;

/// 2つの [`CellId`] が表す範囲の位置関係
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRelation {
    /// 同じセルである
    Equal,
    /// `self` が `other` を含む祖先である
    Ancestor,
    /// `self` が `other` に含まれる子孫である
    Descendant,
    /// 重なりがない
    Disjoint,
}

impl CellId {
    /// `self` と `other` の範囲の関係を返す。
    ///
    /// 2つのセルの範囲は、一致・包含・交差なしのいずれかであり、部分的に重なることはない。
    pub fn relation(&self, other: &CellId) -> CellRelation {
        if self == other {
            CellRelation::Equal
        } else if self.contains(other) {
            CellRelation::Ancestor
        } else if other.contains(self) {
            CellRelation::Descendant
        } else {
            CellRelation::Disjoint
        }
    }
}
