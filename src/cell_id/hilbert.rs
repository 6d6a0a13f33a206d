use crate::cell_id::{
    CellId,
    constants::{IJ_TO_POS, MAX_LEVEL, POS_BITS, POS_TO_IJ, POS_TO_ORIENTATION, SWAP_MASK},
};

impl CellId {
    /// 面番号と葉セル単位の座標 `(i, j)` から葉セルを求める。
    ///
    /// 上位のレベルから順に (i, j) の1ビットずつをヒルベルト曲線上の位置へ変換し、
    /// 子の位置に応じて次のレベルの向きを更新していく。
    pub(crate) fn from_face_ij(face: u8, i: u32, j: u32) -> CellId {
        let mut n = (face as u64) << (POS_BITS - 1);
        let mut bits = face & SWAP_MASK;
        for k in (0..MAX_LEVEL as u32).rev() {
            let ij = ((((i >> k) & 1) << 1) | ((j >> k) & 1)) as usize;
            let pos = IJ_TO_POS[bits as usize][ij];
            n |= (pos as u64) << (2 * k);
            bits ^= POS_TO_ORIENTATION[pos as usize];
        }
        CellId(n * 2 + 1)
    }

    /// [`CellId::from_face_ij`] の逆変換。
    ///
    /// 葉でないセルの場合、セル内部のいずれかの葉セルの座標が返るため、
    /// 呼び出し側でセルの大きさに合わせて丸める必要がある。
    pub(crate) fn to_face_ij(&self) -> (u8, u32, u32) {
        let face = self.face();
        let mut bits = face & SWAP_MASK;
        let (mut i, mut j) = (0u32, 0u32);
        for k in (0..MAX_LEVEL as u32).rev() {
            let pos = ((self.0 >> (2 * k + 1)) & 3) as usize;
            let ij = POS_TO_IJ[bits as usize][pos];
            i |= ((ij >> 1) as u32) << k;
            j |= ((ij & 1) as u32) << k;
            bits ^= POS_TO_ORIENTATION[pos];
        }
        (face, i, j)
    }
}
