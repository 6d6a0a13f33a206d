/// 本ライブラリで扱うことができる最大のレベル（葉セルのレベル）
pub const MAX_LEVEL: u8 = 30;

/// 立方体の面の数。レベル0のセルはそれぞれ1つの面に対応する。
pub const NUM_FACES: u8 = 6;

/// 面番号を除いた位置ビットの数（各レベル2ビット + 末尾の1ビット）
pub const POS_BITS: u32 = 2 * MAX_LEVEL as u32 + 1;

/// 1つの面における葉セル単位の一辺の長さ
pub const MAX_SIZE: u32 = 1 << MAX_LEVEL;

/// 方向ビットのうち、i 軸と j 軸の入れ替えを表すビット
pub(crate) const SWAP_MASK: u8 = 0x01;

/// 方向ビットのうち、i 軸と j 軸の反転を表すビット
pub(crate) const INVERT_MASK: u8 = 0x02;

/// `[方向][ij]` からヒルベルト曲線上の位置（0..4）を引く表。
/// ij は `(i_bit << 1) | j_bit`。
pub(crate) const IJ_TO_POS: [[u8; 4]; 4] = [
    [0, 1, 3, 2], // 標準
    [0, 3, 1, 2], // 軸入れ替え
    [2, 3, 1, 0], // 反転
    [2, 1, 3, 0], // 入れ替え + 反転
];

/// [`IJ_TO_POS`] の逆引き表。
pub(crate) const POS_TO_IJ: [[u8; 4]; 4] = [
    [0, 1, 3, 2],
    [0, 2, 3, 1],
    [3, 2, 0, 1],
    [3, 1, 0, 2],
];

/// 子の位置ごとに、孫の階層へ進む際に方向ビットへ XOR する値。
pub(crate) const POS_TO_ORIENTATION: [u8; 4] = [SWAP_MASK, 0, 0, INVERT_MASK | SWAP_MASK];
