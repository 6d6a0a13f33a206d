//! セルを扱うための球面幾何の型やロジック。
//!
//! 本モジュールでは、角度はすべてラジアン、面積はステラジアン（単位球面上の面積）で扱います。

/// 中心角を表す `Angle` 型。
pub mod angle;

/// 軸と高さで定義される球冠 `Cap` 型。
pub mod cap;

/// `CellId` に対応するセルの幾何情報 `Cell` 型。
pub mod cell;

/// レベルごとのセルの大きさの指標。
pub mod metric;

/// 球面上の点 `Point` 型。
pub mod point;

/// 立方体の面座標と球面上の点の間の射影。
pub mod projection;

/// 緯度経度矩形 `LatLngRect` 型。
pub mod rect;

/// 球面上の領域を表す `Region` トレイト。
pub mod region;
