/// 発生し得るすべてのエラーを`enum` 型として定義・集約。
mod error;

/// セルに関する球面幾何の型。
mod geometry;

/// 球面を階層的に分割したセルの識別子 `CellId`。
mod cell_id;

/// `CellId` の集合で領域を表す `CellCover`。
mod cell_cover;

pub use error::Error;

pub use cell_id::{
    CellId, CellRelation,
    constants::{MAX_LEVEL, MAX_SIZE, NUM_FACES},
};

pub use cell_cover::CellCover;

pub use geometry::{
    angle::Angle,
    cap::Cap,
    cell::Cell,
    metric::{AVG_AREA, MIN_WIDTH, Metric},
    point::Point,
    projection,
    rect::LatLngRect,
    region::Region,
};
