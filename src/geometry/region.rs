use crate::geometry::{cap::Cap, cell::Cell, point::Point, rect::LatLngRect};

/// 球面上の領域として振る舞う型が備えるべき性質を定義するトレイト。
///
/// `dyn Region` として扱えるように、複製は [`Region::clone_region`] で行う。
pub trait Region {
    //領域を囲む図形
    fn cap_bound(&self) -> Cap;
    fn rect_bound(&self) -> LatLngRect;

    //セルとの包含・交差の判定。may_intersect_cell は偽陽性を許す
    fn contains_cell(&self, cell: &Cell) -> bool;
    fn may_intersect_cell(&self, cell: &Cell) -> bool;

    fn contains_point(&self, p: &Point) -> bool;

    fn clone_region(&self) -> Box<dyn Region>;
}

impl Region for Cell {
    fn cap_bound(&self) -> Cap {
        Cell::cap_bound(self)
    }

    fn rect_bound(&self) -> LatLngRect {
        Cell::rect_bound(self)
    }

    fn contains_cell(&self, cell: &Cell) -> bool {
        Cell::contains_cell(self, cell)
    }

    fn may_intersect_cell(&self, cell: &Cell) -> bool {
        self.intersects_cell(cell)
    }

    fn contains_point(&self, p: &Point) -> bool {
        Cell::contains_point(self, p)
    }

    fn clone_region(&self) -> Box<dyn Region> {
        Box::new(*self)
    }
}
