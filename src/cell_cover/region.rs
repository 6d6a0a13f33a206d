use std::io;

use tracing::{error, warn};

use crate::{
    cell_cover::CellCover,
    error::Error,
    geometry::{cap::Cap, cell::Cell, point::Point, rect::LatLngRect, region::Region},
};

impl CellCover {
    /// カバーを囲む球冠。
    ///
    /// 各セルの中心を平均面積で重み付けした重心を軸とし、すべてのセルの球冠を含むまで広げる。
    pub fn cap_bound(&self) -> Cap {
        if self.is_empty() {
            return Cap::empty();
        }
        let mut centroid = Point::default();
        for id in self.iter() {
            let area = Cell::average_area(id.level());
            centroid = centroid + id.to_point() * area;
        }
        let axis = if centroid == Point::default() {
            Point::new(1.0, 0.0, 0.0)
        } else {
            centroid.normalize()
        };

        let mut cap = Cap::from_axis_height(axis, 0.0);
        for id in self.iter() {
            cap.add_cap(&Cell::from(id).cap_bound());
        }
        cap
    }

    /// 各セルの緯度経度矩形をすべて含む矩形
    pub fn rect_bound(&self) -> LatLngRect {
        self.iter().fold(LatLngRect::empty(), |bound, id| {
            bound.union(&Cell::from(id).rect_bound())
        })
    }

    /// バイナリ形式での書き出しは未対応。呼び出すと panic する。
    pub fn encode<W: io::Write>(&self, _writer: &mut W) {
        error!(num_cells = self.num_cells(), "CellCover::encode is not supported");
        unimplemented!("CellCover::encode")
    }

    /// バイナリ形式からの読み込みは未対応。常に [`Error::DecodeUnsupported`] を返す。
    pub fn decode<R: io::Read>(&mut self, _reader: &mut R) -> Result<(), Error> {
        warn!("CellCover::decode is not supported");
        Err(Error::DecodeUnsupported)
    }
}

impl Region for CellCover {
    fn cap_bound(&self) -> Cap {
        CellCover::cap_bound(self)
    }

    fn rect_bound(&self) -> LatLngRect {
        CellCover::rect_bound(self)
    }

    fn contains_cell(&self, cell: &Cell) -> bool {
        self.contains(&cell.id())
    }

    fn may_intersect_cell(&self, cell: &Cell) -> bool {
        self.intersects(&cell.id())
    }

    fn contains_point(&self, p: &Point) -> bool {
        CellCover::contains_point(self, p)
    }

    fn clone_region(&self) -> Box<dyn Region> {
        Box::new(self.clone())
    }
}
