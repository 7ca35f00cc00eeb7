use std::collections::HashMap;

use ratatui::style::Color;

/// Opaque handle to a rectangle placed on a surface. Callers never see the
/// surface's internal representation, only ids it minted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Color,
    pub opacity: f64,
}

/// Retained-mode drawing surface. The graph and selection code talk to this
/// trait only; the TUI paints whatever the surface holds.
pub trait Surface {
    fn canvas_size(&self) -> (f64, f64);
    fn set_canvas_size(&mut self, width: f64, height: f64);
    fn place_rect(&mut self, rect: RectSpec) -> CellId;
    fn place_line(&mut self, line: LineSpec);
    fn rect(&self, cell: CellId) -> Option<RectSpec>;
    fn update_rect(&mut self, cell: CellId, rect: RectSpec) -> bool;
    /// Copies a rectangle on top of everything drawn so far. The copy does
    /// not inherit the source rect's day tag.
    fn clone_cell(&mut self, cell: CellId) -> Option<CellId>;
    fn remove(&mut self, cell: CellId);
    fn tag_day(&mut self, cell: CellId, day_index: usize);
    fn day_index(&self, cell: CellId) -> Option<usize>;
    fn cell_for_day(&self, day_index: usize) -> Option<CellId>;
    fn clear(&mut self);
}

/// The one concrete surface: an ordered shape list. Insertion order is
/// z-order.
pub struct ShapeSurface {
    width: f64,
    height: f64,
    next_id: u64,
    rects: Vec<(CellId, RectSpec)>,
    lines: Vec<LineSpec>,
    day_by_cell: HashMap<CellId, usize>,
    cell_by_day: HashMap<usize, CellId>,
}

impl ShapeSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            next_id: 0,
            rects: Vec::new(),
            lines: Vec::new(),
            day_by_cell: HashMap::new(),
            cell_by_day: HashMap::new(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectSpec> {
        self.rects.iter().map(|(_, rect)| rect)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSpec> {
        self.lines.iter()
    }

    pub fn rect_count(&self) -> usize {
        self.rects.len()
    }

    pub fn day_cell_count(&self) -> usize {
        self.cell_by_day.len()
    }

    fn position(&self, cell: CellId) -> Option<usize> {
        self.rects.iter().position(|(id, _)| *id == cell)
    }
}

impl Surface for ShapeSurface {
    fn canvas_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn place_rect(&mut self, rect: RectSpec) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        self.rects.push((id, rect));
        id
    }

    fn place_line(&mut self, line: LineSpec) {
        self.lines.push(line);
    }

    fn rect(&self, cell: CellId) -> Option<RectSpec> {
        self.position(cell).map(|i| self.rects[i].1)
    }

    fn update_rect(&mut self, cell: CellId, rect: RectSpec) -> bool {
        match self.position(cell) {
            Some(i) => {
                self.rects[i].1 = rect;
                true
            }
            None => false,
        }
    }

    fn clone_cell(&mut self, cell: CellId) -> Option<CellId> {
        let rect = self.rect(cell)?;
        Some(self.place_rect(rect))
    }

    fn remove(&mut self, cell: CellId) {
        if let Some(i) = self.position(cell) {
            self.rects.remove(i);
        }
        if let Some(day) = self.day_by_cell.remove(&cell) {
            self.cell_by_day.remove(&day);
        }
    }

    fn tag_day(&mut self, cell: CellId, day_index: usize) {
        self.day_by_cell.insert(cell, day_index);
        self.cell_by_day.insert(day_index, cell);
    }

    fn day_index(&self, cell: CellId) -> Option<usize> {
        self.day_by_cell.get(&cell).copied()
    }

    fn cell_for_day(&self, day_index: usize) -> Option<CellId> {
        self.cell_by_day.get(&day_index).copied()
    }

    fn clear(&mut self) {
        self.rects.clear();
        self.lines.clear();
        self.day_by_cell.clear();
        self.cell_by_day.clear();
    }
}
