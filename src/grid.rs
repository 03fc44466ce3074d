/// A cell on the board. Coordinates are signed so a head that walked off the
/// edge can still be represented and rejected by the collision check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Pixel rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Square board of `count` x `count` cells, each `cell_px` pixels wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    count: i32,
    cell_px: u32,
}

impl Grid {
    pub fn new(count: u32, cell_px: u32) -> Self {
        Self { count: count as i32, cell_px }
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn area(&self) -> usize {
        (self.count * self.count) as usize
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.count / 2, self.count / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.count).contains(&cell.x) && (0..self.count).contains(&cell.y)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.count).flat_map(move |y| (0..self.count).map(move |x| Cell::new(x, y)))
    }

    /// Screen rectangle for a cell, leaving a one pixel gap on the right and
    /// bottom edge so neighbouring segments stay visually separate.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let side = self.cell_px.saturating_sub(1).max(1);
        Rect {
            x: cell.x.max(0) as u32 * self.cell_px,
            y: cell.y.max(0) as u32 * self.cell_px,
            w: side,
            h: side,
        }
    }
}
