use crate::grid::{Cell, Grid, Heading};
use std::collections::VecDeque;

pub struct Snake {
    body: VecDeque<Cell>,
    heading: Heading,
    // direction of the most recent advance; a new heading may reverse
    // neither this nor the pending one
    moved: Heading,
    grow: bool,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start);
        Self { body, heading: Heading::Right, moved: Heading::Right, grow: false }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], heading: Heading) -> Self {
        Self { body: cells.iter().copied().collect(), heading, moved: heading, grow: false }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Requests a new heading for the next advance. A reversal is dropped.
    pub fn set_heading(&mut self, heading: Heading) {
        if heading != self.moved.opposite() && heading != self.heading.opposite() {
            self.heading = heading;
        }
    }

    pub fn mark_growth(&mut self) {
        self.grow = true;
    }

    pub fn advance(&mut self) {
        let new_head = self.head().step(self.heading);
        self.body.push_front(new_head);
        if !self.grow {
            self.body.pop_back();
        }
        self.grow = false;
        self.moved = self.heading;
    }

    /// Game-over predicate: head outside the board or on another segment.
    pub fn collided(&self, grid: &Grid) -> bool {
        let head = self.head();
        !grid.contains(head) || self.body.iter().skip(1).any(|&c| c == head)
    }
}
