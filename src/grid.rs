use crate::{Coords, TermInt};

/// The playing field, measured in cells. Coordinates wrap around both edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: TermInt,
    height: TermInt,
}

impl Grid {
    pub const fn new(width: TermInt, height: TermInt) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    #[cfg(test)]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[cfg(test)]
    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.width && pos.1 < self.height
    }

    /// Maps an unbounded position back onto the board. Uses euclidean
    /// remainder so that -1 lands on the last column/row.
    pub fn wrap(&self, x: i32, y: i32) -> Coords {
        (
            x.rem_euclid(self.width as i32) as TermInt,
            y.rem_euclid(self.height as i32) as TermInt,
        )
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}
