use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of the seating grid. `line` is the row, `col` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    pub line: usize,
    pub col: usize,
}

impl Seat {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    #[inline(always)]
    pub fn contains(&self, seat: Seat) -> bool {
        seat.line < self.height && seat.col < self.width
    }

    /// Row-major index of a seat. Callers must check `contains` first.
    #[inline(always)]
    pub fn idx(&self, seat: Seat) -> usize {
        seat.line * self.width + seat.col
    }

    #[inline(always)]
    pub fn seat_at(&self, idx: usize) -> Seat {
        Seat::new(idx / self.width, idx % self.width)
    }

    /// The seat at a signed offset from `seat`, if it is still on the grid.
    #[inline(always)]
    pub fn neighbor(&self, seat: Seat, d_line: isize, d_col: isize) -> Option<Seat> {
        let line = seat.line.checked_add_signed(d_line)?;
        let col = seat.col.checked_add_signed(d_col)?;
        let n = Seat::new(line, col);
        self.contains(n).then_some(n)
    }

    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.cell_count()).map(move |i| self.seat_at(i))
    }
}

/// A named set of reserved seats. Members bound to a constraint are expected
/// to sit on one of its seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "id", alias = "name")]
    pub name: String,
    pub seats: Vec<Seat>,
}

impl Constraint {
    pub fn new(name: impl Into<String>, seats: Vec<Seat>) -> Self {
        Self {
            name: name.into(),
            seats,
        }
    }

    #[inline(always)]
    pub fn contains(&self, seat: Seat) -> bool {
        self.seats.contains(&seat)
    }
}
