use crate::error::{PatternLockError, Result};

/// One addressable grid position. Only [`DotGrid`] hands these out, so a dot
/// is always inside the grid it came from.
#[readonly::make]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dot {
    pub row: usize,
    pub column: usize,
}

impl Dot {
    fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn id(&self, grid_size: usize) -> usize {
        self.row * grid_size + self.column
    }
}

impl std::fmt::Display for Dot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(Row = {}, Col = {})", self.row, self.column)
    }
}

impl std::fmt::Debug for Dot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

/// Dense table of the canonical dots for an `n x n` grid. Replaced wholesale
/// when the grid size changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotGrid {
    size: usize,
    dots: Vec<Dot>, // row-major
}

impl DotGrid {
    pub fn new(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(PatternLockError::InvalidGridSize(size));
        }
        let dots = (0..size)
            .flat_map(|row| (0..size).map(move |column| Dot::new(row, column)))
            .collect();
        Ok(Self { size, dots })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.size && column < self.size
    }

    pub fn of(&self, row: usize, column: usize) -> Result<Dot> {
        if !self.contains(row, column) {
            return Err(PatternLockError::OutOfRange {
                row,
                column,
                max: self.size - 1,
            });
        }
        Ok(self.dots[row * self.size + column])
    }

    pub fn of_id(&self, id: usize) -> Result<Dot> {
        if id >= self.dots.len() {
            return Err(PatternLockError::IdOutOfRange {
                id,
                grid_size: self.size,
            });
        }
        Ok(self.dots[id])
    }

    /// True when `dot` could have come from this grid.
    pub fn owns(&self, dot: &Dot) -> bool {
        self.contains(dot.row, dot.column)
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Dot>> {
        self.dots.iter().copied()
    }
}
