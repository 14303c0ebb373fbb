use super::Dot;

/// `n x n` membership table: `true` iff the dot is part of the current pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitLookup {
    size: usize,
    cells: Vec<bool>, // row-major
}

impl HitLookup {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.size && column < self.size && self.cells[row * self.size + column]
    }

    pub fn is_hit(&self, dot: &Dot) -> bool {
        self.get(dot.row, dot.column)
    }

    pub fn mark(&mut self, dot: &Dot) {
        if dot.row < self.size && dot.column < self.size {
            self.cells[dot.row * self.size + dot.column] = true;
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = false);
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DotGrid;

    #[test]
    fn test_mark_and_clear() {
        let grid = DotGrid::new(3).unwrap();
        let mut lookup = HitLookup::new(3);
        let dot = grid.of(2, 1).unwrap();

        assert!(!lookup.is_hit(&dot));
        lookup.mark(&dot);
        assert!(lookup.is_hit(&dot));
        assert!(lookup.get(2, 1));
        assert!(!lookup.get(1, 2));
        assert_eq!(lookup.count(), 1);

        lookup.clear();
        assert_eq!(lookup.count(), 0);
    }

    #[test]
    fn test_outside_is_never_hit() {
        let lookup = HitLookup::new(2);
        assert!(!lookup.get(5, 0));
        assert!(!lookup.get(0, 5));
    }
}
