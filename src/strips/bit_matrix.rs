use super::bit_array::BitArray;

/// Dense M x N grid of bits, stored row-major in a single [`BitArray`].
///
/// Cells are addressed as `row * columns + column` with no per-axis bounds
/// check. A column past `columns()` lands in the next row; an address past
/// the end of storage panics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitMatrix {
    data: BitArray,
    rows: usize,
    columns: usize,
}

impl BitMatrix {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            data: BitArray::new(rows * columns),
            rows,
            columns,
        }
    }

    /// Drops the current contents and reallocates a cleared `rows x columns` grid.
    pub fn set_dims(&mut self, rows: usize, columns: usize) {
        self.rows = rows;
        self.columns = columns;
        self.data = BitArray::new(rows * columns);
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.columns + j
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize) {
        let k = self.offset(i, j);
        self.data.set(k)
    }

    #[inline]
    pub fn unset(&mut self, i: usize, j: usize) {
        let k = self.offset(i, j);
        self.data.unset(k)
    }

    #[inline]
    pub fn isset(&self, i: usize, j: usize) -> bool {
        self.data.isset(self.offset(i, j))
    }

    pub fn clear(&mut self) {
        self.data.reset();
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::BitMatrix;

    fn cells(m: &BitMatrix) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        for i in 0..m.rows() {
            for j in 0..m.columns() {
                if m.isset(i, j) {
                    result.push((i, j));
                }
            }
        }
        result
    }

    #[test]
    fn test_fresh_is_clear() {
        let m = BitMatrix::new(4, 7);
        assert_eq!((m.rows(), m.columns()), (4, 7));
        assert!(cells(&m).is_empty());
    }

    #[test]
    fn test_set_is_isolated() {
        let mut m = BitMatrix::new(3, 3);
        m.set(1, 2);
        assert_eq!(cells(&m), vec![(1, 2)]);
        m.set(2, 0);
        assert_eq!(cells(&m), vec![(1, 2), (2, 0)]);
        m.unset(1, 2);
        assert_eq!(cells(&m), vec![(2, 0)]);
    }

    #[test]
    fn test_row_major() {
        let mut m = BitMatrix::new(2, 3);
        m.set(1, 0);
        assert!(m.data.isset(3));
        // column overflow wraps into the next row
        assert!(m.isset(0, 3));
    }

    #[test]
    fn test_clear_keeps_dims() {
        let mut m = BitMatrix::new(5, 2);
        m.set(0, 0);
        m.set(4, 1);
        m.clear();
        assert_eq!((m.rows(), m.columns()), (5, 2));
        assert!(cells(&m).is_empty());
    }

    #[test]
    fn test_set_dims_discards() {
        let mut m = BitMatrix::default();
        assert_eq!((m.rows(), m.columns()), (0, 0));
        m.set_dims(2, 2);
        m.set(1, 1);
        m.set_dims(3, 3);
        assert_eq!((m.rows(), m.columns()), (3, 3));
        assert!(cells(&m).is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = BitMatrix::new(2, 2);
        original.set(0, 1);
        let mut copy = original.clone();
        copy.set(1, 0);
        copy.unset(0, 1);
        assert_eq!(cells(&original), vec![(0, 1)]);
        assert_eq!(cells(&copy), vec![(1, 0)]);
    }

    #[test]
    #[should_panic]
    fn test_past_storage() {
        let m = BitMatrix::new(2, 2);
        m.isset(2, 0);
    }
}
