//! Dense node-to-node matrix.

use serde::{Deserialize, Serialize};

/// A dense n×n matrix of distances or travel times, stored row-major.
///
/// # Examples
///
/// ```
/// use u_dock_routing::travel::TravelMatrix;
///
/// let m = TravelMatrix::from_rows(&[
///     vec![0.0, 0.5],
///     vec![0.7, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(m.get(0, 1), 0.5);
/// assert_eq!(m.get(1, 0), 0.7);
/// assert_eq!(m.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelMatrix {
    data: Vec<f64>,
    size: usize,
}

impl TravelMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix with `value` off the diagonal and zero on it.
    pub fn uniform(size: usize, value: f64) -> Self {
        let mut m = Self::new(size);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    m.set(i, j, value);
                }
            }
        }
        m
    }

    /// Creates a matrix from an explicit row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from rows.
    ///
    /// Returns `None` if the rows do not form a square.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Returns the entry from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the entry from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of nodes covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the closed tour depot → `path` → depot.
    pub fn path_length(&self, depot: usize, path: &[usize]) -> f64 {
        if path.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        let mut prev = depot;
        for &node in path {
            total += self.get(prev, node);
            prev = node;
        }
        total + self.get(prev, depot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let m = TravelMatrix::uniform(3, 2.0);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(2, 1), 2.0);
    }

    #[test]
    fn test_from_data() {
        let m = TravelMatrix::from_data(2, vec![0.0, 5.0, 6.0, 0.0]).expect("valid");
        assert_eq!(m.get(0, 1), 5.0);
        assert_eq!(m.get(1, 0), 6.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(TravelMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_from_rows_not_square() {
        assert!(TravelMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut m = TravelMatrix::new(3);
        m.set(0, 1, 42.0);
        assert_eq!(m.get(0, 1), 42.0);
        assert_eq!(m.get(1, 0), 0.0);
    }

    #[test]
    fn test_path_length() {
        let m = TravelMatrix::from_rows(&[
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![3.0, 2.0, 0.0],
        ])
        .expect("square");
        // 0 -> 1 -> 2 -> 0 = 1 + 2 + 3
        assert!((m.path_length(0, &[1, 2]) - 6.0).abs() < 1e-10);
        assert_eq!(m.path_length(0, &[]), 0.0);
    }
}
