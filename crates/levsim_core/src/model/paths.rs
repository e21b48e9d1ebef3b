//! Dense storage for an ensemble of simulated price paths

use crate::error::SimulationError;

/// Prices of `path_count` paths over `steps` time steps, stored row-major
/// so that each path is a contiguous slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    path_count: usize,
    steps: usize,
}

impl PathMatrix {
    /// Allocate a matrix with column 0 set to `initial_price` and every
    /// later column zeroed, ready to be filled by the simulator.
    pub(crate) fn with_initial_price(path_count: usize, steps: usize, initial_price: f64) -> Self {
        let mut data = vec![0.0; path_count * steps];
        for row in data.chunks_exact_mut(steps) {
            row[0] = initial_price;
        }
        Self {
            data,
            path_count,
            steps,
        }
    }

    /// Build a matrix from externally produced rows.
    ///
    /// Every row must have the same length and contain at least two prices.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SimulationError> {
        let path_count = rows.len();
        let steps = rows.first().map_or(0, Vec::len);

        if path_count == 0 {
            return Err(SimulationError::InvalidShape {
                rows: 0,
                columns: 0,
                reason: "at least one path is required",
            });
        }
        if steps < 2 {
            return Err(SimulationError::InvalidShape {
                rows: path_count,
                columns: steps,
                reason: "each path needs at least two prices",
            });
        }
        if let Some(ragged) = rows.iter().find(|row| row.len() != steps) {
            return Err(SimulationError::InvalidShape {
                rows: path_count,
                columns: ragged.len(),
                reason: "all paths must have the same length",
            });
        }

        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            path_count,
            steps,
        })
    }

    #[must_use]
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Number of time steps (columns), including the initial price
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn get(&self, path: usize, step: usize) -> Option<f64> {
        if path < self.path_count && step < self.steps {
            Some(self.data[path * self.steps + step])
        } else {
            None
        }
    }

    #[must_use]
    pub fn path(&self, path: usize) -> Option<&[f64]> {
        if path < self.path_count {
            let start = path * self.steps;
            Some(&self.data[start..start + self.steps])
        } else {
            None
        }
    }

    pub fn paths(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.data.chunks_exact(self.steps)
    }

    /// Prices of every path at `step`, in path order
    pub fn column(&self, step: usize) -> impl Iterator<Item = f64> + '_ {
        let step = step.min(self.steps - 1);
        self.paths().map(move |row| row[step])
    }

    #[must_use]
    pub fn initial_prices(&self) -> Vec<f64> {
        self.column(0).collect()
    }

    #[must_use]
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.column(self.steps - 1).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f64> {
        self.data.chunks_exact_mut(self.steps)
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, f64> {
        use rayon::slice::ParallelSliceMut;
        self.data.par_chunks_exact_mut(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_initial_price() {
        let matrix = PathMatrix::with_initial_price(3, 4, 50.0);
        assert_eq!(matrix.path_count(), 3);
        assert_eq!(matrix.steps(), 4);
        assert_eq!(matrix.initial_prices(), vec![50.0; 3]);
        assert_eq!(matrix.path(1), Some(&[50.0, 0.0, 0.0, 0.0][..]));
    }

    #[test]
    fn test_from_rows_accessors() {
        let matrix =
            PathMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![1.0, 0.5, 0.25]]).unwrap();

        assert_eq!(matrix.get(0, 2), Some(3.0));
        assert_eq!(matrix.get(1, 1), Some(0.5));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.terminal_prices(), vec![3.0, 0.25]);
        assert_eq!(matrix.column(1).collect::<Vec<_>>(), vec![2.0, 0.5]);
        assert_eq!(matrix.paths().len(), 2);
        assert_eq!(matrix.as_slice().len(), 6);
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert!(matches!(
            PathMatrix::from_rows(vec![]),
            Err(SimulationError::InvalidShape { rows: 0, .. })
        ));
        assert!(matches!(
            PathMatrix::from_rows(vec![vec![1.0]]),
            Err(SimulationError::InvalidShape { columns: 1, .. })
        ));
        assert!(matches!(
            PathMatrix::from_rows(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]),
            Err(SimulationError::InvalidShape { columns: 3, .. })
        ));
    }
}
