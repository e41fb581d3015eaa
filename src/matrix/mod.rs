//! Dense two dimensional `f64` matrix backing every layer of the network.
//!
//! The algebra comes in two flavours. Methods taking `&self` are pure and
//! return a fresh matrix; the `*_inplace` / `*_assign` methods accumulate into
//! a buffer the caller owns exclusively. Every binary operation checks shapes
//! before any entry is written.

mod ops;

use ndarray::{Array2, ArrayView2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::{thread_rng, Rng};

use crate::config::ParameterClamp;
use crate::error::{MatrixError, Shape};

pub use ops::Operand;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Zero filled matrix of the given shape.
    ///
    /// Every constructor refuses a zero row or column count with
    /// [`MatrixError::Empty`].
    pub fn new(rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        check_dims(rows, cols)?;
        Ok(Matrix {
            data: Array2::zeros((rows, cols)),
        })
    }

    /// Uniformly random matrix with entries in [-1, 1).
    pub fn random_using<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Matrix, MatrixError> {
        check_dims(rows, cols)?;
        Ok(Matrix {
            data: Array2::random_using((rows, cols), Uniform::new(-1., 1.), rng),
        })
    }

    /// Column vector with one row per value.
    pub fn from_slice(values: &[f64]) -> Result<Matrix, MatrixError> {
        check_dims(values.len(), 1)?;
        Ok(Matrix {
            data: Array2::from_shape_fn((values.len(), 1), |(r, _)| values[r]),
        })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let expected = rows.first().map(|r| r.len()).unwrap_or(0);
        check_dims(rows.len(), expected)?;

        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(MatrixError::RaggedRows {
                    row,
                    len: values.len(),
                    expected,
                });
            }
        }

        let n_rows = rows.len();
        let flat = rows.into_iter().flatten().collect::<Vec<f64>>();
        let data = Array2::from_shape_vec((n_rows, expected), flat)
            .map_err(|_| MatrixError::Empty)?;
        Ok(Matrix { data })
    }

    pub fn from_array(data: Array2<f64>) -> Result<Matrix, MatrixError> {
        check_dims(data.nrows(), data.ncols())?;
        Ok(Matrix { data })
    }

    pub fn randomize(&mut self) -> &mut Self {
        self.randomize_using(&mut thread_rng())
    }

    pub fn randomize_using<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.data = Array2::random_using(self.data.raw_dim(), Uniform::new(-1., 1.), rng);
        self
    }

    /// Flattens a column vector into its values, top to bottom.
    pub fn to_vec(&self) -> Result<Vec<f64>, MatrixError> {
        if self.cols() != 1 {
            return Err(MatrixError::NotColumnVector { shape: self.shape() });
        }
        Ok(self.data.iter().copied().collect())
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> Shape {
        self.data.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<&mut Self, MatrixError> {
        let shape = self.shape();
        match self.data.get_mut((row, col)) {
            Some(v) => *v = value,
            None => return Err(MatrixError::OutOfBounds { row, col, shape }),
        }
        Ok(self)
    }

    /// Entries in row major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn clamp_inplace(&mut self, clamp: ParameterClamp) -> &mut Self {
        let (min, max) = (clamp.min(), clamp.max());
        self.data.mapv_inplace(|v| v.clamp(min, max));
        self
    }
}

fn check_dims(rows: usize, cols: usize) -> Result<(), MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::Empty);
    }
    Ok(())
}
