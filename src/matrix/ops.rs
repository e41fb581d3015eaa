use super::Matrix;
use crate::error::{MatrixError, Operation};

/// Right hand side of [`Matrix::multiply`] and [`Matrix::multiply_assign`].
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Matrix(&'a Matrix),
    Scalar(f64),
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Operand::Matrix(m)
    }
}

impl From<f64> for Operand<'_> {
    fn from(s: f64) -> Self {
        Operand::Scalar(s)
    }
}

impl Matrix {
    fn same_shape(&self, other: &Matrix, op: Operation) -> Result<(), MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    pub fn map(&self, f: impl FnMut(f64) -> f64) -> Matrix {
        Matrix {
            data: self.data.mapv(f),
        }
    }

    pub fn map_inplace(&mut self, f: impl FnMut(f64) -> f64) -> &mut Self {
        self.data.mapv_inplace(f);
        self
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.same_shape(other, Operation::Add)?;
        Ok(Matrix {
            data: &self.data + &other.data,
        })
    }

    pub fn add_assign(&mut self, other: &Matrix) -> Result<&mut Self, MatrixError> {
        self.same_shape(other, Operation::Add)?;
        self.data += &other.data;
        Ok(self)
    }

    /// True matrix product, `self.cols` must equal `other.rows`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                op: Operation::Dot,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Matrix {
            data: self.data.dot(&other.data),
        })
    }

    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.same_shape(other, Operation::Hadamard)?;
        Ok(Matrix {
            data: &self.data * &other.data,
        })
    }

    pub fn hadamard_assign(&mut self, other: &Matrix) -> Result<&mut Self, MatrixError> {
        self.same_shape(other, Operation::Hadamard)?;
        self.data *= &other.data;
        Ok(self)
    }

    pub fn scale(&self, s: f64) -> Matrix {
        Matrix {
            data: &self.data * s,
        }
    }

    pub fn scale_inplace(&mut self, s: f64) -> &mut Self {
        self.data *= s;
        self
    }

    /// Matrix operand: true product. Scalar operand: elementwise scale.
    pub fn multiply<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix, MatrixError> {
        match rhs.into() {
            Operand::Matrix(m) => self.dot(m),
            Operand::Scalar(s) => Ok(self.scale(s)),
        }
    }

    /// Matrix operand: Hadamard product. Scalar operand: elementwise scale.
    pub fn multiply_assign<'a>(
        &mut self,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<&mut Self, MatrixError> {
        match rhs.into() {
            Operand::Matrix(m) => self.hadamard_assign(m),
            Operand::Scalar(s) => Ok(self.scale_inplace(s)),
        }
    }

    pub fn transpose(&self) -> Matrix {
        Matrix {
            data: self.data.t().to_owned(),
        }
    }
}
