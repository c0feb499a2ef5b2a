use std::fmt;

use crate::{
    ast::{BinaryOp, UnaryOp},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    position::Span,
};

/// A two-dimensional matrix of numbers, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    /// The number of rows.
    pub rows: usize,
    /// The number of columns.
    pub cols: usize,
}

impl Matrix {
    /// Builds a matrix from its rows.
    ///
    /// # Returns
    /// - `Some(matrix)`: If every row has the same length and there is at
    ///   least one row.
    /// - `None`: If the rows are ragged or empty.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            rows: row_count,
            cols,
        })
    }

    /// The element at row `i`, column `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Applies `f` to every element.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Combines two same-shaped matrices elementwise.
    fn zip(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Whether both dimensions match `other`'s.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// The matrix product `self · other`.
    ///
    /// Requires `self.cols == other.rows`; the caller checks that first.
    #[must_use]
    fn multiply(&self, other: &Self) -> Self {
        let mut data = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                data[i * other.cols + j] = sum;
            }
        }
        Self {
            data,
            rows: self.rows,
            cols: other.cols,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for i in 0..self.rows {
            write!(f, "  ")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

/// Applies a unary operator to a matrix.
pub(crate) fn unary(m: &Matrix, op: UnaryOp) -> Option<Value> {
    match op {
        UnaryOp::Pos => Some(m.clone().into()),
        UnaryOp::Neg => Some(m.map(|x| -x).into()),
        _ => None,
    }
}

/// Applies a binary operator with a matrix on the left.
///
/// `+` and `-` need both matrices the same shape; `*` is true matrix
/// multiplication, needing the left's columns to match the right's rows.
/// Numbers broadcast over every element.
pub(crate) fn binary(
    m: &Matrix,
    op: BinaryOp,
    rhs: &Value,
    span: Span,
) -> EvalResult<Option<Value>> {
    match (op, rhs) {
        (BinaryOp::Add, Value::Matrix(o)) => {
            check_same_shape(m, o, span)?;
            Ok(Some(m.zip(o, |a, b| a + b).into()))
        }
        (BinaryOp::Sub, Value::Matrix(o)) => {
            check_same_shape(m, o, span)?;
            Ok(Some(m.zip(o, |a, b| a - b).into()))
        }
        (BinaryOp::Mul, Value::Matrix(o)) => {
            if m.cols != o.rows {
                return Err(RuntimeError::ShapeMismatch {
                    details: format!(
                        "cannot multiply a {}x{} matrix by a {}x{} matrix",
                        m.rows, m.cols, o.rows, o.cols
                    ),
                    span,
                });
            }
            Ok(Some(m.multiply(o).into()))
        }
        (BinaryOp::Add, Value::Number(o)) => Ok(Some(m.map(|x| x + o).into())),
        (BinaryOp::Sub, Value::Number(o)) => Ok(Some(m.map(|x| x - o).into())),
        (BinaryOp::Mul, Value::Number(o)) => Ok(Some(m.map(|x| x * o).into())),
        (BinaryOp::Eq, Value::Matrix(o)) => Ok(Some(Value::Boolean(m == o))),
        (BinaryOp::Ne, Value::Matrix(o)) => Ok(Some(Value::Boolean(m != o))),
        _ => Ok(None),
    }
}

fn check_same_shape(m: &Matrix, o: &Matrix, span: Span) -> EvalResult<()> {
    if m.same_shape(o) {
        Ok(())
    } else {
        Err(RuntimeError::ShapeMismatch {
            details: format!(
                "elementwise arithmetic needs equal shapes, found {}x{} and {}x{}",
                m.rows, m.cols, o.rows, o.cols
            ),
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
        assert!(Matrix::from_rows(Vec::new()).is_none());
    }

    #[test]
    fn multiplication_is_the_matrix_product() {
        let a = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = matrix(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        let product = Value::Matrix(a)
            .binary(BinaryOp::Mul, &Value::Matrix(b), Span::EOF)
            .unwrap();
        assert_eq!(
            product,
            Value::Matrix(matrix(&[&[58.0, 64.0], &[139.0, 154.0]]))
        );
    }

    #[test]
    fn incompatible_products_are_shape_mismatches() {
        let a = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = matrix(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0], &[7.0, 8.0]]);
        let error = Value::Matrix(a)
            .binary(BinaryOp::Mul, &Value::Matrix(b), Span::EOF)
            .unwrap_err();
        assert!(matches!(error, RuntimeError::ShapeMismatch { .. }));
    }

    #[test]
    fn addition_needs_the_same_shape() {
        let a = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = matrix(&[&[10.0, 20.0], &[30.0, 40.0]]);
        assert_eq!(
            Value::Matrix(a.clone())
                .binary(BinaryOp::Add, &Value::Matrix(b), Span::EOF)
                .unwrap(),
            Value::Matrix(matrix(&[&[11.0, 22.0], &[33.0, 44.0]]))
        );
        let skinny = matrix(&[&[1.0], &[2.0]]);
        assert!(Value::Matrix(a)
            .binary(BinaryOp::Add, &Value::Matrix(skinny), Span::EOF)
            .is_err());
    }

    #[test]
    fn scalars_broadcast() {
        let a = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(
            Value::Matrix(a)
                .binary(BinaryOp::Mul, &Value::Number(2.0), Span::EOF)
                .unwrap(),
            Value::Matrix(matrix(&[&[2.0, 4.0], &[6.0, 8.0]]))
        );
    }
}
