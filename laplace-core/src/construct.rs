//! Matrix construction: dimensions, buffers, canonical matrices, text input

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{MatrixError, Result};
use crate::types::Matrix;

/// Upper bound on the buffer reserved before any token has been read
const READ_RESERVE: usize = 4096;

impl Matrix {
    /// Zero-filled matrix of the given dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = Self::check_dims(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::InvalidDimensions { rows, cols })?;
        data.resize(len, 0.0);
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Take ownership of a row-major buffer of exactly `rows * cols` values
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let len = Self::check_dims(rows, cols)?;
        if data.len() != len {
            return Err(MatrixError::mismatch("from_vec", (1, len), (1, data.len())));
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Deep-copy a 2D buffer. Every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(source: &[R]) -> Result<Self> {
        let rows = source.len();
        let cols = source.first().map_or(0, |r| r.as_ref().len());
        let len = Self::check_dims(rows, cols)?;

        let mut data = Vec::with_capacity(len);
        for row in source {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::mismatch("from_rows", (1, row.len()), (1, cols)));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// All-zero square matrix
    pub fn zeros(order: usize) -> Result<Self> {
        Self::new(order, order)
    }

    /// Identity matrix: 1 on the diagonal, 0 elsewhere
    pub fn identity(order: usize) -> Result<Self> {
        let mut result = Self::new(order, order)?;
        for i in 0..order {
            result[(i, i)] = 1.0;
        }
        Ok(result)
    }

    /// Parse `rows * cols` whitespace-separated numbers in row-major order.
    /// Tokens after the last required one are ignored.
    pub fn parse(rows: usize, cols: usize, text: &str) -> Result<Self> {
        Self::from_reader(rows, cols, text.as_bytes())
    }

    /// Read `rows * cols` whitespace-separated numbers from a buffered reader
    pub fn from_reader<R: BufRead>(rows: usize, cols: usize, reader: R) -> Result<Self> {
        let len = Self::check_dims(rows, cols)?;
        let data = read_numbers(reader, len)?;
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Read `rows * cols` whitespace-separated numbers from a text file
    pub fn from_file(rows: usize, cols: usize, path: impl AsRef<Path>) -> Result<Self> {
        Self::check_dims(rows, cols)?;
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MatrixError::FileNotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), rows, cols, "reading matrix from file");
        Self::from_reader(rows, cols, BufReader::new(file))
    }
}

/// Pull exactly `expected` numbers out of `reader`, stopping as soon as
/// enough have been read. The buffer grows with the input, so a large
/// `expected` on a short stream costs nothing up front.
pub fn read_numbers<R: BufRead>(reader: R, expected: usize) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(expected.min(READ_RESERVE));
    if expected == 0 {
        return Ok(values);
    }

    for line in reader.lines() {
        let line = line.map_err(|e| MatrixError::Io(e.to_string()))?;
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| MatrixError::Parse {
                token: token.to_string(),
                position: values.len(),
            })?;
            values.push(value);
            if values.len() == expected {
                return Ok(values);
            }
        }
    }

    Err(MatrixError::InsufficientData {
        expected,
        found: values.len(),
    })
}
