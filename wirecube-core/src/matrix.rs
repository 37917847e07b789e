/// 4x4 matrix value type
use std::fmt;

use approx::{AbsDiffEq, RelativeEq};

/// A 4x4 matrix of single-precision floats.
///
/// Stored flat in column-major order: element `i` is row `i % 4` of column
/// `i / 4`. Columns 0-2 hold the linear part, column 3 the translation.
#[derive(Clone, Copy, PartialEq)]
pub struct Matrix {
    data: [f32; 16],
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        data: [
            1., 0., 0., 0., //
            0., 1., 0., 0., //
            0., 0., 1., 0., //
            0., 0., 0., 1.,
        ],
    };

    pub const fn from_cols_array(data: [f32; 16]) -> Matrix {
        Matrix { data }
    }

    /// Build from a row-major nested array, the way matrices are written on paper.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Matrix {
        let mut data = [0.0; 16];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                data[Self::index(row, col)] = *value;
            }
        }
        Matrix { data }
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[Self::index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[Self::index(row, col)] = value;
    }

    pub fn column(&self, col: usize) -> [f32; 4] {
        let start = col * 4;
        [
            self.data[start],
            self.data[start + 1],
            self.data[start + 2],
            self.data[start + 3],
        ]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    const fn index(row: usize, col: usize) -> usize {
        col * 4 + row
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Matrix {{")?;
            for row in 0..4 {
                writeln!(
                    f,
                    "\t[{:>9.4}, {:>9.4}, {:>9.4}, {:>9.4}]",
                    self.get(row, 0),
                    self.get(row, 1),
                    self.get(row, 2),
                    self.get(row, 3)
                )?;
            }
            write!(f, "}}")
        } else {
            write!(f, "Matrix {{ data: {:?} }}", &self.data)
        }
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
