//! Lock-free weight matrix shared by training threads
//!
//! Rows are updated without synchronization. Concurrent writers may lose
//! each other's increments, which word2vec-style SGD tolerates.

use ndarray::Array2;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct SharedMatrix {
    data: Vec<AtomicU32>,
    rows: usize,
    cols: usize,
}

impl SharedMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| 0.0)
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(AtomicU32::new(f(r, c).to_bits()));
            }
        }
        Self { data, rows, cols }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn row(&self, row: usize) -> &[AtomicU32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Copy a row into `out`
    pub fn read_row(&self, row: usize, out: &mut [f32]) {
        for (dst, cell) in out.iter_mut().zip(self.row(row)) {
            *dst = f32::from_bits(cell.load(Ordering::Relaxed));
        }
    }

    pub fn dot(&self, row: usize, other: &[f32]) -> f32 {
        self.row(row)
            .iter()
            .zip(other)
            .map(|(cell, &x)| f32::from_bits(cell.load(Ordering::Relaxed)) * x)
            .sum()
    }

    /// `row += scale * delta`
    pub fn add_to_row(&self, row: usize, delta: &[f32], scale: f32) {
        for (cell, &d) in self.row(row).iter().zip(delta) {
            let current = f32::from_bits(cell.load(Ordering::Relaxed));
            cell.store((current + scale * d).to_bits(), Ordering::Relaxed);
        }
    }

    /// `out += scale * row`
    pub fn accumulate_row(&self, row: usize, out: &mut [f32], scale: f32) {
        for (dst, cell) in out.iter_mut().zip(self.row(row)) {
            *dst += scale * f32::from_bits(cell.load(Ordering::Relaxed));
        }
    }

    pub fn into_array(self) -> Array2<f32> {
        let values: Vec<f32> = self
            .data
            .into_iter()
            .map(|cell| f32::from_bits(cell.into_inner()))
            .collect();
        let cols = self.cols;
        Array2::from_shape_fn((self.rows, cols), |(r, c)| values[r * cols + c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_ops() {
        let m = SharedMatrix::from_fn(2, 3, |r, c| (r * 3 + c) as f32);
        let mut row = vec![0.0; 3];
        m.read_row(1, &mut row);
        assert_eq!(row, vec![3.0, 4.0, 5.0]);

        assert_eq!(m.dot(0, &[1.0, 1.0, 1.0]), 3.0);

        m.add_to_row(0, &[1.0, 2.0, 3.0], 0.5);
        m.read_row(0, &mut row);
        assert_eq!(row, vec![0.5, 2.0, 3.5]);

        let mut acc = vec![1.0; 3];
        m.accumulate_row(1, &mut acc, 2.0);
        assert_eq!(acc, vec![7.0, 9.0, 11.0]);
    }

    #[test]
    fn test_array_conversion() {
        let array = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let m = SharedMatrix::from_fn(2, 2, |r, c| array[[r, c]]);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.into_array(), array);
    }
}
