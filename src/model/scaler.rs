use ndarray::{Array1, Array2, ArrayView2};

use crate::math::stats::{mean, population_std};

/// Per-column standardisation fitted on one model's training rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn fit(x: ArrayView2<f64>) -> Self {
        let mut means = Array1::zeros(x.ncols());
        let mut scale = Array1::ones(x.ncols());
        for (j, column) in x.columns().into_iter().enumerate() {
            let m = mean(column.iter().copied());
            let s = population_std(column.iter().copied(), m);
            means[j] = m;
            // Constant columns are centred but not scaled.
            if s > 0.0 && s.is_finite() {
                scale[j] = s;
            }
        }
        Self { mean: means, scale }
    }

    pub fn transform(&self, x: ArrayView2<f64>) -> Array2<f64> {
        let mut out = x.to_owned();
        for mut row in out.rows_mut() {
            row -= &self.mean;
            row /= &self.scale;
        }
        out
    }
}
