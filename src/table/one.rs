use std::path::Path;

use ndarray::Array1;

use crate::{TableError, transform::Transform};

use super::read_numeric_rows;

/// Relative tolerance used to detect uniform sample spacing.
const UNIFORM_TOL: f64 = 1.0e-8;

/// One-dimensional lookup table with forward and inverse lookup and
/// derivative estimates from the local interpolation stencil.
///
/// Samples are interpolated linearly in transformed space (see
/// [`Transform`]) and results are reported in real space. Uniformly spaced
/// samples are indexed arithmetically; irregular samples fall back to binary
/// search. Queries beyond the sampled range silently extrapolate the edge
/// interval's slope.
#[derive(Debug, Clone)]
pub struct Table1D {
    /// Sample coordinates in real space.
    x: Array1<f64>,
    /// Sample coordinates in transformed space, strictly increasing.
    x_mod: Array1<f64>,
    /// Sample values in transformed space.
    f_mod: Array1<f64>,
    value_transform: Transform,
    x_transform: Transform,
    /// Constant transformed-space spacing, when the samples are uniform.
    uniform_dx: Option<f64>,
}

impl Table1D {
    /// Builds a table from real-space samples.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two samples are given, the arrays disagree in
    /// length, or the transformed x-samples are not strictly increasing.
    pub fn new(
        x: Vec<f64>,
        f: Vec<f64>,
        value_transform: Transform,
        x_transform: Transform,
    ) -> Result<Self, TableError> {
        if x.len() != f.len() {
            return Err(TableError::Shape {
                reason: format!("{} x-samples but {} values", x.len(), f.len()),
            });
        }
        if x.len() < 2 {
            return Err(TableError::Shape {
                reason: format!("a table needs at least 2 samples, got {}", x.len()),
            });
        }

        let x = Array1::from(x);
        let x_mod = x.mapv(|v| x_transform.apply(v));
        let f_mod = Array1::from(f).mapv(|v| value_transform.apply(v));

        if x_mod.windows(2).into_iter().any(|w| w[1] <= w[0]) {
            return Err(TableError::NonMonotonic { axis: "x" });
        }

        let dx = x_mod[1] - x_mod[0];
        let uniform = x_mod
            .windows(2)
            .into_iter()
            .all(|w| ((w[1] - w[0]) - dx).abs() <= UNIFORM_TOL * dx.abs());

        Ok(Self {
            x,
            x_mod,
            f_mod,
            value_transform,
            x_transform,
            uniform_dx: uniform.then_some(dx),
        })
    }

    /// Reads a two-column `x f` table from a delimited text file.
    ///
    /// # Errors
    ///
    /// Fails on I/O or parse errors, rows without exactly two columns, or
    /// any of the [`Table1D::new`] validation failures.
    pub fn from_file(
        path: impl AsRef<Path>,
        value_transform: Transform,
        x_transform: Transform,
    ) -> Result<Self, TableError> {
        let path = path.as_ref();
        let mut x = Vec::new();
        let mut f = Vec::new();
        for (line, row) in read_numeric_rows(path)? {
            if row.len() != 2 {
                return Err(TableError::Parse {
                    path: path.display().to_string(),
                    line,
                    reason: format!("expected 2 columns, got {}", row.len()),
                });
            }
            x.push(row[0]);
            f.push(row[1]);
        }
        Self::new(x, f, value_transform, x_transform)
    }

    /// Clamps an interval index to the table's interior, `[0, n-2]`.
    fn bound(&self, i: isize) -> usize {
        i.clamp(0, self.x.len() as isize - 2) as usize
    }

    /// Finds the lower bracketing index and fractional offset of a
    /// transformed coordinate. The offset is left unclamped so that
    /// out-of-range queries extrapolate the edge interval.
    fn find_index(&self, xm: f64) -> (usize, f64) {
        let i = match self.uniform_dx {
            Some(dx) => self.bound(((xm - self.x_mod[0]) / dx).floor() as isize),
            None => {
                // Binary search for the last sample at or below the query.
                let slice = self.x_mod.as_slice().expect("samples are contiguous");
                self.bound(slice.partition_point(|&v| v <= xm) as isize - 1)
            }
        };
        let f = (xm - self.x_mod[i]) / (self.x_mod[i + 1] - self.x_mod[i]);
        (i, f)
    }

    /// Interpolated value at `x`.
    #[must_use]
    pub fn lookup(&self, x: f64) -> f64 {
        let (i, f) = self.find_index(self.x_transform.apply(x));
        let fm = self.f_mod[i] * (1.0 - f) + self.f_mod[i + 1] * f;
        self.value_transform.invert(fm)
    }

    /// Inverts the table: the `x` at which the interpolant equals `value`.
    ///
    /// The bracketing interval is located in the stored values; a query
    /// outside their range extrapolates the nearer edge interval.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::Degenerate`] if the bracketing interval has
    /// zero value range, i.e. the table cannot distinguish nearby `x`.
    pub fn reverse_lookup(&self, value: f64) -> Result<f64, TableError> {
        let fm = self.value_transform.apply(value);
        let n = self.f_mod.len();

        let i = (0..n - 1)
            .find(|&i| (self.f_mod[i] - fm) * (self.f_mod[i + 1] - fm) <= 0.0)
            .unwrap_or_else(|| {
                let ascending = self.f_mod[n - 1] >= self.f_mod[0];
                if (fm > self.f_mod[n - 1]) == ascending { n - 2 } else { 0 }
            });

        let df = self.f_mod[i + 1] - self.f_mod[i];
        if df.abs() < f64::MIN_POSITIVE {
            return Err(TableError::Degenerate { what: "value" });
        }

        let f = (fm - self.f_mod[i]) / df;
        let xm = self.x_mod[i] * (1.0 - f) + self.x_mod[i + 1] * f;
        Ok(self.x_transform.invert(xm))
    }

    /// First derivative estimate at `x`, the real-space secant slope of the
    /// bracketing samples.
    #[must_use]
    pub fn dfdx(&self, x: f64) -> f64 {
        let (i, _) = self.find_index(self.x_transform.apply(x));
        (self.real_f(i + 1) - self.real_f(i)) / (self.x[i + 1] - self.x[i])
    }

    /// Second derivative estimate at `x` from the three nearest samples.
    /// Returns zero for a two-sample table, which has no curvature.
    #[must_use]
    pub fn d2fdx2(&self, x: f64) -> f64 {
        if self.x.len() < 3 {
            return 0.0;
        }
        let (i, _) = self.find_index(self.x_transform.apply(x));
        let i = i.clamp(1, self.x.len() - 2);

        let upper = (self.real_f(i + 1) - self.real_f(i)) / (self.x[i + 1] - self.x[i]);
        let lower = (self.real_f(i) - self.real_f(i - 1)) / (self.x[i] - self.x[i - 1]);
        2.0 * (upper - lower) / (self.x[i + 1] - self.x[i - 1])
    }

    /// Stored value at sample `i`, back in real space.
    fn real_f(&self, i: usize) -> f64 {
        self.value_transform.invert(self.f_mod[i])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn ramp() -> Table1D {
        Table1D::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 10.0, 20.0],
            Transform::Identity,
            Transform::Identity,
        )
        .unwrap()
    }

    #[test]
    fn lookup_interpolates_linearly() {
        let table = ramp();
        assert_relative_eq!(table.lookup(0.5), 5.0);
        assert_relative_eq!(table.dfdx(0.5), 10.0);
    }

    #[test]
    fn lookup_is_exact_at_sample_points() {
        let x = vec![0.5, 1.0, 2.5, 4.0, 7.0];
        let f = vec![3.0, 4.0, 9.0, 2.0, 5.0];
        let table =
            Table1D::new(x.clone(), f.clone(), Transform::Identity, Transform::Identity).unwrap();
        for (xi, fi) in x.iter().zip(&f) {
            assert_relative_eq!(table.lookup(*xi), *fi, max_relative = 1e-12);
        }
    }

    #[test]
    fn reverse_lookup_round_trips_inside_the_range() {
        let table = Table1D::new(
            vec![1.0, 2.0, 4.0, 8.0],
            vec![2.0, 3.0, 5.0, 9.0],
            Transform::Identity,
            Transform::Ln,
        )
        .unwrap();
        for x in [1.2, 1.9, 3.0, 6.5] {
            let recovered = table.reverse_lookup(table.lookup(x)).unwrap();
            assert_relative_eq!(recovered, x, max_relative = 1e-10);
        }
    }

    #[test]
    fn log_transformed_table_is_exact_at_samples() {
        let x = vec![1.0, 10.0, 100.0];
        let f = vec![2.0, 20.0, 200.0];
        let table =
            Table1D::new(x.clone(), f.clone(), Transform::Log10, Transform::Log10).unwrap();
        for (xi, fi) in x.iter().zip(&f) {
            assert_relative_eq!(table.lookup(*xi), *fi, max_relative = 1e-12);
        }
    }

    #[test]
    fn out_of_range_queries_extrapolate_the_edge_interval() {
        let table = ramp();
        assert_relative_eq!(table.lookup(3.0), 30.0);
        assert_relative_eq!(table.lookup(-1.0), -10.0);
    }

    #[test]
    fn second_derivative_of_a_quadratic_is_constant() {
        let x: Vec<f64> = (0..6).map(f64::from).collect();
        let f: Vec<f64> = x.iter().map(|v| 3.0 * v * v).collect();
        let table = Table1D::new(x, f, Transform::Identity, Transform::Identity).unwrap();
        for q in [0.2, 1.5, 3.0, 4.9] {
            assert_relative_eq!(table.d2fdx2(q), 6.0, max_relative = 1e-10);
        }
    }

    #[test]
    fn non_monotonic_samples_are_rejected() {
        let result = Table1D::new(
            vec![0.0, 2.0, 1.0],
            vec![0.0, 1.0, 2.0],
            Transform::Identity,
            Transform::Identity,
        );
        assert!(matches!(result, Err(TableError::NonMonotonic { axis: "x" })));
    }

    #[test]
    fn degenerate_value_range_fails_reverse_lookup() {
        let table = Table1D::new(
            vec![0.0, 1.0, 2.0],
            vec![5.0, 5.0, 5.0],
            Transform::Identity,
            Transform::Identity,
        )
        .unwrap();
        assert!(matches!(
            table.reverse_lookup(5.0),
            Err(TableError::Degenerate { .. })
        ));
    }

    #[test]
    fn reads_a_two_column_file() {
        let path = std::env::temp_dir().join("blast_thermo_table1d_test.txt");
        std::fs::write(&path, "# x f\n0 0\n1, 10\n2 20\n\n").unwrap();
        let table = Table1D::from_file(&path, Transform::Identity, Transform::Identity).unwrap();
        assert_relative_eq!(table.lookup(1.5), 15.0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn rejects_rows_with_wrong_column_count() {
        let path = std::env::temp_dir().join("blast_thermo_table1d_bad.txt");
        std::fs::write(&path, "0 0\n1 10 99\n").unwrap();
        let result = Table1D::from_file(&path, Transform::Identity, Transform::Identity);
        assert!(matches!(result, Err(TableError::Parse { .. })));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn column_count_errors_report_the_file_line() {
        // Comment and blank lines before the bad row must not shift the
        // reported line number.
        let path = std::env::temp_dir().join("blast_thermo_table1d_lineno.txt");
        std::fs::write(&path, "# header\n\n0 0\n1 10\n\n2 20 99\n").unwrap();
        let result = Table1D::from_file(&path, Transform::Identity, Transform::Identity);
        match result {
            Err(TableError::Parse { line, .. }) => assert_eq!(line, 6),
            other => panic!("expected a parse error, got {other:?}"),
        }
        std::fs::remove_file(&path).ok();
    }
}
