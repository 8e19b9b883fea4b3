use std::path::Path;

use ndarray::{Array1, Array2};

use crate::{TableError, transform::Transform};

use super::read_numeric_rows;

/// Two-dimensional lookup table on a grid that is uniform in transformed
/// space, with bilinear forward lookup, per-axis inverse lookup, and
/// derivative estimates from the local interpolation stencil.
///
/// The x-axis is density-like and the y-axis energy-like by convention, but
/// nothing in the table depends on that. Values are stored row-major with
/// the x-index outermost. Queries beyond the grid silently extrapolate the
/// boundary cell.
#[derive(Debug, Clone)]
pub struct Table2D {
    /// Grid origin and spacing along each axis, in transformed space.
    x_min: f64,
    dx: f64,
    y_min: f64,
    dy: f64,
    /// Values in transformed space, shape `(nx, ny)`.
    f_mod: Array2<f64>,
    /// Grid coordinates in real space.
    x: Array1<f64>,
    y: Array1<f64>,
    value_transform: Transform,
    x_transform: Transform,
    y_transform: Transform,
}

/// Grid geometry and transforms for a [`Table2D`], read from configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GridSpec {
    pub nx: usize,
    pub ny: usize,
    /// Axis origins and spacings, in transformed space.
    pub x_min: f64,
    pub dx: f64,
    pub y_min: f64,
    pub dy: f64,
    #[serde(default)]
    pub value_transform: Transform,
    #[serde(default)]
    pub x_transform: Transform,
    #[serde(default)]
    pub y_transform: Transform,
}

impl Table2D {
    /// Builds a table from real-space values on the grid described by
    /// `spec`.
    ///
    /// # Errors
    ///
    /// Fails if either axis has fewer than two points, a spacing is not
    /// positive, or the value array does not match the grid shape.
    pub fn new(spec: &GridSpec, values: Array2<f64>) -> Result<Self, TableError> {
        if spec.nx < 2 || spec.ny < 2 {
            return Err(TableError::Shape {
                reason: format!("grid must be at least 2x2, got {}x{}", spec.nx, spec.ny),
            });
        }
        if spec.dx <= 0.0 {
            return Err(TableError::NonMonotonic { axis: "x" });
        }
        if spec.dy <= 0.0 {
            return Err(TableError::NonMonotonic { axis: "y" });
        }
        if values.dim() != (spec.nx, spec.ny) {
            return Err(TableError::Shape {
                reason: format!(
                    "expected {}x{} values, got {}x{}",
                    spec.nx,
                    spec.ny,
                    values.dim().0,
                    values.dim().1
                ),
            });
        }

        let x = Array1::from_iter(
            (0..spec.nx).map(|i| spec.x_transform.invert(grid_coord(i, spec.x_min, spec.dx))),
        );
        let y = Array1::from_iter(
            (0..spec.ny).map(|j| spec.y_transform.invert(grid_coord(j, spec.y_min, spec.dy))),
        );

        Ok(Self {
            x_min: spec.x_min,
            dx: spec.dx,
            y_min: spec.y_min,
            dy: spec.dy,
            f_mod: values.mapv(|v| spec.value_transform.apply(v)),
            x,
            y,
            value_transform: spec.value_transform,
            x_transform: spec.x_transform,
            y_transform: spec.y_transform,
        })
    }

    /// Reads row-major grid values from a delimited text file.
    ///
    /// The file must contain exactly `nx * ny` numbers; row breaks are
    /// cosmetic.
    ///
    /// # Errors
    ///
    /// Fails on I/O or parse errors, a value count that does not match the
    /// grid, or any of the [`Table2D::new`] validation failures.
    pub fn from_file(path: impl AsRef<Path>, spec: &GridSpec) -> Result<Self, TableError> {
        let path = path.as_ref();
        let values: Vec<f64> = read_numeric_rows(path)?
            .into_iter()
            .flat_map(|(_, row)| row)
            .collect();
        if values.len() != spec.nx * spec.ny {
            return Err(TableError::Shape {
                reason: format!(
                    "`{}` holds {} values but the {}x{} grid needs {}",
                    path.display(),
                    values.len(),
                    spec.nx,
                    spec.ny,
                    spec.nx * spec.ny
                ),
            });
        }
        let values = Array2::from_shape_vec((spec.nx, spec.ny), values)
            .expect("length checked against grid shape");
        Self::new(spec, values)
    }

    /// Grid dimensions `(nx, ny)`.
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        self.f_mod.dim()
    }

    /// Finds the lower bracketing index and unclamped fractional offset
    /// along one axis.
    fn find_index(v_mod: f64, min: f64, d: f64, n: usize) -> (usize, f64) {
        let i = (((v_mod - min) / d).floor() as isize).clamp(0, n as isize - 2) as usize;
        let f = (v_mod - grid_coord(i, min, d)) / d;
        (i, f)
    }

    fn x_index(&self, x: f64) -> (usize, f64) {
        Self::find_index(self.x_transform.apply(x), self.x_min, self.dx, self.x.len())
    }

    fn y_index(&self, y: f64) -> (usize, f64) {
        Self::find_index(self.y_transform.apply(y), self.y_min, self.dy, self.y.len())
    }

    /// Bilinear interpolation at `(x, y)`.
    #[must_use]
    pub fn lookup(&self, x: f64, y: f64) -> f64 {
        let (i, fx) = self.x_index(x);
        let (j, fy) = self.y_index(y);
        let fm = self.f_mod[[i, j]] * (1.0 - fx) * (1.0 - fy)
            + self.f_mod[[i + 1, j]] * fx * (1.0 - fy)
            + self.f_mod[[i, j + 1]] * (1.0 - fx) * fy
            + self.f_mod[[i + 1, j + 1]] * fx * fy;
        self.value_transform.invert(fm)
    }

    /// Inverts the table along x: the `x` at which the interpolant equals
    /// `value`, with `y` held fixed.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::Degenerate`] if the bracketing column pair
    /// has zero value range along x.
    pub fn reverse_lookup_x(&self, value: f64, y: f64) -> Result<f64, TableError> {
        let (j, fy) = self.y_index(y);
        let nx = self.x.len();
        let column = |i: usize| self.f_mod[[i, j]] * (1.0 - fy) + self.f_mod[[i, j + 1]] * fy;
        let i = bracket(value, self.value_transform, nx, column)?;

        let g0 = column(i);
        let g1 = column(i + 1);
        let f = (self.value_transform.apply(value) - g0) / (g1 - g0);
        let xm = grid_coord(i, self.x_min, self.dx) + f * self.dx;
        Ok(self.x_transform.invert(xm))
    }

    /// Inverts the table along y: the `y` at which the interpolant equals
    /// `value`, with `x` held fixed.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::Degenerate`] if the bracketing row pair has
    /// zero value range along y.
    pub fn reverse_lookup_y(&self, value: f64, x: f64) -> Result<f64, TableError> {
        let (i, fx) = self.x_index(x);
        let ny = self.y.len();
        let row = |j: usize| self.f_mod[[i, j]] * (1.0 - fx) + self.f_mod[[i + 1, j]] * fx;
        let j = bracket(value, self.value_transform, ny, row)?;

        let g0 = row(j);
        let g1 = row(j + 1);
        let f = (self.value_transform.apply(value) - g0) / (g1 - g0);
        let ym = grid_coord(j, self.y_min, self.dy) + f * self.dy;
        Ok(self.y_transform.invert(ym))
    }

    /// First derivative estimate with respect to x.
    #[must_use]
    pub fn dfdx(&self, x: f64, y: f64) -> f64 {
        let (i, _) = self.x_index(x);
        let (j, fy) = self.y_index(y);
        (self.real_column(i + 1, j, fy) - self.real_column(i, j, fy)) / (self.x[i + 1] - self.x[i])
    }

    /// First derivative estimate with respect to y.
    #[must_use]
    pub fn dfdy(&self, x: f64, y: f64) -> f64 {
        let (i, fx) = self.x_index(x);
        let (j, _) = self.y_index(y);
        (self.real_row(j + 1, i, fx) - self.real_row(j, i, fx)) / (self.y[j + 1] - self.y[j])
    }

    /// Second derivative estimate with respect to x. Zero for a grid with
    /// fewer than three x-points.
    #[must_use]
    pub fn d2fdx2(&self, x: f64, y: f64) -> f64 {
        let nx = self.x.len();
        if nx < 3 {
            return 0.0;
        }
        let (i, _) = self.x_index(x);
        let i = i.clamp(1, nx - 2);
        let (j, fy) = self.y_index(y);

        let g = |i: usize| self.real_column(i, j, fy);
        let upper = (g(i + 1) - g(i)) / (self.x[i + 1] - self.x[i]);
        let lower = (g(i) - g(i - 1)) / (self.x[i] - self.x[i - 1]);
        2.0 * (upper - lower) / (self.x[i + 1] - self.x[i - 1])
    }

    /// Second derivative estimate with respect to y. Zero for a grid with
    /// fewer than three y-points.
    #[must_use]
    pub fn d2fdy2(&self, x: f64, y: f64) -> f64 {
        let ny = self.y.len();
        if ny < 3 {
            return 0.0;
        }
        let (i, fx) = self.x_index(x);
        let (j, _) = self.y_index(y);
        let j = j.clamp(1, ny - 2);

        let g = |j: usize| self.real_row(j, i, fx);
        let upper = (g(j + 1) - g(j)) / (self.y[j + 1] - self.y[j]);
        let lower = (g(j) - g(j - 1)) / (self.y[j] - self.y[j - 1]);
        2.0 * (upper - lower) / (self.y[j + 1] - self.y[j - 1])
    }

    /// Mixed second derivative: the cross difference of the four corner
    /// samples over the product of the real-space steps.
    #[must_use]
    pub fn d2fdxdy(&self, x: f64, y: f64) -> f64 {
        let (i, _) = self.x_index(x);
        let (j, _) = self.y_index(y);
        let f = |i: usize, j: usize| self.value_transform.invert(self.f_mod[[i, j]]);
        (f(i + 1, j + 1) - f(i + 1, j) - f(i, j + 1) + f(i, j))
            / ((self.x[i + 1] - self.x[i]) * (self.y[j + 1] - self.y[j]))
    }

    /// Real-space value at x-index `i`, interpolated in y.
    fn real_column(&self, i: usize, j: usize, fy: f64) -> f64 {
        let f = |j: usize| self.value_transform.invert(self.f_mod[[i, j]]);
        f(j) * (1.0 - fy) + f(j + 1) * fy
    }

    /// Real-space value at y-index `j`, interpolated in x.
    fn real_row(&self, j: usize, i: usize, fx: f64) -> f64 {
        let f = |i: usize| self.value_transform.invert(self.f_mod[[i, j]]);
        f(i) * (1.0 - fx) + f(i + 1) * fx
    }
}

/// Transformed-space coordinate of grid index `i`.
fn grid_coord(i: usize, min: f64, d: f64) -> f64 {
    min + i as f64 * d
}

/// Finds the interval of a strictly varying profile that brackets `value`,
/// falling back to the nearer edge interval for out-of-range targets.
fn bracket(
    value: f64,
    value_transform: Transform,
    n: usize,
    g: impl Fn(usize) -> f64,
) -> Result<usize, TableError> {
    let fm = value_transform.apply(value);
    let i = (0..n - 1)
        .find(|&i| (g(i) - fm) * (g(i + 1) - fm) <= 0.0)
        .unwrap_or_else(|| {
            let ascending = g(n - 1) >= g(0);
            if (fm > g(n - 1)) == ascending { n - 2 } else { 0 }
        });

    if (g(i + 1) - g(i)).abs() < f64::MIN_POSITIVE {
        return Err(TableError::Degenerate { what: "value" });
    }
    Ok(i)
}
