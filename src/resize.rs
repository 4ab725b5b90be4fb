//! Bilinear resizing of 2-D grids.

use anyhow::Result;
use ndarray::Array2;

use crate::error::PrepError;

/// Value used for samples that fall outside the source grid.
const CVAL: f64 = 0.0;

/// Grows both axes of `shape` by `growth` percent, rounding down.
pub fn grown_shape(shape: (usize, usize), growth: u32) -> (usize, usize) {
    let g = growth as usize;
    (shape.0 * g / 100, shape.1 * g / 100)
}

/// Resamples `grid` to `shape` with bilinear interpolation.
///
/// Output cell `o` is centred on source coordinate `(o + 0.5) * in / out - 0.5`.
/// Neighbours outside the source contribute [`CVAL`].
pub fn resize(grid: &Array2<f64>, shape: (usize, usize)) -> Result<Array2<f64>> {
    let (h, w) = grid.dim();
    if h == 0 || w == 0 || shape.0 == 0 || shape.1 == 0 {
        return Err(PrepError::EmptyShape {
            from: (h, w),
            to: shape,
        }
        .into());
    }

    let rows: Vec<(isize, f64)> = (0..shape.0).map(|o| source_coord(o, h, shape.0)).collect();
    let cols: Vec<(isize, f64)> = (0..shape.1).map(|o| source_coord(o, w, shape.1)).collect();

    let sample = |i: isize, j: isize| -> f64 {
        if i < 0 || j < 0 || i as usize >= h || j as usize >= w {
            CVAL
        } else {
            grid[[i as usize, j as usize]]
        }
    };

    let out = Array2::from_shape_fn(shape, |(r, c)| {
        let (i, fi) = rows[r];
        let (j, fj) = cols[c];

        let top = sample(i, j) * (1.0 - fj) + sample(i, j + 1) * fj;
        let bottom = sample(i + 1, j) * (1.0 - fj) + sample(i + 1, j + 1) * fj;

        top * (1.0 - fi) + bottom * fi
    });

    Ok(out)
}

// Lower neighbour index and the fractional weight of the upper neighbour
fn source_coord(o: usize, src_len: usize, dst_len: usize) -> (isize, f64) {
    let scale = src_len as f64 / dst_len as f64;
    let x = (o as f64 + 0.5) * scale - 0.5;
    let lower = x.floor();

    (lower as isize, x - lower)
}

// -- Tests -------------------------------------------------------------------
