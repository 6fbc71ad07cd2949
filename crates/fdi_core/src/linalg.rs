//! Dense least squares for the small regressions the forecaster runs

/// Pivots below this fraction of the largest column norm are treated as zero
const RANK_TOLERANCE: f64 = 1e-10;

/// Solve `min ‖X·b − y‖₂` with Householder QR.
///
/// `design` is row-major with `p` columns per row. Columns that are linearly
/// dependent on earlier ones get a coefficient of 0, as do any left over once
/// every row holds a pivot.
pub(crate) fn least_squares(design: &[Vec<f64>], target: &[f64]) -> Vec<f64> {
    let m = design.len();
    let p = design.first().map_or(0, Vec::len);

    // Column-major working copy, reduced in place to R
    let mut columns: Vec<Vec<f64>> = (0..p)
        .map(|j| design.iter().map(|row| row[j]).collect())
        .collect();
    let mut rhs = target.to_vec();

    let scale = columns
        .iter()
        .map(|c| norm(c))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    // (column, row, diagonal of R) for each accepted pivot
    let mut pivots: Vec<(usize, usize, f64)> = Vec::with_capacity(p.min(m));
    let mut r = 0;

    for k in 0..p {
        if r == m {
            break;
        }
        let sub_norm = norm(&columns[k][r..]);
        if sub_norm <= RANK_TOLERANCE * scale {
            continue;
        }

        // Sign opposite to the leading entry keeps |v[0]| >= sub_norm
        let alpha = if columns[k][r] > 0.0 { -sub_norm } else { sub_norm };
        let mut v = columns[k][r..].to_vec();
        v[0] -= alpha;
        let v_norm_sq: f64 = v.iter().map(|x| x * x).sum();

        for column in columns.iter_mut().skip(k + 1) {
            reflect(&mut column[r..], &v, v_norm_sq);
        }
        reflect(&mut rhs[r..], &v, v_norm_sq);

        pivots.push((k, r, alpha));
        r += 1;
    }

    let mut coefficients = vec![0.0; p];
    for &(k, row, alpha) in pivots.iter().rev() {
        let tail: f64 = ((k + 1)..p)
            .map(|j| columns[j][row] * coefficients[j])
            .sum();
        coefficients[k] = (rhs[row] - tail) / alpha;
    }
    coefficients
}

/// Apply `I − 2vvᵀ/‖v‖²` to `x`
fn reflect(x: &mut [f64], v: &[f64], v_norm_sq: f64) {
    let projection: f64 = x.iter().zip(v).map(|(a, b)| a * b).sum();
    let factor = 2.0 * projection / v_norm_sq;
    for (xi, vi) in x.iter_mut().zip(v) {
        *xi -= factor * vi;
    }
}

fn norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}
