//! Trajectory resampling
//!
//! Input samples are placed on a uniform parameter grid `t_i = i / (n - 1)`
//! over `[0, 1]`, output samples at `t_k = k / (count - 1)`. Linear,
//! sample-and-hold and natural cubic spline interpolation are supported.

use galvokit_core::MapperError;
use galvokit_settings::Interpolation;

fn check_len(method: Interpolation, found: usize) -> Result<(), MapperError> {
    let required = method.min_points();
    if found < required {
        return Err(MapperError::InsufficientPoints {
            method: method.to_string(),
            required,
            found,
        });
    }
    Ok(())
}

/// Output parameter for sample `k` of `count`
fn output_t(k: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        k as f64 / (count - 1) as f64
    }
}

/// Nearest input index for parameter `t`
fn nearest_index(t: f64, len: usize) -> usize {
    ((t * (len - 1) as f64).round() as usize).min(len - 1)
}

/// Resample `values` to `count` samples
pub fn resample(
    values: &[f64],
    count: usize,
    method: Interpolation,
) -> Result<Vec<f64>, MapperError> {
    check_len(method, values.len())?;

    let out = match method {
        Interpolation::Nearest => (0..count)
            .map(|k| values[nearest_index(output_t(k, count), values.len())])
            .collect(),
        Interpolation::Linear => (0..count)
            .map(|k| linear_at(values, output_t(k, count)))
            .collect(),
        Interpolation::Cubic => {
            let spline = NaturalSpline::new(values);
            (0..count).map(|k| spline.at(output_t(k, count))).collect()
        }
    };
    Ok(out)
}

/// Resample a discrete per-sample flag; always sample-and-hold
pub fn resample_flags(flags: &[bool], count: usize) -> Result<Vec<bool>, MapperError> {
    check_len(Interpolation::Nearest, flags.len())?;
    Ok((0..count)
        .map(|k| flags[nearest_index(output_t(k, count), flags.len())])
        .collect())
}

/// Locate the grid interval holding `t` and the local offset in it
fn interval(t: f64, len: usize) -> (usize, f64) {
    let x = t.clamp(0.0, 1.0) * (len - 1) as f64;
    let i = (x.floor() as usize).min(len - 2);
    (i, x - i as f64)
}

fn linear_at(values: &[f64], t: f64) -> f64 {
    let (i, u) = interval(t, values.len());
    values[i] + (values[i + 1] - values[i]) * u
}

/// Natural cubic spline through uniformly spaced samples
struct NaturalSpline<'a> {
    values: &'a [f64],
    /// Second derivatives at the knots, in grid units
    second: Vec<f64>,
}

impl<'a> NaturalSpline<'a> {
    fn new(values: &'a [f64]) -> Self {
        let n = values.len();
        let mut second = vec![0.0; n];
        if n < 3 {
            return Self { values, second };
        }

        // Tridiagonal system M[i-1] + 4 M[i] + M[i+1] = 6 (y[i+1] - 2 y[i] + y[i-1])
        // for the interior knots, with M[0] = M[n-1] = 0. Thomas algorithm.
        let m = n - 2;
        let mut c_prime = vec![0.0; m];
        let mut d_prime = vec![0.0; m];
        for k in 0..m {
            let i = k + 1;
            let rhs = 6.0 * (values[i + 1] - 2.0 * values[i] + values[i - 1]);
            if k == 0 {
                c_prime[k] = 1.0 / 4.0;
                d_prime[k] = rhs / 4.0;
            } else {
                let denom = 4.0 - c_prime[k - 1];
                c_prime[k] = 1.0 / denom;
                d_prime[k] = (rhs - d_prime[k - 1]) / denom;
            }
        }
        for k in (0..m).rev() {
            let next = if k + 1 < m { second[k + 2] } else { 0.0 };
            second[k + 1] = d_prime[k] - c_prime[k] * next;
        }

        Self { values, second }
    }

    fn at(&self, t: f64) -> f64 {
        let (i, u) = interval(t, self.values.len());
        let v = 1.0 - u;
        v * self.values[i]
            + u * self.values[i + 1]
            + ((v * v * v - v) * self.second[i] + (u * u * u - u) * self.second[i + 1]) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoints() {
        let out = resample(&[0.0, 10.0], 5, Interpolation::Linear).unwrap();
        assert_eq!(out, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_nearest_holds_values() {
        let out = resample(&[1.0, 2.0, 3.0], 7, Interpolation::Nearest).unwrap();
        assert_eq!(out, vec![1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_cubic_passes_through_knots() {
        let values = [0.0, 3.0, -1.0, 4.0, 2.0];
        let out = resample(&values, 9, Interpolation::Cubic).unwrap();
        for (i, v) in values.iter().enumerate() {
            assert!((out[i * 2] - v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cubic_reproduces_lines() {
        let values = [1.0, 3.0, 5.0, 7.0, 9.0];
        let out = resample(&values, 17, Interpolation::Cubic).unwrap();
        for (k, v) in out.iter().enumerate() {
            let expected = 1.0 + 8.0 * k as f64 / 16.0;
            assert!((v - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_insufficient_points() {
        assert_eq!(
            resample(&[1.0], 4, Interpolation::Linear),
            Err(MapperError::InsufficientPoints {
                method: "linear".to_string(),
                required: 2,
                found: 1
            })
        );
        assert!(matches!(
            resample(&[1.0, 2.0, 3.0], 4, Interpolation::Cubic),
            Err(MapperError::InsufficientPoints { required: 4, found: 3, .. })
        ));
        assert!(resample_flags(&[], 4).is_err());
    }

    #[test]
    fn test_flags_never_blend() {
        let out = resample_flags(&[false, true, false], 10).unwrap();
        assert_eq!(out.len(), 10);
        assert!(!out[0] && !out[9]);
        assert!(out[4] && out[5]);
    }
}
