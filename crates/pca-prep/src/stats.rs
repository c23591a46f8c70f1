//! Mean-centering, variance and covariance over dimensions.
//!
//! A dimension is any slice of primitive numbers; a dataset is a slice of
//! dimensions (`Vec<Vec<i32>>`, `[[f64; 3]; 2]`, `Vec<&[u8]>`, ...). Every
//! function returns freshly allocated `f64` values and leaves its input alone.
use log::{debug, trace};
use num_traits::AsPrimitive;
use rayon::prelude::*;

use crate::config::{Correction, CovMatConfig};
use crate::error::StatsError;
use crate::math::Array2;

/// Element type accepted by the statistics: any primitive integer or float.
pub trait Numeric: AsPrimitive<f64> + Send + Sync {}

impl<T> Numeric for T where T: AsPrimitive<f64> + Send + Sync {}

/// Arithmetic mean of a dimension.
///
/// # Errors
///
/// `DivisionUndefined` if `dimension` is empty.
pub fn mean<T: Numeric>(dimension: &[T]) -> Result<f64, StatsError> {
    if dimension.is_empty() {
        return Err(StatsError::DivisionUndefined);
    }
    let sum: f64 = dimension.iter().map(|v| v.as_()).sum();
    Ok(sum / dimension.len() as f64)
}

/// Geometric mean of a dimension: the `n`-th root of the product.
///
/// Negative values can make the root undefined, in which case the result is NaN.
///
/// # Errors
///
/// `DivisionUndefined` if `dimension` is empty.
pub fn geom_mean<T: Numeric>(dimension: &[T]) -> Result<f64, StatsError> {
    if dimension.is_empty() {
        return Err(StatsError::DivisionUndefined);
    }
    let product: f64 = dimension.iter().map(|v| v.as_()).product();
    Ok(product.powf(1.0 / dimension.len() as f64))
}

/// Shift every dimension so that its mean becomes zero.
///
/// Dimensions are centered independently and may have different lengths.
///
/// # Arguments
///
/// * `dataset` - One numeric sequence per variable.
///
/// # Returns
///
/// A dataset of the same shape holding `value - mean` for each value.
///
/// # Errors
///
/// `DivisionUndefined` if any dimension is empty.
pub fn center<T, D>(dataset: &[D]) -> Result<Vec<Vec<f64>>, StatsError>
where
    T: Numeric,
    D: AsRef<[T]>,
{
    dataset
        .iter()
        .map(|dimension| -> Result<Vec<f64>, StatsError> {
            let dimension = dimension.as_ref();
            let m = mean(dimension)?;
            Ok(dimension.iter().map(|v| v.as_() - m).collect())
        })
        .collect()
}

/// Center each dimension and divide it by its standard deviation.
///
/// # Errors
///
/// `DivisionUndefined` for an empty dimension (or a single value under
/// [`Correction::Sample`]), `ZeroVariance` for a constant dimension.
pub fn standardize<T, D>(dataset: &[D], correction: Correction) -> Result<Vec<Vec<f64>>, StatsError>
where
    T: Numeric,
    D: AsRef<[T]>,
{
    dataset
        .iter()
        .enumerate()
        .map(|(idx, dimension)| -> Result<Vec<f64>, StatsError> {
            let dimension = dimension.as_ref();
            let m = mean(dimension)?;
            let sd = std_dev(dimension, correction)?;
            if sd == 0.0 || !sd.is_finite() {
                return Err(StatsError::ZeroVariance { dimension: idx });
            }
            trace!("Standardizing dimension {} (mean={}, std={})", idx, m, sd);
            Ok(dimension.iter().map(|v| (v.as_() - m) / sd).collect())
        })
        .collect()
}

/// Population variance: `(1/n) * sum((x - mean)^2)`.
pub fn variance<T: Numeric>(dimension: &[T]) -> Result<f64, StatsError> {
    variance_with(dimension, Correction::Population)
}

/// Variance with an explicit divisor.
///
/// Uses the same arithmetic as [`covariance_with`] so that
/// `variance_with(d, c) == covariance_with(d, d, c)` holds bit for bit.
pub fn variance_with<T: Numeric>(dimension: &[T], correction: Correction) -> Result<f64, StatsError> {
    let m = mean(dimension)?;
    let divisor = correction
        .divisor(dimension.len())
        .ok_or(StatsError::DivisionUndefined)?;
    let sum_sq: f64 = dimension
        .iter()
        .map(|v| {
            let dev = v.as_() - m;
            dev * dev
        })
        .sum();
    Ok(sum_sq / divisor)
}

pub fn std_dev<T: Numeric>(dimension: &[T], correction: Correction) -> Result<f64, StatsError> {
    variance_with(dimension, correction).map(f64::sqrt)
}

/// Population covariance of two dimensions paired by index.
///
/// # Errors
///
/// `LengthMismatch` if the lengths differ (checked first), then
/// `DivisionUndefined` if both are empty.
pub fn covariance<T, U>(x: &[T], y: &[U]) -> Result<f64, StatsError>
where
    T: Numeric,
    U: Numeric,
{
    covariance_with(x, y, Correction::Population)
}

pub fn covariance_with<T, U>(x: &[T], y: &[U], correction: Correction) -> Result<f64, StatsError>
where
    T: Numeric,
    U: Numeric,
{
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            len_x: x.len(),
            len_y: y.len(),
        });
    }
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;
    let divisor = correction
        .divisor(x.len())
        .ok_or(StatsError::DivisionUndefined)?;
    let cov_sum: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a.as_() - x_mean) * (b.as_() - y_mean))
        .sum();
    Ok(cov_sum / divisor)
}

/// Covariance matrix with the population divisor.
///
/// `M[(i, j)] = covariance(dataset[i], dataset[j])`. When `rounded` is set,
/// each cell is rounded to `digits` decimal places afterwards.
pub fn cov_mat<T, D>(dataset: &[D], rounded: bool, digits: i32) -> Result<Array2<f64>, StatsError>
where
    T: Numeric,
    D: AsRef<[T]> + Sync,
{
    cov_mat_with::<T, D>(dataset, &CovMatConfig::new(rounded, digits))
}

/// Covariance matrix driven by a [`CovMatConfig`].
///
/// All dimensions must share one length; the first offending dimension is
/// reported against the first dimension. An empty dataset yields a `0x0`
/// matrix. Only the upper triangle is computed and then mirrored, so the
/// result is exactly symmetric and its diagonal equals [`variance_with`].
pub fn cov_mat_with<T, D>(dataset: &[D], config: &CovMatConfig) -> Result<Array2<f64>, StatsError>
where
    T: Numeric,
    D: AsRef<[T]> + Sync,
{
    let k = dataset.len();
    check_dataset_shape::<T, D>(dataset, config.correction)?;
    debug!(
        "Computing {}x{} covariance matrix ({:?} correction, parallel={})",
        k, k, config.correction, config.parallel
    );

    let upper_row = |i: usize| -> Result<Vec<f64>, StatsError> {
        let x = dataset[i].as_ref();
        (i..k)
            .map(|j| covariance_with(x, dataset[j].as_ref(), config.correction))
            .collect()
    };

    let upper: Vec<Vec<f64>> = if config.parallel {
        (0..k).into_par_iter().map(upper_row).collect::<Result<_, _>>()?
    } else {
        (0..k).map(upper_row).collect::<Result<_, _>>()?
    };

    let matrix = Array2::from_fn((k, k), |i, j| {
        if i <= j {
            upper[i][j - i]
        } else {
            upper[j][i - j]
        }
    });

    if config.rounded {
        trace!("Rounding covariance matrix to {} digits", config.digits);
        Ok(matrix.mapv(|&v| round_to(v, config.digits)))
    } else {
        Ok(matrix)
    }
}

/// Round half to even at `digits` decimal places.
///
/// Non-negative `digits` round the exact decimal expansion of `value`, so a
/// stored 2.675 (really 2.67499...) goes to 2.67. Negative `digits` round to
/// tens, hundreds, and so on; a scale below the smallest `f64` gives a signed
/// zero. Non-finite values are returned unchanged.
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if digits >= 0 {
        return format!("{:.*}", digits as usize, value)
            .parse::<f64>()
            .unwrap_or(value);
    }
    let scale = 10f64.powi(digits);
    if scale == 0.0 {
        return 0.0f64.copysign(value);
    }
    (value * scale).round_ties_even() / scale
}

fn check_dataset_shape<T, D>(dataset: &[D], correction: Correction) -> Result<(), StatsError>
where
    T: Numeric,
    D: AsRef<[T]>,
{
    let Some(first) = dataset.first() else {
        return Ok(());
    };
    let n = first.as_ref().len();
    if let Some(other) = dataset.iter().map(|d| d.as_ref().len()).find(|&len| len != n) {
        return Err(StatsError::LengthMismatch {
            len_x: n,
            len_y: other,
        });
    }
    correction
        .divisor(n)
        .map(|_| ())
        .ok_or(StatsError::DivisionUndefined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_data() {
        let data = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];

        let centered = center(&data).unwrap();
        let expected = vec![vec![-1.0, 0.0, 1.0], vec![-1.0, 0.0, 1.0]];

        assert_eq!(centered, expected);
    }

    #[test]
    fn test_center_does_not_require_equal_lengths() {
        let data = vec![vec![1, 3], vec![2, 4, 6, 8]];
        let centered = center(&data).unwrap();
        assert_eq!(centered, vec![vec![-1.0, 1.0], vec![-3.0, -1.0, 1.0, 3.0]]);
    }

    #[test]
    fn test_center_empty_dimension() {
        let data: Vec<Vec<f64>> = vec![vec![1.0], vec![]];
        assert_eq!(center(&data), Err(StatsError::DivisionUndefined));
    }

    #[test]
    fn test_geom_mean() {
        assert!((geom_mean(&[1, 2, 4]).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(geom_mean(&[5.0]).unwrap(), 5.0);
        let empty: [f64; 0] = [];
        assert_eq!(geom_mean(&empty), Err(StatsError::DivisionUndefined));
    }

    #[test]
    fn test_variance() {
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(variance(&data).unwrap(), 4.0);
        let sample = variance_with(&data, Correction::Sample).unwrap();
        assert!((sample - 4.571428571428571).abs() < 1e-12);
    }

    #[test]
    fn test_variance_empty() {
        let data: Vec<f64> = vec![];
        assert_eq!(variance(&data), Err(StatsError::DivisionUndefined));
    }

    #[test]
    fn test_sample_variance_single_value() {
        assert_eq!(
            variance_with(&[3.0], Correction::Sample),
            Err(StatsError::DivisionUndefined)
        );
        assert_eq!(variance(&[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_covariance() {
        let x = vec![2.1, 2.5, 4.0, 3.6];
        let y = vec![8.0, 12.0, 14.0, 10.0];

        let result = covariance_with(&x, &y, Correction::Sample).unwrap();
        assert!((result - 1.53).abs() < 1e-2);
        let population = covariance(&x, &y).unwrap();
        assert!((population - result * 3.0 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_covariance_length_mismatch() {
        let x = vec![1.0, 2.0];
        let y = vec![1.0];
        assert_eq!(
            covariance(&x, &y),
            Err(StatsError::LengthMismatch { len_x: 2, len_y: 1 })
        );
    }

    #[test]
    fn test_covariance_mixed_element_types() {
        let x: [u8; 3] = [1, 2, 3];
        let y: [f32; 3] = [4.0, 5.0, 10.0];
        assert_eq!(covariance(&x, &y).unwrap(), 2.0);
    }

    #[test]
    fn test_round_to_half_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(125.0, -1), 120.0);
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(1.5, 400), 1.5);
        assert_eq!(round_to(0.125, 2), 0.12);
    }

    #[test]
    fn test_round_to_uses_stored_decimal_value() {
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(4.35, 1), 4.3);
        assert_eq!(round_to(-4.35, 1), -4.3);
    }

    #[test]
    fn test_round_to_below_smallest_scale() {
        assert_eq!(round_to(1.5, -400), 0.0);
        assert_eq!(round_to(5.0, -309), 0.0);
        assert!(round_to(-5.0, -400).is_sign_negative());
    }

    #[test]
    fn test_cov_mat_reports_first_mismatch() {
        let data = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], vec![1.0]];
        assert_eq!(
            cov_mat(&data, false, 2),
            Err(StatsError::LengthMismatch { len_x: 3, len_y: 1 })
        );
    }

    #[test]
    fn test_cov_mat_empty_dataset() {
        let data: Vec<Vec<f64>> = vec![];
        let m = cov_mat(&data, false, 2).unwrap();
        assert_eq!(m.shape(), (0, 0));
    }

    #[test]
    fn test_standardize_constant_dimension() {
        let data = vec![vec![1.0, 2.0, 3.0], vec![5.0, 5.0, 5.0]];
        assert_eq!(
            standardize(&data, Correction::Population),
            Err(StatsError::ZeroVariance { dimension: 1 })
        );
    }
}
