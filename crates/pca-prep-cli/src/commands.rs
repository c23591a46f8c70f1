//! Text renderings of each statistic for the command line.
use anyhow::{Context, Result};

use pca_prep::validation::{dataset_from_json, dimension_from_json};
use pca_prep::{stats, Correction, CovMatConfig};

/// The worked examples printed by `pca-prep demo`.
pub fn demo() -> Result<String> {
    let points = [1, 2, 3];
    let two_d_points = [[1, 2, 3], [1, 2, 3]];
    let dataset = [[1, 2, 3], [4, 5, 10], [20, 1, 3]];

    let mut out = String::new();
    out.push_str(&format!(
        "variance({:?}) = {}\n",
        points,
        stats::variance(&points)?
    ));
    out.push_str(&format!(
        "center({:?}) = {}\n",
        two_d_points,
        serde_json::to_string(&stats::center(&two_d_points)?)?
    ));
    out.push_str(&format!(
        "covariance({:?}, {:?}) = {}\n",
        dataset[0],
        dataset[1],
        stats::covariance(&dataset[0], &dataset[1])?
    ));
    out.push_str(&format!(
        "cov_mat({:?}, rounded=true, digits=2) =\n{}\n",
        dataset,
        stats::cov_mat(&dataset, true, 2)?
    ));
    Ok(out)
}

pub fn center(data: &str) -> Result<String> {
    let dataset = dataset_from_json(data).context("Invalid --data")?;
    let centered = stats::center(&dataset)?;
    Ok(serde_json::to_string(&centered)?)
}

pub fn variance(data: &str, correction: Correction) -> Result<String> {
    let dimension = dimension_from_json(data).context("Invalid --data")?;
    Ok(stats::variance_with(&dimension, correction)?.to_string())
}

pub fn covariance(x: &str, y: &str, correction: Correction) -> Result<String> {
    let x = dimension_from_json(x).context("Invalid --x")?;
    let y = dimension_from_json(y).context("Invalid --y")?;
    Ok(stats::covariance_with(&x, &y, correction)?.to_string())
}

pub fn cov_mat(data: &str, config: &CovMatConfig) -> Result<String> {
    let dataset = dataset_from_json(data).context("Invalid --data")?;
    log::info!(
        "Computing covariance matrix for {} dimensions",
        dataset.len()
    );
    Ok(stats::cov_mat_with(&dataset, config)?.to_string())
}
