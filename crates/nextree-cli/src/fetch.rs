//! Dataset fetch with a trivial on-disk cache.
//!
//! If the cache file exists it wins unconditionally: no freshness check,
//! no TTL, no re-validation, no network call. Otherwise a single blocking
//! GET fetches the dataset, which is cached verbatim before parsing. No
//! retries anywhere; failures propagate with context and end the run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nextree_ingest::Dataset;

/// Default dataset endpoint (the Nextstrain charon API for `ncov/global`).
pub const DEFAULT_DATASET_URL: &str = "https://nextstrain.org/charon/getDataset?prefix=/ncov/global";

pub fn load_dataset(cache_path: &Path, url: &str) -> Result<Dataset> {
    let raw = if cache_path.exists() {
        tracing::info!(cache = %cache_path.display(), "using cached dataset");
        fs::read_to_string(cache_path)
            .with_context(|| format!("reading cached dataset `{}`", cache_path.display()))?
    } else {
        tracing::info!(url, "fetching dataset");
        let body = reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .with_context(|| format!("fetching dataset from `{url}`"))?;
        fs::write(cache_path, &body)
            .with_context(|| format!("caching dataset to `{}`", cache_path.display()))?;
        body
    };
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing dataset `{}`", cache_path.display()))
}
