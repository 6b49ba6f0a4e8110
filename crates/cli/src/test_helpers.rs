//! Test helpers

use std::path::{Path, PathBuf};

use crate::config::{CatalogArgs, RequestArgs};

pub(crate) fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(relative)
}

pub(crate) fn seasonal_catalog() -> CatalogArgs {
    CatalogArgs {
        catalog: fixture("catalogs/seasonal.yml"),
    }
}

pub(crate) fn request_args(request: &str, now: &str) -> Result<RequestArgs, jiff::Error> {
    Ok(RequestArgs {
        catalog: seasonal_catalog(),
        request: fixture(&format!("requests/{request}.yml")),
        now: Some(now.parse()?),
    })
}
