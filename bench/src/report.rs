use std::{fs, path::Path};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::{Config, measure::Measurement};

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    generated_at: DateTime<Utc>,
    config: &'a Config,
    measurements: &'a [Measurement],
}

impl<'a> Report<'a> {
    pub fn new(config: &'a Config, measurements: &'a [Measurement]) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            measurements,
        }
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;

        info!(path = %path.display(), "wrote report");

        Ok(())
    }
}
