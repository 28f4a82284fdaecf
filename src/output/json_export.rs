//! JSON export functionality

use anyhow::Result;
use http_bench_core::BenchmarkResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    /// Write one result as pretty-printed JSON, replacing any existing file
    pub fn export(result: &BenchmarkResult, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), "Result exported");
        Ok(())
    }
}
