//! Descriptor list: load and validate the JSON config, append one descriptor (add-log).

use anyhow::{Context, Result, bail};
use log::info;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::LogDescriptor;

/// Load descriptors from the JSON array at `path` and validate them.
pub fn load_descriptors(path: &Path) -> Result<Vec<LogDescriptor>> {
    let file = File::open(path)
        .with_context(|| format!("open configuration file '{}'", path.display()))?;
    let descriptors: Vec<LogDescriptor> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("decode configuration JSON '{}'", path.display()))?;
    validate_descriptors(&descriptors).context("invalid configuration")?;
    Ok(descriptors)
}

/// Non-empty list; every id, path, and type non-empty; ids unique.
pub fn validate_descriptors(descriptors: &[LogDescriptor]) -> Result<()> {
    if descriptors.is_empty() {
        bail!("no logs configured");
    }
    let mut seen = HashSet::with_capacity(descriptors.len());
    for (i, d) in descriptors.iter().enumerate() {
        if d.id.is_empty() {
            bail!("log at index {}: missing id", i);
        }
        if d.path.is_empty() {
            bail!("log '{}': missing path", d.id);
        }
        if d.log_type.is_empty() {
            bail!("log '{}': missing type", d.id);
        }
        if !seen.insert(d.id.as_str()) {
            bail!("duplicate id: '{}'", d.id);
        }
    }
    Ok(())
}

/// Write `descriptors` to `path` as pretty-printed JSON (2-space indent, trailing newline).
pub fn save_descriptors(descriptors: &[LogDescriptor], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create configuration file '{}'", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, descriptors).context("encode configuration JSON")?;
    writeln!(w)?;
    w.flush()
        .with_context(|| format!("write configuration file '{}'", path.display()))?;
    Ok(())
}

/// Append `descriptor` to the existing config at `path`. The file must exist and the id must be new.
pub fn append_descriptor(path: &Path, descriptor: LogDescriptor) -> Result<()> {
    if !fs::exists(path).unwrap_or(false) {
        bail!("configuration file '{}' does not exist", path.display());
    }
    let mut descriptors = load_descriptors(path).context("load configuration")?;
    if descriptors.iter().any(|d| d.id == descriptor.id) {
        bail!("a log with id '{}' already exists", descriptor.id);
    }
    descriptors.push(descriptor);
    validate_descriptors(&descriptors)?;
    save_descriptors(&descriptors, path).context("save configuration")?;
    info!("{} logs now in {}", descriptors.len(), path.display());
    Ok(())
}
