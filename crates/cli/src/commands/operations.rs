//! `toolgen operations` — convert a document of pre-written operations.

use super::{write_catalog, OutputArgs};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(path: PathBuf, output: OutputArgs) -> Result<()> {
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let functions = toolgen_convert::convert_operations(&source)
        .with_context(|| format!("failed to convert {}", path.display()))?;
    write_catalog(&functions, &output)
}
