//! `toolgen schema` — convert an SDL file into a function catalog.

use super::{write_catalog, ConvertArgs, OutputArgs};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(path: PathBuf, convert: ConvertArgs, output: OutputArgs) -> Result<()> {
    let sdl = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let functions = toolgen_convert::convert_schema(&sdl, convert.to_config())
        .with_context(|| format!("failed to convert {}", path.display()))?;
    write_catalog(&functions, &output)
}
