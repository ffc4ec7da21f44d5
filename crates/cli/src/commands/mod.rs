//! Subcommand implementations.

pub mod introspect;
pub mod operations;
pub mod schema;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use toolgen_catalog::ApiFunction;
use toolgen_convert::{ignore_prefix_filter, ConverterConfig, DEFAULT_MAX_DEPTH};

/// Conversion options shared by the schema-driven subcommands.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Maximum nesting depth of generated selection sets
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Skip root fields whose name starts with a prefix (case-insensitive,
    /// can be specified multiple times)
    #[arg(long = "ignore-prefix", value_name = "PREFIX")]
    pub ignore_prefixes: Vec<String>,

    /// Log pruned traversal branches at info level
    #[arg(long)]
    pub verbose: bool,
}

impl ConvertArgs {
    pub fn to_config(&self) -> ConverterConfig {
        let mut config = ConverterConfig::new()
            .with_max_depth(self.max_depth)
            .with_verbose(self.verbose);
        if !self.ignore_prefixes.is_empty() {
            config = config.with_filter(ignore_prefix_filter(self.ignore_prefixes.clone()));
        }
        config
    }
}

/// Output options shared by all subcommands.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output file path (writes to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Serializes the catalog and writes it to the selected destination.
pub fn write_catalog(functions: &[ApiFunction], output: &OutputArgs) -> Result<()> {
    tracing::debug!(functions = functions.len(), "writing catalog");
    let json = if output.pretty {
        serde_json::to_string_pretty(functions)?
    } else {
        serde_json::to_string(functions)?
    };
    write_output(&json, output.output.as_deref())?;
    eprintln!(
        "{} {} function(s)",
        "Converted".green().bold(),
        functions.len()
    );
    Ok(())
}

pub fn write_output(text: &str, output: Option<&std::path::Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

/// Parses a header string in "Name: Value" format.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("header name cannot be empty");
    }
    Ok((name, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Authorization: Bearer abc").unwrap(),
            ("Authorization".to_string(), "Bearer abc".to_string())
        );
        assert_eq!(
            parse_header("X-Key:value:with:colons").unwrap(),
            ("X-Key".to_string(), "value:with:colons".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_convert_args_build_filtering_config() {
        let args = ConvertArgs {
            max_depth: 2,
            ignore_prefixes: vec!["_".to_string()],
            verbose: false,
        };
        let config = args.to_config();
        assert_eq!(config.max_depth(), 2);
        assert!(!config.allows(toolgen_convert::OperationKind::Query, "_service"));
        assert!(config.allows(toolgen_convert::OperationKind::Query, "widgets"));
    }
}
