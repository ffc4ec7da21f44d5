//! `toolgen introspect` — fetch a remote schema and convert it.

use super::{parse_header, write_catalog, write_output, ConvertArgs, OutputArgs};
use anyhow::Result;
use std::time::Duration;
use toolgen_introspect::{introspection_to_sdl, IntrospectionClient};

#[tracing::instrument(skip(headers, convert, output))]
pub async fn run(
    url: String,
    headers: Vec<String>,
    timeout: u64,
    sdl_only: bool,
    convert: ConvertArgs,
    output: OutputArgs,
) -> Result<()> {
    tracing::info!("introspecting endpoint");
    let mut client = IntrospectionClient::new().with_timeout(Duration::from_secs(timeout));
    for header in &headers {
        let (name, value) = parse_header(header)?;
        client = client.with_header(name, value);
    }

    if sdl_only {
        let response = client.execute(&url).await?;
        let sdl = introspection_to_sdl(&response.data.schema);
        return write_output(&sdl, output.output.as_deref());
    }

    let functions =
        toolgen_introspect::convert_with_client(&url, &client, convert.to_config()).await?;
    write_catalog(&functions, &output)
}
