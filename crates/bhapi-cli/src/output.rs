use std::io::Write;

use serde::Serialize;

use crate::commands::CommandResult;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    data: &'a serde_json::Value,
    meta: Meta<'a>,
}

#[derive(Debug, Serialize)]
struct Meta<'a> {
    command: &'a str,
    latency_ms: u64,
}

/// Writes the command result as one JSON document on stdout.
pub fn render(result: &CommandResult, pretty: bool) -> Result<(), CliError> {
    let envelope = Envelope {
        data: &result.data,
        meta: Meta {
            command: result.command,
            latency_ms: result.latency_ms,
        },
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
