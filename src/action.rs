use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use crate::pipeline::Outcome;
use crate::{Result, Stage};

pub const OUTPUT_NAME: &str = "payload";

/// Escapes the data part of a workflow command.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a property value of a workflow command.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Renders a value the way the runner expects outputs: strings verbatim, everything else
/// as JSON, and null as nothing.
pub fn command_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Publishes a step output, either to the output file or as a `set-output` command on `out`.
pub fn set_output(
    name: &str,
    value: &str,
    output_file: Option<&Path>,
    out: &mut impl Write,
) -> io::Result<()> {
    let Some(path) = output_file else {
        return writeln!(
            out,
            "::set-output name={}::{}",
            escape_property(name),
            escape_data(value)
        );
    };

    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output {name} contains the delimiter {delimiter}"),
        ));
    }

    tracing::debug!("writing output {name} to {}", path.display());
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Marks the step as failed.
pub fn set_failed(message: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "::error::{}", escape_data(message))
}

/// Message reported when a run fails at `stage`.
pub fn failure_message(stage: Stage, cause: impl std::fmt::Display) -> String {
    format!("{stage} failed: {cause}")
}

/// Reports the result of a run to the runner, returning whether the run succeeded.
///
/// Outputs go to the file named by `GITHUB_OUTPUT` when there is one, otherwise they are
/// printed as workflow commands. Failures are printed as `::error::` annotations.
pub fn report(
    result: Result<Outcome>,
    output_file: Option<&Path>,
    out: &mut impl Write,
) -> io::Result<bool> {
    let message = match result {
        Ok(Outcome::Succeeded(value)) => {
            set_output(OUTPUT_NAME, &command_value(&value), output_file, out)?;
            return Ok(true);
        }
        Ok(Outcome::NoPayload { issue_id }) => failure_message(
            Stage::Extracting,
            format!("There was no valid payload found in the issue: {issue_id}."),
        ),
        Err(err) => failure_message(err.stage(), err),
    };
    set_failed(&message, out)?;
    Ok(false)
}
