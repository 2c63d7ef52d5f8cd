//! Describing the attributes a custom property declaration accepts.
//!
//! ```bash
//! org-props schema
//! org-props schema --format json
//! ```

use colored::Colorize;
use property_sync::{resource_schema, AttributeSchema, RESOURCE_TYPE};
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "schema_cmd_tests.rs"]
mod tests;

/// Prints the attribute schema in the requested format.
#[instrument]
pub fn execute(format: &str) -> Result<(), Error> {
    let output = format_schema(&resource_schema(), format)?;
    println!("{}", output);
    Ok(())
}

/// Formats the attribute schema as `json` or `pretty` text.
pub fn format_schema(schema: &[AttributeSchema], format: &str) -> Result<String, Error> {
    match format {
        "json" => serde_json::to_string_pretty(schema)
            .map_err(|e| Error::Config(format!("Failed to serialize schema: {}", e))),
        "pretty" => Ok(format_schema_pretty(schema)),
        other => Err(Error::InvalidArguments(format!(
            "unknown format {:?}, expected json or pretty",
            other
        ))),
    }
}

fn format_schema_pretty(schema: &[AttributeSchema]) -> String {
    let mut output = format!("\n{}\n\n", RESOURCE_TYPE.bold().bright_cyan());

    for attribute in schema {
        let mut flags = Vec::new();
        if attribute.required {
            flags.push("required".red().to_string());
        } else {
            flags.push("optional".dimmed().to_string());
        }
        if attribute.force_new {
            flags.push("forces replacement".yellow().to_string());
        }
        if let Some(default) = attribute.default {
            flags.push(format!("default: {}", default));
        }

        output.push_str(&format!(
            "  {} [{}]\n      {}\n",
            attribute.name.bold(),
            flags.join(", "),
            attribute.description
        ));
    }

    output
}
