//! Output formatting utilities
//!
//! Provides table, JSON and compact output for the parsed sku arguments.

use crate::cli::sku::{OutputFormat, SkuArguments};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, data, format)
}

/// Format output into any writer
pub fn write_output<W: Write, T: Serialize + TableDisplay>(
    out: &mut W,
    data: &T,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(out, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Sku groups selected on the command line
#[derive(Debug, Clone, Serialize)]
pub struct SkuReport {
    pub groups: Vec<String>,
    pub tags: Vec<String>,
    pub truncated: bool,
}

impl From<&SkuArguments> for SkuReport {
    fn from(args: &SkuArguments) -> Self {
        let mut groups = args.group_list();
        let mut truncated = false;

        if let Some(limit) = args.limit() {
            let limit = usize::try_from(limit).unwrap_or(0);
            truncated = groups.len() > limit;
            groups.truncate(limit);
        }

        Self {
            groups,
            tags: args.tags().to_vec(),
            truncated,
        }
    }
}

impl TableDisplay for SkuReport {
    fn to_table(&self) -> String {
        let mut output = format!("Groups: {}\n", self.groups.len());

        for group in &self.groups {
            output.push_str(&format!("  {}\n", group));
        }
        if self.truncated {
            output.push_str("  ...\n");
        }
        if !self.tags.is_empty() {
            output.push_str(&format!("Tags: {}\n", self.tags.join(", ")));
        }

        output.trim_end().to_string()
    }

    fn to_compact(&self) -> String {
        let groups = self.groups.join(",");
        if self.tags.is_empty() {
            groups
        } else {
            format!("{} [{}]", groups, self.tags.join(","))
        }
    }
}
