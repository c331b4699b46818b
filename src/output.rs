//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No notifications.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single value in the selected format
pub fn print_value<T: Serialize>(label: &str, value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let text = serde_json::to_string(value).unwrap_or_default();
            println!("  {:<24} {}", format!("{}:", label), text.trim_matches('"'));
        }
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            map.insert(
                label.to_string(),
                serde_json::to_value(value).unwrap_or_default(),
            );
            println!("{}", serde_json::Value::Object(map));
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}
