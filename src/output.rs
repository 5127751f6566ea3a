use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::client::DeliveryResult;

/// Global output settings
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(item: &T) {
    println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
}

/// Print a message (skipped in quiet mode, or prints simple object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

#[derive(Tabled)]
struct DeliveryRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Response")]
    body: String,
}

impl From<&DeliveryResult> for DeliveryRow {
    fn from(result: &DeliveryResult) -> Self {
        Self {
            status: status_colored(result.status_code),
            reason: result.status_message.clone(),
            body: truncate(&result.body, 60),
        }
    }
}

/// Print a delivery result as a table or JSON depending on output mode
pub fn print_delivery(result: &DeliveryResult) {
    if is_json_output() {
        print_json(result);
    } else if !is_quiet() {
        let table = Table::new([DeliveryRow::from(result)])
            .with(Style::rounded())
            .to_string();
        println!("{table}");
    }
}

/// Format an HTTP status with color by class
pub fn status_colored(status: u16) -> String {
    let label = status.to_string();
    match status {
        200..=299 => label.green().to_string(),
        400..=499 => label.red().bold().to_string(),
        _ => label.yellow().to_string(),
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
