//! Output formatting for dispatch results.

use serde_json::json;
use tabula_core::{Chain, OutputFormat, RowSet, TxnReceipt, Value};

use crate::dispatch::DispatchResult;
use crate::error::SessionResult;

/// Format a value for a table cell.
pub fn format_value(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Json(j) => j.to_string(),
    }
}

/// Render `result` in the session's output shape.
///
/// Write and create receipts carry an explorer link when `chain` has one.
pub fn render(
    result: &DispatchResult,
    format: OutputFormat,
    chain: &Chain,
) -> SessionResult<String> {
    match result {
        DispatchResult::Rows(rows) => render_rows(rows, format),
        DispatchResult::Written(receipt) => match format {
            OutputFormat::Pretty => Ok(pretty_receipt(receipt, chain)),
            _ => Ok(serde_json::to_string(&receipt_json(receipt, chain)?)?),
        },
        DispatchResult::Created(created) => match format {
            OutputFormat::Pretty => Ok(format!(
                "Created table {}\n{}",
                created.name,
                pretty_receipt(&created.receipt, chain)
            )),
            _ => {
                let mut value = receipt_json(&created.receipt, chain)?;
                value["name"] = json!(created.name.to_string());
                Ok(serde_json::to_string(&value)?)
            }
        },
    }
}

fn render_rows(rows: &RowSet, format: OutputFormat) -> SessionResult<String> {
    match format {
        OutputFormat::Raw => Ok(serde_json::to_string(rows)?),
        OutputFormat::Objects => Ok(serde_json::to_string(&rows.to_objects())?),
        OutputFormat::Pretty => Ok(pretty_table(rows)),
    }
}

fn receipt_json(receipt: &TxnReceipt, chain: &Chain) -> SessionResult<serde_json::Value> {
    let mut value = serde_json::to_value(receipt)?;
    let link = chain.tx_link(&receipt.transaction_hash);
    if !link.is_empty() {
        value["link"] = json!(link);
    }
    Ok(value)
}

fn pretty_receipt(receipt: &TxnReceipt, chain: &Chain) -> String {
    let mut output = format!("Transaction {}", receipt.transaction_hash);
    if let Some(block) = receipt.block_number {
        output.push_str(&format!(" (block {})", block));
    }
    let link = chain.tx_link(&receipt.transaction_hash);
    if !link.is_empty() {
        output.push('\n');
        output.push_str(&link);
    }
    output
}

fn pretty_table(rows: &RowSet) -> String {
    let columns = rows.column_names();
    let cells: Vec<Vec<String>> = rows
        .rows
        .iter()
        .map(|row| row.iter().map(format_value).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();

    // Header
    output.push_str(&line(columns.clone()));
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    output.push('\n');

    // Rows
    for row in &cells {
        output.push_str(&line(row.iter().map(String::as_str).collect()));
        output.push('\n');
    }

    let count = rows.row_count();
    output.push_str(&format!(
        "\n({} {})",
        count,
        if count == 1 { "row" } else { "rows" }
    ));
    output
}

/// Usage hints for `.help`.
pub fn help_text() -> String {
    [
        "Commands:",
        "  .exit, .quit    Exit the console",
        "  .help           Show this help",
        "  .history        Show statements sent this session",
        "",
        "Statements end with ';' and may span several lines.",
        "Writes and creates ask for confirmation before they are sent.",
        "Tables can be referenced by alias: select * from [key.domain];",
    ]
    .join("\n")
}
