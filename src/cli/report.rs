use anyhow::Result;

use super::Output;
use crate::parallel::RunReport;

pub(super) fn print_text(output: &Output, report: &RunReport) {
    let destination = report
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    output.success(&format!(
        "Reversed {} into {}",
        report.input.display(),
        destination
    ));

    for range in &report.ranges {
        output.table_row(
            &format!("worker {}", range.range.index),
            &format!(
                "bytes {}..{} ({} tokens, {}ms)",
                range.range.start, range.range.end, range.tokens, range.elapsed_ms
            ),
        );
    }

    output.key_value("Input bytes:", &report.input_bytes.to_string(), false);
    output.key_value("Threads:", &report.threads.to_string(), false);
    output.key_value(
        "Completed in:",
        &format!("{}ms", report.elapsed_ms),
        true,
    );
}

pub(super) fn print_json(report: &RunReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
