//! Rendering of attendance verdicts for output.

use crate::commands::ExportFormat;
use crate::error::{CliError, Result};
use chrono::NaiveDateTime;
use matchday_analysis::{AttendanceVerdict, Response};
use matchday_core::constants::DATE_FORMAT;

const DETAIL_WIDTH: usize = 50;

/// Render `verdicts` in `format`; `generated_at` appears in the summary header.
pub fn render(
    format: ExportFormat,
    verdicts: &[AttendanceVerdict],
    generated_at: NaiveDateTime,
) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(to_csv(verdicts)),
        ExportFormat::Json => {
            serde_json::to_string_pretty(verdicts).map_err(|e| CliError::Parse(e.to_string()))
        }
        ExportFormat::Text => Ok(to_text(verdicts)),
        ExportFormat::Summary => Ok(to_summary(verdicts, generated_at)),
    }
}

fn to_csv(verdicts: &[AttendanceVerdict]) -> String {
    let mut out = String::from("name,response,message,timestamp,message_count\n");
    for v in verdicts {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_escape(&v.name),
            v.response,
            csv_escape(&v.message),
            v.timestamp.format(DATE_FORMAT),
            v.message_count
        ));
    }
    out
}

fn to_text(verdicts: &[AttendanceVerdict]) -> String {
    if verdicts.is_empty() {
        return "No attendance responses found.\n".to_string();
    }
    let mut out = String::new();
    for v in verdicts {
        out.push_str(&format!(
            "{:<24} {:<8} {}  {}\n",
            v.name,
            v.response.to_string(),
            v.timestamp.format(DATE_FORMAT),
            v.message
        ));
    }
    out
}

fn to_summary(verdicts: &[AttendanceVerdict], generated_at: NaiveDateTime) -> String {
    let total = verdicts.len();
    let yes = names_with(verdicts, Response::Yes);
    let maybe = names_with(verdicts, Response::Maybe);
    let no = names_with(verdicts, Response::No);
    let unknown = names_with(verdicts, Response::Unknown);

    let mut out = format!(
        "Matchday - Attendance Summary\nGenerated: {}\n\n",
        generated_at.format(DATE_FORMAT)
    );
    out.push_str("📊 SUMMARY STATISTICS\n");
    out.push_str(&format!("Total Responses: {}\n", total));
    out.push_str(&format!(
        "Coming (Yes): {} ({:.1}%)\n",
        yes.len(),
        percent(yes.len(), total)
    ));
    out.push_str(&format!(
        "Maybe: {} ({:.1}%)\n",
        maybe.len(),
        percent(maybe.len(), total)
    ));
    out.push_str(&format!(
        "Not Coming (No): {} ({:.1}%)\n",
        no.len(),
        percent(no.len(), total)
    ));

    push_group(&mut out, "✅ COMING", &yes);
    push_group(&mut out, "🤔 MAYBE", &maybe);
    push_group(&mut out, "❌ NOT COMING", &no);
    if !unknown.is_empty() {
        push_group(&mut out, "❔ UNDETERMINED", &unknown);
    }

    out.push_str("\n📝 DETAILED RESPONSES:\n");
    for v in verdicts {
        out.push_str(&format!(
            "{} ({}): {}\n",
            v.name,
            v.response,
            truncate(&v.message, DETAIL_WIDTH)
        ));
    }
    out
}

fn names_with(verdicts: &[AttendanceVerdict], response: Response) -> Vec<&str> {
    verdicts
        .iter()
        .filter(|v| v.response == response)
        .map(|v| v.name.as_str())
        .collect()
}

fn push_group(out: &mut String, title: &str, names: &[&str]) {
    out.push_str(&format!("\n{} ({} people):\n", title, names.len()));
    for name in names {
        out.push_str(&format!("- {}\n", name));
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width).collect();
        format!("{}...", head)
    }
}

fn csv_escape(v: &str) -> String {
    let escaped = v.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}
