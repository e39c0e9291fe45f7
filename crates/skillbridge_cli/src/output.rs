//! Terminal output helpers. Styled text for humans, one JSON object per line for scripts.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for task and application tables
//! - `indicatif` for the loading spinner

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;
use skillbridge_client::{Notification, NotificationLevel};
use skillbridge_core::{Match, ScoreTier, Task, TaskApplication};

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    let msg = Msg {
        level,
        message,
        data,
    };
    let json = serde_json::to_string(&msg)
        .unwrap_or_else(|_| format!("{{\"level\":\"{level}\",\"message\":\"{message}\"}}"));
    println!("{json}");
}

// ── Messages ───────────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn error(text: &str) {
    if is_json() {
        let msg = Msg {
            level: "error",
            message: text,
            data: None,
        };
        let json = serde_json::to_string(&msg).unwrap_or_default();
        eprintln!("{json}");
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// Emit an arbitrary serializable value as structured output.
pub fn data<T: Serialize>(label: &str, value: &T) {
    if is_json() {
        let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print a toast raised by the view.
pub fn notification(note: &Notification) {
    match note.level {
        NotificationLevel::Success => success(&note.message),
        NotificationLevel::Info => dim(&note.message),
        NotificationLevel::Error => error(&note.message),
    }
}

// ── Tables ─────────────────────────────────────────────────────────

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn table_header(table: &mut Table, columns: &[&str]) {
    table.set_header(
        columns
            .iter()
            .map(|c| Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold)),
    );
}

fn skills_label(task: &Task) -> String {
    task.required_skills
        .iter()
        .map(|s| {
            if s.level.is_empty() {
                s.skill.clone()
            } else {
                format!("{} ({})", s.skill, s.level)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn dates_label(task: &Task) -> String {
    match (task.start_date, task.end_date) {
        (Some(start), Some(end)) => format!("{} → {}", start, end),
        (Some(start), None) => start.to_string(),
        (None, Some(end)) => format!("until {}", end),
        (None, None) => "-".to_string(),
    }
}

/// Print tasks as a table (JSON mode emits the list).
pub fn tasks(tasks: &[Task]) {
    if is_json() {
        let data = serde_json::json!({ "tasks": tasks });
        emit_json("list", "tasks", Some(&data));
        return;
    }
    if tasks.is_empty() {
        dim("No tasks to show.");
        return;
    }
    let mut t = table();
    table_header(&mut t, &["ID", "Title", "Location", "Dates", "Skills", "Cause", "Status"]);
    for task in tasks {
        t.add_row(vec![
            Cell::new(task.id),
            Cell::new(&task.title).fg(Color::Green),
            Cell::new(&task.location),
            Cell::new(dates_label(task)),
            Cell::new(skills_label(task)),
            Cell::new(task.cause.as_deref().unwrap_or("-")),
            Cell::new(task.status),
        ]);
    }
    println!("{t}");
}

/// Print one task as key-value lines.
pub fn task_detail(task: &Task) {
    if is_json() {
        data("task", task);
        return;
    }
    header(&format!("#{} {}", task.id, task.title));
    if !task.description.is_empty() {
        println!("  {}", task.description);
    }
    kv("Location", &task.location);
    kv("Dates", &dates_label(task));
    kv("Skills", &skills_label(task));
    kv("Cause", task.cause.as_deref().unwrap_or("-"));
    kv("Volunteers needed", &task.volunteers_needed.to_string());
    kv("Status", task.status.as_str());
}

fn tier_style<D>(tier: ScoreTier, value: D) -> StyledObject<D> {
    match tier {
        ScoreTier::High => style(value).green().bold(),
        ScoreTier::Medium => style(value).yellow().bold(),
        ScoreTier::Low => style(value).red(),
    }
}

#[derive(Serialize)]
struct MatchRow<'a> {
    task: &'a Task,
    score: u8,
    tier: ScoreTier,
    reasons: &'a [String],
}

/// Print matches with a tier-coloured score badge and their reasons.
pub fn matches(matches: &[&Match]) {
    if is_json() {
        let rows: Vec<_> = matches
            .iter()
            .map(|m| MatchRow {
                task: &m.task,
                score: m.score,
                tier: m.tier(),
                reasons: &m.reasons,
            })
            .collect();
        let data = serde_json::json!({ "matches": rows });
        emit_json("list", "matches", Some(&data));
        return;
    }
    if matches.is_empty() {
        dim("No matches yet.");
        return;
    }
    for m in matches {
        let tier = m.tier();
        println!(
            "{} {} {}",
            tier_style(tier, format!("{:>4}", m.badge())),
            style(&m.task.title).bold(),
            style(format!("#{} · {} · {}", m.task.id, m.task.location, tier)).dim()
        );
        for reason in &m.reasons {
            println!("       {} {}", style("•").dim(), reason);
        }
    }
}

/// Print applications received for a task.
pub fn applications(apps: &[TaskApplication]) {
    if is_json() {
        let data = serde_json::json!({ "applications": apps });
        emit_json("list", "applications", Some(&data));
        return;
    }
    if apps.is_empty() {
        dim("No applications yet.");
        return;
    }
    let mut t = table();
    table_header(&mut t, &["ID", "Volunteer", "Status", "Message"]);
    for app in apps {
        t.add_row(vec![
            Cell::new(app.id),
            Cell::new(app.volunteer_id),
            Cell::new(app.status),
            Cell::new(app.message.as_deref().unwrap_or("")),
        ]);
    }
    println!("{t}");
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner for async operations; hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

pub fn spinner_done(spinner: &ProgressBar) {
    spinner.finish_and_clear();
}
