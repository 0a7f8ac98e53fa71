use std::fmt::Write;

use chrono::{NaiveDate, NaiveTime};
use colored::{ColoredString, Colorize};

use crate::features::nlp::{ParsedDateTime, ParsedTask, Priority};

/// Format a parsed task with a "Detected:" summary of its metadata.
pub fn format_task_pretty(task: &ParsedTask) -> String {
    let mut output = String::new();

    let title = if task.title.is_empty() {
        "(no title)".dimmed().to_string()
    } else {
        task.title.bold().to_string()
    };
    writeln!(output, "{} {title}", "Title:".cyan().bold()).ok();

    if !task.has_metadata() {
        writeln!(output, "  {}", "No metadata detected".dimmed()).ok();
        return output;
    }

    writeln!(output, "{}", "Detected:".dimmed()).ok();

    if let Some(date) = &task.due_date {
        writeln!(output, "  {} {}", "Due:".cyan(), display_date(date)).ok();
    }
    if let Some(time) = &task.due_time {
        writeln!(output, "  {} {}", "Time:".cyan(), display_time(time)).ok();
    }
    if let Some(project) = &task.project_name {
        writeln!(output, "  {} {}", "Project:".magenta(), format!("#{project}").magenta()).ok();
    }
    if !task.label_names.is_empty() {
        let labels: Vec<String> = task.label_names.iter().map(|l| format!("@{l}")).collect();
        writeln!(output, "  {} {}", "Labels:".green(), labels.join(" ").green()).ok();
    }
    if let Some(priority) = task.priority {
        writeln!(output, "  {} {}", "Priority:".yellow(), priority_badge(priority)).ok();
    }
    if let Some(notes) = &task.notes {
        writeln!(output, "  {} {notes}", "Notes:".blue()).ok();
    }

    output
}

/// Format the result of a combined date/time parse.
pub fn format_datetime_pretty(parsed: Option<&ParsedDateTime>) -> String {
    let Some(parsed) = parsed else {
        return "No date found".dimmed().to_string();
    };

    let mut output = String::new();
    if let Some(date) = &parsed.date {
        writeln!(output, "{} {}", "Date:".cyan(), display_date(date)).ok();
    }
    match &parsed.time {
        Some(time) => writeln!(output, "{} {}", "Time:".cyan(), display_time(time)).ok(),
        None => writeln!(output, "{} {}", "Time:".cyan(), "none".dimmed()).ok(),
    };
    output
}

/// Format a single resolved value, or a dimmed notice naming what was missing.
pub fn format_value_pretty(value: Option<&str>, what: &str) -> String {
    match value {
        Some(value) => value.to_string(),
        None => format!("No {what} found").dimmed().to_string(),
    }
}

fn priority_badge(priority: Priority) -> ColoredString {
    match priority {
        Priority::P1 => priority.label().red().bold(),
        Priority::P2 => priority.label().yellow().bold(),
        Priority::P3 => priority.label().blue(),
        Priority::P4 => priority.label().dimmed(),
    }
}

/// `2025-01-16` as `Jan 16, 2025`; unparseable input is shown as is.
fn display_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// `15:00` as `3:00 PM`; unparseable input is shown as is.
fn display_time(time: &str) -> String {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_or_else(|_| time.to_string(), |t| t.format("%-I:%M %p").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> ParsedTask {
        ParsedTask {
            title: "Fix auth bug".to_string(),
            due_date: Some("2025-01-16".to_string()),
            due_time: Some("15:00".to_string()),
            project_name: Some("backend".to_string()),
            label_names: vec!["urgent".to_string(), "bug".to_string()],
            priority: Some(Priority::P1),
            notes: Some("check the logs".to_string()),
        }
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-01-16"), "Jan 16, 2025");
        assert_eq!(display_date("2025-12-05"), "Dec 5, 2025");
        assert_eq!(display_date("garbage"), "garbage");
    }

    #[test]
    fn test_display_time() {
        assert_eq!(display_time("15:00"), "3:00 PM");
        assert_eq!(display_time("09:30"), "9:30 AM");
        assert_eq!(display_time("00:05"), "12:05 AM");
        assert_eq!(display_time("12:00"), "12:00 PM");
        assert_eq!(display_time("late"), "late");
    }

    #[test]
    fn test_format_task_pretty_lists_metadata() {
        let output = format_task_pretty(&sample_task());

        assert!(output.contains("Fix auth bug"));
        assert!(output.contains("Detected:"));
        assert!(output.contains("Jan 16, 2025"));
        assert!(output.contains("3:00 PM"));
        assert!(output.contains("#backend"));
        assert!(output.contains("@urgent @bug"));
        assert!(output.contains("P1"));
        assert!(output.contains("check the logs"));
    }

    #[test]
    fn test_format_task_pretty_without_metadata() {
        let task = ParsedTask {
            title: "Just a task".to_string(),
            ..ParsedTask::default()
        };
        let output = format_task_pretty(&task);

        assert!(output.contains("Just a task"));
        assert!(!output.contains("Detected:"));
        assert!(output.contains("No metadata detected"));
    }

    #[test]
    fn test_format_task_pretty_empty_title() {
        let output = format_task_pretty(&ParsedTask::default());
        assert!(output.contains("(no title)"));
    }

    #[test]
    fn test_format_datetime_pretty() {
        let parsed = ParsedDateTime {
            date: Some("2025-01-20".to_string()),
            time: Some("09:00".to_string()),
            raw: "next monday 9am".to_string(),
        };
        let output = format_datetime_pretty(Some(&parsed));
        assert!(output.contains("Jan 20, 2025"));
        assert!(output.contains("9:00 AM"));

        assert!(format_datetime_pretty(None).contains("No date found"));
    }

    #[test]
    fn test_format_value_pretty() {
        assert_eq!(format_value_pretty(Some("2025-01-16"), "date"), "2025-01-16");
        assert!(format_value_pretty(None, "time").contains("No time found"));
    }
}
