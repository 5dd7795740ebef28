//! Plain-text frontend for the planner.

use std::io::{self, BufRead, Write};

use caltodo_chat::ChatPanel;
use caltodo_planner::grid::WEEKDAY_LABELS;
use caltodo_planner::{CalendarView, Frontend, Mark, Notice, NoticeKind, TodoListView};
use caltodo_services::{ChatRole, SummaryResponse};
use chrono::Datelike;

const CELL_WIDTH: usize = 6;

#[derive(Debug, Default)]
pub struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes" | "예"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "OK",
            NoticeKind::Error => "ERROR",
            NoticeKind::Info => "INFO",
        };
        println!("[{}] {}: {}", tag, notice.title, notice.message);
    }

    fn present(&self, calendar: &CalendarView, todos: &TodoListView) {
        println!();
        println!("{}", format_calendar(calendar));
        println!("{}", format_todos(todos));
    }
}

pub fn format_calendar(calendar: &CalendarView) -> String {
    let mut out = format!("{:^width$}\n", calendar.title, width = CELL_WIDTH * 7);
    out.push_str(&format!("{:^width$}\n", calendar.meta, width = CELL_WIDTH * 7));
    for label in WEEKDAY_LABELS {
        out.push_str(&format!("{:^width$}", label, width = CELL_WIDTH));
    }
    out.push('\n');
    for week in calendar.weeks() {
        for cell in week {
            let day = if cell.in_month {
                format!("{:>2}", cell.date.day())
            } else {
                "  ".to_string()
            };
            let marks: String = cell
                .marks
                .iter()
                .map(|m| match m {
                    Mark::Open => '•',
                    Mark::Done => '✓',
                })
                .collect();
            let (open, close) = if cell.is_selected {
                ('[', ']')
            } else if cell.is_today {
                ('(', ')')
            } else {
                (' ', ' ')
            };
            out.push_str(&format!("{}{}{}{:<2}", open, day, close, marks));
        }
        out.push('\n');
    }
    out
}

pub fn format_todos(todos: &TodoListView) -> String {
    let mut out = format!("{}  {}\n", todos.title, todos.stats);
    if todos.is_empty() {
        out.push_str("  (할 일이 없습니다)\n");
    }
    for row in &todos.rows {
        let check = if row.done { "[x]" } else { "[ ]" };
        match &row.editing {
            Some(buffer) => out.push_str(&format!("  {} #{} ✎ {}\n", check, row.id, buffer)),
            None => out.push_str(&format!("  {} #{} {}\n", check, row.id, row.text)),
        }
    }
    out
}

pub fn print_chat(panel: &ChatPanel) {
    println!("--- chat ---");
    for bubble in panel.bubbles() {
        let who = match bubble.role {
            ChatRole::User => "나",
            ChatRole::Assistant => "도우미",
        };
        println!("[{}] {}: {}", bubble.time, who, bubble.text);
    }
    println!("------------");
}

pub fn print_summary(summary: &SummaryResponse) {
    for line in [
        summary.title.as_deref(),
        summary.one_line.as_deref(),
        summary.bullets.as_deref(),
        summary.risk_note.as_deref(),
        summary.free_text.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        println!("{}", line);
    }
}
