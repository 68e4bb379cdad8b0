use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::form::{normalize_date, parse_amount};
use crate::models::{month_label, parse_month, Transaction};
use crate::preferences::Theme;
use crate::repository::TransactionRepository;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut TransactionRepository),
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit RoxBudget", cmd_quit, r);
    register_command!("quit", "Quit RoxBudget", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Select month (e.g. :month 3 or :month mar)", cmd_month, r);
    register_command!("m", "Select month (e.g. :month 3 or :month mar)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Add transaction (form, or :add -25.90 Comida Lunch)",
        cmd_add,
        r
    );
    register_command!("edit", "Edit selected transaction", cmd_edit, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!("theme", "Toggle or set theme (e.g. :theme dark)", cmd_theme, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, repo: &mut TransactionRepository) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return;
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app, repo);
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _repo: &mut TransactionRepository) {
    app.running = false;
}

fn cmd_dashboard(_args: &str, app: &mut App, repo: &mut TransactionRepository) {
    app.screen = Screen::Dashboard;
    app.refresh(repo);
}

fn cmd_transactions(_args: &str, app: &mut App, repo: &mut TransactionRepository) {
    app.screen = Screen::Transactions;
    app.refresh(repo);
}

fn cmd_help(_args: &str, app: &mut App, _repo: &mut TransactionRepository) {
    app.show_help = true;
}

fn cmd_month(args: &str, app: &mut App, repo: &mut TransactionRepository) {
    if args.is_empty() {
        app.set_status(format!("Showing {}", app.month.name()));
        return;
    }
    match parse_month(args) {
        Some(month) => {
            app.set_month(month, repo);
            app.set_status(format!("Switched to {}", month.name()));
        }
        None => app.set_status(format!(
            "Invalid month: {args}. Use 1-12 or a name (e.g. mar)"
        )),
    }
}

fn cmd_next_month(_args: &str, app: &mut App, repo: &mut TransactionRepository) {
    let month = app.month.succ();
    app.set_month(month, repo);
    app.set_status(format!("Month: {}", month_label(month)));
}

fn cmd_prev_month(_args: &str, app: &mut App, repo: &mut TransactionRepository) {
    let month = app.month.pred();
    app.set_month(month, repo);
    app.set_status(format!("Month: {}", month_label(month)));
}

/// `:add` opens the form; `:add <amount> <category> [description...]` adds directly
/// with today's timestamp.
fn cmd_add(args: &str, app: &mut App, repo: &mut TransactionRepository) {
    if args.is_empty() {
        app.open_new_form();
        return;
    }

    let mut parts = args.split_whitespace();
    let amount_str = parts.next().unwrap_or("");
    let Some(category) = parts.next() else {
        app.set_status("Usage: :add <amount> <category> [description]");
        return;
    };
    let description = parts.collect::<Vec<_>>().join(" ");

    let amount = match parse_amount(amount_str) {
        Ok(a) => a,
        Err(e) => {
            app.set_status(format!("Error: {e}"));
            return;
        }
    };
    let date = match normalize_date("", chrono::Utc::now()) {
        Ok(d) => d,
        Err(e) => {
            app.set_status(format!("Error: {e}"));
            return;
        }
    };

    let txn = Transaction::new(description, amount, category.to_string(), date);
    let result = repo.append(txn);
    app.refresh(repo);
    match result {
        Ok(id) => {
            if let Some(pos) = repo.position(id) {
                app.transaction_index = pos;
            }
            app.set_status(format!(
                "Added {} to {category}",
                app.format_amount(amount)
            ));
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
}

fn cmd_edit(_args: &str, app: &mut App, repo: &mut TransactionRepository) {
    app.open_edit_form(repo);
}

fn cmd_delete(_args: &str, app: &mut App, _repo: &mut TransactionRepository) {
    app.request_delete();
}

fn cmd_theme(args: &str, app: &mut App, repo: &mut TransactionRepository) {
    let theme = if args.is_empty() {
        app.theme.toggled()
    } else if let Some(theme) = Theme::parse(args) {
        theme
    } else {
        app.set_status(format!("Unknown theme: {args}. Use dark or light"));
        return;
    };
    app.set_theme(theme, repo);
}

/// Sorted (name, description) pairs for the help overlay. Short aliases are
/// skipped and each description is listed once.
pub(crate) fn help_entries() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<(&'static str, &'static str)> = COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    entries.sort_unstable();
    let mut seen = std::collections::HashSet::new();
    entries.retain(|(_, desc)| seen.insert(*desc));
    entries
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
