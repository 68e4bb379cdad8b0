use anyhow::{Context, Result};
use chrono::{Datelike, Local, Month, Utc};
use std::path::Path;

use crate::analytics::{aggregate, in_month, progress};
use crate::config::Config;
use crate::form::{normalize_date, parse_amount};
use crate::models::{month_label, parse_month, Transaction};
use crate::preferences::Theme;
use crate::repository::TransactionRepository;
use crate::ui::util::{display_date, format_amount, progress_bar, truncate};

const VALUE_FLAGS: &[&str] = &["--date", "--amount", "--category", "--description", "--month"];

pub(crate) fn as_cli(
    args: &[String],
    repo: &mut TransactionRepository,
    config: &Config,
) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, repo, config),
        "list" | "ls" => cli_list(repo, config),
        "add" => cli_add(rest, repo, config),
        "edit" => cli_edit(rest, repo),
        "delete" | "rm" => cli_delete(rest, repo),
        "goals" => cli_goals(rest, repo, config),
        "theme" => cli_theme(rest, repo),
        "export" => cli_export(rest, repo),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("roxbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("RoxBudget - local personal finance tracker");
    println!();
    println!("Usage: roxbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  summary [month]                 Income, expenses, balance and goals");
    println!("  list                            List all transactions");
    println!("  add <amount> <category> [desc]  Record a transaction (negative = expense)");
    println!("    --date <YYYY-MM-DD>           Date (default: now)");
    println!("  edit <n>                        Change transaction #n");
    println!("    --amount, --category, --description, --date");
    println!("  delete <n>                      Delete transaction #n");
    println!("  goals [month]                   Spending goal progress");
    println!("  theme [dark|light]              Show or set the theme");
    println!("  export [path]                   Export transactions to CSV");
    println!("    --month <month>               Only one month (1-12 or name)");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither a `--flag` nor the value following one.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

/// Month from the first positional argument, or the current month.
fn month_arg(args: &[String]) -> Result<Month> {
    match positional(args).first() {
        Some(raw) => parse_month(raw)
            .with_context(|| format!("Invalid month: {raw} (use 1-12 or a name)")),
        None => current_month(),
    }
}

fn current_month() -> Result<Month> {
    Month::try_from(Local::now().month() as u8).context("Could not determine current month")
}

/// 1-based record number as shown by `list`, converted to an index.
fn record_index(raw: Option<&str>, repo: &TransactionRepository) -> Result<usize> {
    let raw = raw.context("Missing record number (see `roxbudget list`)")?;
    let n: usize = raw
        .parse()
        .with_context(|| format!("Invalid record number: {raw}"))?;
    match n.checked_sub(1) {
        Some(index) if index < repo.len() => Ok(index),
        _ => anyhow::bail!("No transaction #{n} (there are {})", repo.len()),
    }
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary(args: &[String], repo: &TransactionRepository, config: &Config) -> Result<()> {
    let month = month_arg(args)?;
    let summary = aggregate(repo.records(), month);
    let money = |v| format_amount(v, &config.currency);

    println!("RoxBudget - {}", month.name());
    println!("{}", "─".repeat(40));
    println!(
        "  Income:     {} ({} txns)",
        money(summary.income),
        summary.income_count
    );
    println!(
        "  Expenses:   {} ({} txns)",
        money(summary.expenses),
        summary.expense_count
    );
    println!("  Balance:    {}", money(summary.balance));

    if !summary.by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &summary.by_category {
            let share = summary.share(name) * rust_decimal::Decimal::ONE_HUNDRED;
            println!(
                "  {:<24} {:>14} {share:>5.1}%",
                truncate(name, 24),
                money(*amount)
            );
        }
    }

    println!();
    print_goals(&summary.by_category, config)
}

fn cli_goals(args: &[String], repo: &TransactionRepository, config: &Config) -> Result<()> {
    let month = month_arg(args)?;
    let summary = aggregate(repo.records(), month);
    println!("Goals - {}", month.name());
    print_goals(&summary.by_category, config)
}

fn print_goals(by_category: &[(String, rust_decimal::Decimal)], config: &Config) -> Result<()> {
    let goals = progress(by_category, &config.goals)?;
    if goals.is_empty() {
        println!("No goals configured");
        return Ok(());
    }
    println!("Goals:");
    for goal in &goals {
        let marker = if goal.is_exceeded() { " !" } else { "" };
        println!(
            "  {:<16} {} {:>3.0}%  {}/{}{marker}",
            truncate(&goal.category, 16),
            progress_bar(goal.ratio(), 20),
            goal.percent,
            format_amount(goal.spent, &config.currency),
            format_amount(goal.limit, &config.currency),
        );
    }
    Ok(())
}

fn cli_list(repo: &TransactionRepository, config: &Config) -> Result<()> {
    if repo.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:>4}  {:<12} {:<30} {:<16} {:>14}",
        "#", "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(80));
    for (i, txn) in repo.records().iter().enumerate() {
        println!(
            "{:>4}  {:<12} {:<30} {:<16} {:>14}",
            i + 1,
            display_date(&txn.date),
            truncate(&txn.description, 30),
            truncate(&txn.category, 16),
            format_amount(txn.amount, &config.currency),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], repo: &mut TransactionRepository, config: &Config) -> Result<()> {
    let pos = positional(args);
    if pos.len() < 2 {
        anyhow::bail!("Usage: roxbudget add <amount> <category> [description] [--date YYYY-MM-DD]");
    }

    let amount = parse_amount(pos[0])?;
    let category = pos[1].to_string();
    let description = pos[2..].join(" ");
    let date = normalize_date(flag_value(args, "--date").unwrap_or(""), Utc::now())?;

    let txn = Transaction::new(description, amount, category.clone(), date);
    repo.append(txn)?;
    println!(
        "Added {} to {category} (#{})",
        format_amount(amount, &config.currency),
        repo.len()
    );
    Ok(())
}

fn cli_edit(args: &[String], repo: &mut TransactionRepository) -> Result<()> {
    let index = record_index(positional(args).first().copied(), repo)?;
    let mut txn = repo.records()[index].clone();

    let mut changed = false;
    if let Some(raw) = flag_value(args, "--amount") {
        txn.set_amount(parse_amount(raw)?);
        changed = true;
    }
    if let Some(category) = flag_value(args, "--category") {
        txn.category = category.to_string();
        changed = true;
    }
    if let Some(description) = flag_value(args, "--description") {
        txn.description = description.to_string();
        changed = true;
    }
    if let Some(raw) = flag_value(args, "--date") {
        txn.date = normalize_date(raw, Utc::now())?;
        changed = true;
    }
    if !changed {
        anyhow::bail!(
            "Nothing to change. Use --amount, --category, --description or --date"
        );
    }

    repo.replace_at(index, txn)?;
    println!("Updated #{}", index + 1);
    Ok(())
}

fn cli_delete(args: &[String], repo: &mut TransactionRepository) -> Result<()> {
    let index = record_index(positional(args).first().copied(), repo)?;
    let removed = repo.remove_at(index)?;
    println!("Deleted #{}: {}", index + 1, removed.description);
    Ok(())
}

fn cli_theme(args: &[String], repo: &mut TransactionRepository) -> Result<()> {
    match args.first() {
        None => {
            println!("{}", Theme::load(repo.store()));
            Ok(())
        }
        Some(raw) => {
            let theme = Theme::parse(raw)
                .with_context(|| format!("Unknown theme: {raw} (use dark or light)"))?;
            theme.save(repo.store_mut())?;
            println!("Theme set to {theme}");
            Ok(())
        }
    }
}

fn cli_export(args: &[String], repo: &TransactionRepository) -> Result<()> {
    let month = flag_value(args, "--month")
        .map(|raw| {
            parse_month(raw).with_context(|| format!("Invalid month: {raw} (use 1-12 or a name)"))
        })
        .transpose()?;

    let output_path = positional(args)
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            match month {
                Some(m) => format!("{home}/roxbudget-export-{}.csv", month_label(m).to_lowercase()),
                None => format!("{home}/roxbudget-export.csv"),
            }
        });

    let records: Vec<&Transaction> = repo
        .records()
        .iter()
        .filter(|t| month.map_or(true, |m| in_month(t, m)))
        .collect();

    let count = write_csv(Path::new(&output_path), &records)?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

/// Write records as `date,description,category,amount` rows. Returns the row count.
pub(crate) fn write_csv(path: &Path, records: &[&Transaction]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(["date", "description", "category", "amount"])?;
    for txn in records {
        writer.write_record([
            txn.date.as_str(),
            txn.description.as_str(),
            txn.category.as_str(),
            &txn.amount.to_string(),
        ])?;
    }
    writer.flush()?;
    tracing::info!(count = records.len(), path = %path.display(), "exported csv");
    Ok(records.len())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
