use chrono::{Datelike, Local, Month};
use rust_decimal::Decimal;

use crate::analytics::{aggregate, progress, GoalProgress, MonthlySummary};
use crate::config::Config;
use crate::form::EntryForm;
use crate::models::{Goal, RecordId, Transaction};
use crate::preferences::Theme;
use crate::repository::TransactionRepository;

use super::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: RecordId, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) month: Month,
    pub(crate) theme: Theme,
    pub(crate) currency: String,
    pub(crate) goals: Vec<Goal>,

    // Derived from the repository on every refresh
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) summary: MonthlySummary,
    pub(crate) goal_progress: Vec<GoalProgress>,

    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Entry form
    pub(crate) form: EntryForm,
    pub(crate) form_error: Option<String>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config, theme: Theme) -> Self {
        let current = Local::now().month() as u8;
        let month = Month::try_from(current).unwrap_or(Month::January);

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            month,
            theme,
            currency: config.currency.clone(),
            goals: config.goals.clone(),

            transactions: Vec::new(),
            summary: MonthlySummary::default(),
            goal_progress: Vec::new(),

            transaction_index: 0,
            transaction_scroll: 0,

            form: EntryForm::new(),
            form_error: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-derive everything shown on screen from the repository's current records.
    pub(crate) fn refresh(&mut self, repo: &TransactionRepository) {
        self.transactions = repo.records().to_vec();
        self.summary = aggregate(&self.transactions, self.month);
        match progress(&self.summary.by_category, &self.goals) {
            Ok(goals) => self.goal_progress = goals,
            Err(e) => {
                self.goal_progress.clear();
                self.set_status(format!("Error: {e}"));
            }
        }

        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    pub(crate) fn set_month(&mut self, month: Month, repo: &TransactionRepository) {
        self.month = month;
        self.refresh(repo);
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_id(&self) -> Option<RecordId> {
        self.selected_transaction().and_then(|t| t.id)
    }

    pub(crate) fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub(crate) fn format_amount(&self, val: Decimal) -> String {
        super::util::format_amount(val, &self.currency)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── Form ──────────────────────────────────────────────────────

    pub(crate) fn open_new_form(&mut self) {
        self.form.cancel();
        self.form_error = None;
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn open_edit_form(&mut self, repo: &TransactionRepository) {
        let Some(id) = self.selected_id() else {
            self.set_status("No transaction selected");
            return;
        };
        match self.form.edit(repo, id) {
            Ok(()) => {
                self.form_error = None;
                self.input_mode = InputMode::Form;
            }
            Err(e) => self.set_status(format!("Error: {e}")),
        }
    }

    pub(crate) fn close_form(&mut self) {
        self.form.cancel();
        self.form_error = None;
        self.input_mode = InputMode::Normal;
    }

    /// Submit the form. Validation errors keep the popup open; a failed write
    /// closes it with the error in the status bar since the record is kept in memory.
    pub(crate) fn submit_form(&mut self, repo: &mut TransactionRepository) {
        let editing = self.form.is_editing();
        let description = self.form.description.clone();
        match self.form.submit(repo, chrono::Utc::now()) {
            Ok(id) => {
                self.close_form();
                self.refresh(repo);
                if let Some(pos) = repo.position(id) {
                    self.transaction_index = pos;
                }
                let verb = if editing { "Updated" } else { "Added" };
                self.set_status(format!("{verb}: {description}"));
            }
            Err(e @ crate::error::Error::PersistenceWrite(_)) => {
                self.close_form();
                self.refresh(repo);
                self.set_status(format!("Error: {e}"));
            }
            Err(e) => self.form_error = Some(e.to_string()),
        }
    }

    // ── Delete ────────────────────────────────────────────────────

    pub(crate) fn request_delete(&mut self) {
        let Some(txn) = self.selected_transaction() else {
            self.set_status("No transaction selected");
            return;
        };
        let Some(id) = txn.id else {
            return;
        };
        let description = txn.description.clone();
        self.confirm_message = format!("Delete '{description}'? (y/n)");
        self.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, repo: &mut TransactionRepository) {
        self.input_mode = InputMode::Normal;
        let Some(action) = self.pending_action.take() else {
            return;
        };
        match action {
            PendingAction::DeleteTransaction { id, description } => {
                let result = repo.remove(id);
                self.refresh(repo);
                match result {
                    Ok(_) => self.set_status(format!("Deleted: {description}")),
                    Err(e) => self.set_status(format!("Error: {e}")),
                }
            }
        }
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Cancelled");
    }

    // ── Theme ─────────────────────────────────────────────────────

    pub(crate) fn set_theme(&mut self, theme: Theme, repo: &mut TransactionRepository) {
        self.theme = theme;
        match theme.save(repo.store_mut()) {
            Ok(()) => self.set_status(format!("Theme: {theme}")),
            Err(e) => self.set_status(format!("Error: {e}")),
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
