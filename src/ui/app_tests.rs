#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::error::{Error, Result};
use crate::models::Goal;
use crate::store::{KeyValueStore, MemoryStore};

fn empty_app() -> (App, TransactionRepository) {
    let repo = TransactionRepository::load(Box::new(MemoryStore::new()));
    let mut app = App::new(&Config::default(), Theme::Light);
    app.set_month(Month::March, &repo);
    (app, repo)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.form.push_char(c);
    }
}

/// Accepts nothing, so every commit fails.
struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::PersistenceWrite("disk full".into()))
    }
}

#[test]
fn test_new_app_defaults() {
    let app = App::new(&Config::default(), Theme::Dark);
    assert!(app.running);
    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.currency, "R$");
    assert_eq!(app.goals.len(), 3);
    assert_eq!(app.theme, Theme::Dark);
}

#[test]
fn test_refresh_builds_goal_progress() {
    let (mut app, mut repo) = empty_app();
    assert_eq!(app.goal_progress.len(), 3);

    repo.append(Transaction::new(
        "Market".into(),
        dec!(-250),
        "Comida".into(),
        "2024-03-03".into(),
    ))
    .unwrap();
    app.refresh(&repo);

    let comida = app
        .goal_progress
        .iter()
        .find(|g| g.category == "Comida")
        .unwrap();
    assert_eq!(comida.percent, dec!(25));
    assert_eq!(app.summary.expenses, dec!(-250));
}

#[test]
fn test_refresh_reports_bad_goal() {
    let (mut app, repo) = empty_app();
    app.goals = vec![Goal::new("Lazer", dec!(0))];
    app.refresh(&repo);
    assert!(app.goal_progress.is_empty());
    assert!(app.status_message.starts_with("Error: Invalid goal"));
}

#[test]
fn test_form_submit_adds_record() {
    let (mut app, mut repo) = empty_app();
    app.open_new_form();
    type_text(&mut app, "Lunch");
    app.form.next_field();
    type_text(&mut app, "-25.90");
    app.form.next_field();
    type_text(&mut app, "Comida");
    app.form.next_field();
    type_text(&mut app, "2024-03-02");

    app.submit_form(&mut repo);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "Added: Lunch");
    assert_eq!(repo.len(), 1);
    assert_eq!(app.summary.expenses, dec!(-25.90));
    assert_eq!(app.summary.by_category, vec![("Comida".to_string(), dec!(25.90))]);
}

#[test]
fn test_form_validation_keeps_popup_open() {
    let (mut app, mut repo) = empty_app();
    app.open_new_form();
    type_text(&mut app, "Lunch");

    app.submit_form(&mut repo);

    assert_eq!(app.input_mode, InputMode::Form);
    assert_eq!(app.form_error.as_deref(), Some("Invalid amount: ''"));
    assert_eq!(app.form.description, "Lunch");
    assert!(repo.is_empty());
}

#[test]
fn test_form_edit_replaces_record() {
    let (mut app, mut repo) = empty_app();
    repo.append(Transaction::new(
        "Bus".into(),
        dec!(-4),
        "Transporte".into(),
        "2024-03-05".into(),
    ))
    .unwrap();
    app.refresh(&repo);

    app.open_edit_form(&repo);
    assert!(app.form.is_editing());
    app.form.focus = crate::form::FormField::Amount;
    app.form.pop_char();
    app.form.push_char('5');
    app.submit_form(&mut repo);

    assert_eq!(repo.len(), 1);
    assert_eq!(repo.records()[0].amount, dec!(-5));
    assert_eq!(app.status_message, "Updated: Bus");
    assert!(!app.form.is_editing());
}

#[test]
fn test_edit_without_selection() {
    let (mut app, repo) = empty_app();
    app.open_edit_form(&repo);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "No transaction selected");
}

#[test]
fn test_write_failure_is_not_fatal() {
    let mut repo = TransactionRepository::load(Box::new(FullStore));
    let mut app = App::new(&Config::default(), Theme::Light);
    app.open_new_form();
    type_text(&mut app, "Lunch");
    app.form.next_field();
    type_text(&mut app, "-10");

    app.submit_form(&mut repo);

    assert!(app.running);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.status_message.contains("disk full"));
    assert_eq!(app.transactions.len(), 1);
}

#[test]
fn test_close_form_discards_input() {
    let (mut app, _repo) = empty_app();
    app.open_new_form();
    type_text(&mut app, "Half typed");
    app.close_form();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.form.description.is_empty());
}
