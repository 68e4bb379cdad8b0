use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::preferences::Theme;
use crate::repository::TransactionRepository;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(repo: &mut TransactionRepository, config: &Config) -> Result<()> {
    let theme = Theme::load(repo.store());
    let mut app = App::new(config, theme);
    app.refresh(repo);
    tracing::info!(records = repo.len(), %theme, "starting tui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, repo);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("tui exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    repo: &mut TransactionRepository,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let chrome = 6;
            let content_height = f.area().height.saturating_sub(chrome) as usize;
            let rows = match app.screen {
                Screen::Dashboard => content_height.saturating_sub(5) * 55 / 100,
                Screen::Transactions => content_height,
            };
            app.visible_rows = rows.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, repo),
                InputMode::Command => handle_command_input(key, app, repo),
                InputMode::Form => handle_form_input(key, app, repo),
                InputMode::Confirm => handle_confirm_input(key, app, repo),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, repo: &mut TransactionRepository) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows,
        ),
        KeyCode::Char('1') => switch_screen(app, repo, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, repo, Screen::Transactions),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, repo, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, repo, screens[prev]);
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app, repo),
        KeyCode::Char('L') => commands::handle_command("next-month", app, repo),
        KeyCode::Char('t') => commands::handle_command("theme", app, repo),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('a') if app.screen == Screen::Dashboard => app.open_new_form(),
        KeyCode::Char('e') if app.screen == Screen::Dashboard => app.open_edit_form(repo),
        KeyCode::Char('D') if app.screen == Screen::Dashboard => app.request_delete(),
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, repo: &mut TransactionRepository) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, repo);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, repo: &mut TransactionRepository) {
    match key.code {
        KeyCode::Enter => app.submit_form(repo),
        KeyCode::Esc => {
            app.close_form();
            app.set_status("Cancelled");
        }
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.push_char(c);
            app.form_error = None;
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, repo: &mut TransactionRepository) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(repo),
        _ => app.cancel_pending(),
    }
}

// ── Helpers ──────────────────────────────────────────────────

fn switch_screen(app: &mut App, repo: &TransactionRepository, screen: Screen) {
    app.screen = screen;
    app.refresh(repo);
}

fn handle_move_down(app: &mut App) {
    scroll_down(
        &mut app.transaction_index,
        &mut app.transaction_scroll,
        app.transactions.len(),
        app.visible_rows,
    );
}

fn handle_move_up(app: &mut App) {
    scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
}
