use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme::Palette;
use crate::models::month_label;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let palette = app.palette();
    f.render_widget(Block::default().style(palette.base_style()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.input_mode == InputMode::Form {
        super::screens::form::render(f, chunks[1], app);
    }

    if app.show_help {
        render_help_overlay(f, f.area(), &palette);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), palette.dim_style()),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{s}"), palette.dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(palette.overlay)))
        .style(Style::default().bg(palette.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Transactions => super::screens::transactions::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => palette.accent,
        InputMode::Command | InputMode::Form => palette.green,
        InputMode::Confirm => palette.red,
    };
    let mode_style = Style::default()
        .fg(palette.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} | {} txns | {}",
        app.screen,
        month_label(app.month),
        app.transactions.len(),
        app.theme
    );

    let right = match (app.input_mode, app.screen) {
        (InputMode::Form, _) => " Tab field | Enter save | Esc cancel ",
        (_, Screen::Dashboard) => " a add | e edit | D delete | H/L month | ? help ",
        (_, Screen::Transactions) => " j/k scroll | H/L month | t theme | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, palette.status_bar_style()),
        Span::styled(" ".repeat(pad), palette.status_bar_style()),
        Span::styled(right, palette.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(palette.accent)),
                Span::styled(&app.command_input, palette.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(Span::styled(
                &app.confirm_message,
                Style::default().fg(palette.yellow),
            )),
            None,
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, a to add, ? for help",
                    palette.dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    palette.command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(palette.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn section(title: &str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(palette.yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect, palette: &Palette) {
    let keys = [
        "  j/k or Up/Down   Move cursor           1-2        Switch tabs",
        "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
        "  H/L              Prev/Next month       Ctrl-d/u   Page Down/Up",
        "  t                Toggle theme          Ctrl-q     Quit",
    ];
    let actions = [
        "  a (Dashboard)    Add transaction       :          Command mode",
        "  e (Dashboard)    Edit selected         D          Delete selected",
        "  Enter            Save form / Confirm   Esc        Cancel/Back",
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            " RoxBudget Help ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Navigation", palette),
    ];
    help_text.extend(
        keys.iter()
            .map(|k| Line::from(Span::styled(*k, palette.normal_style()))),
    );
    help_text.push(Line::from(""));
    help_text.push(section("Actions", palette));
    help_text.extend(
        actions
            .iter()
            .map(|k| Line::from(Span::styled(*k, palette.normal_style()))),
    );
    help_text.push(Line::from(""));
    help_text.push(section("Commands", palette));

    for (name, desc) in commands::help_entries() {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            palette.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        palette.dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.header_bg)),
    );
    f.render_widget(help, popup_area);
}
