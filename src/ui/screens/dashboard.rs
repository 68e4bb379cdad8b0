use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::month_label;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // Summary cards
            Constraint::Percentage(45), // Chart + goals
            Constraint::Min(5),         // Records
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_spending_chart(f, middle[0], app);
    render_goals(f, middle[1], app);

    super::transactions::render_table(f, chunks[2], app, " Records ", true);
}

fn block<'a>(title: String, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(title, palette.title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let palette = app.palette();
    let summary = &app.summary;
    let month = month_label(app.month);

    render_card(
        f,
        cards[0],
        app,
        format!(" Income · {month} "),
        summary.income,
        palette.green,
        format!("{} txns", summary.income_count),
    );
    render_card(
        f,
        cards[1],
        app,
        format!(" Expenses · {month} "),
        summary.expenses,
        palette.red,
        format!("{} txns", summary.expense_count),
    );
    render_card(
        f,
        cards[2],
        app,
        format!(" Balance · {month} "),
        summary.balance,
        if summary.balance >= Decimal::ZERO {
            palette.green
        } else {
            palette.red
        },
        String::new(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: String,
    amount: Decimal,
    color: Color,
    subtitle: String,
) {
    let palette = app.palette();
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            app.format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, palette.dim_style())),
    ])
    .centered()
    .block(block(title, &palette));

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let title = format!(" Spending by Category · {} ", month_label(app.month));

    if app.summary.by_category.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses this month. Press a to add one",
            palette.dim_style(),
        )))
        .centered()
        .block(block(title, &palette));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .summary
        .by_category
        .iter()
        .take(12)
        .map(|(name, amt)| {
            let share = app.summary.share(name) * Decimal::ONE_HUNDRED;
            Bar::default()
                .value(amt.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(name, 10)))
                .text_value(format!("{share:.0}%"))
                .style(Style::default().fg(palette.accent))
                .value_style(
                    Style::default()
                        .fg(palette.header_bg)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block(title, &palette))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(palette.accent))
        .value_style(palette.normal_style());

    f.render_widget(chart, area);
}

fn render_goals(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let title = " Goals ".to_string();

    if app.goal_progress.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No goals configured",
            palette.dim_style(),
        )))
        .centered()
        .block(block(title, &palette));
        f.render_widget(msg, area);
        return;
    }

    let bar_width = (area.width as usize).saturating_sub(40).clamp(6, 20);
    let items: Vec<ListItem> = app
        .goal_progress
        .iter()
        .map(|goal| {
            let color = if goal.is_exceeded() {
                palette.red
            } else if goal.ratio() > 0.7 {
                palette.yellow
            } else {
                palette.green
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", truncate(&goal.category, 11)),
                    palette.normal_style(),
                ),
                Span::styled(progress_bar(goal.ratio(), bar_width), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>3.0}% ", goal.percent),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "{}/{}",
                        app.format_amount(goal.spent),
                        app.format_amount(goal.limit)
                    ),
                    palette.dim_style(),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block(title, &palette)), area);
}
