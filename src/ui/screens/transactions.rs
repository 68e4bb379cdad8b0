use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{display_date, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    render_table(f, area, app, " Transactions ", false);
}

/// Every record in stored order. The cursor row is highlighted only where records
/// can be edited.
pub(crate) fn render_table(f: &mut Frame, area: Rect, app: &App, title: &str, cursor: bool) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(
            format!("{}({}) ", title, app.transactions.len()),
            palette.title_style(),
        ));

    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions", palette.dim_style())),
            Line::from(Span::styled(
                "Press a on the dashboard or run :add to record one",
                palette.dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["#", "Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(palette.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                palette.income_style()
            } else if txn.is_expense() {
                palette.expense_style()
            } else {
                palette.dim_style()
            };

            let sign = if txn.is_income() { "+" } else { "" };
            let amount_str = format!("{sign}{}", app.format_amount(txn.amount));

            let style = if cursor && i == app.transaction_index {
                palette.selected_style()
            } else if i % 2 == 1 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(display_date(&txn.date)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
