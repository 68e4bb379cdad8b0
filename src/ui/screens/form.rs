use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::form::FormField;
use crate::ui::app::App;

/// Entry form popup, drawn over the current screen while in form mode.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let form = &app.form;

    let title = if form.is_editing() {
        " Edit Transaction "
    } else {
        " New Transaction "
    };

    let mut lines = vec![Line::from("")];
    for field in FormField::all() {
        let focused = *field == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.dim_style()
        };
        let value = form.field(*field);
        let placeholder = match field {
            FormField::Amount if value.is_empty() => "negative for expenses",
            FormField::Date if value.is_empty() => "YYYY-MM-DD, empty for now",
            _ => "",
        };
        lines.push(Line::from(vec![
            Span::styled(if focused { " > " } else { "   " }, label_style),
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::styled(value.to_string(), palette.normal_style()),
            Span::styled(placeholder, palette.dim_style()),
        ]));
    }
    lines.push(Line::from(""));

    if let Some(err) = &app.form_error {
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(palette.red),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Tab next field | Shift-Tab previous | Enter save | Esc cancel",
        palette.dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height);
    let popup_width = 66.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(Span::styled(title, palette.title_style()))
            .style(Style::default().bg(palette.header_bg)),
    );
    f.render_widget(popup, popup_area);

    // Cursor after the focused field's text
    if let Some(row) = FormField::all().iter().position(|fl| *fl == form.focus) {
        let col = 3 + 12 + form.field(form.focus).chars().count() as u16;
        let cx = popup_area.x + 1 + col;
        let cy = popup_area.y + 2 + row as u16;
        if cx < popup_area.right() && cy < popup_area.bottom() {
            f.set_cursor_position((cx, cy));
        }
    }
}
