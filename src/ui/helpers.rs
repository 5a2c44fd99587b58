//! Stateless rendering helpers shared by the views in `app`.

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::screens::BookListScreen;

/// Column headers of the book tables. The id stays hidden.
const TABLE_HEADERS: [&str; 5] = ["Title", "Author", "Year", "Genre", "Read"];

/// Render books as a table. The selected row is only highlighted while the
/// table has keyboard focus.
///
/// Title, author and genre share the width proportionally; year and read
/// status get fixed narrow columns.
pub(crate) fn render_book_table(
    frame: &mut Frame,
    area: Rect,
    list: &BookListScreen,
    highlight: bool,
) {
    let header = Row::new(TABLE_HEADERS).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = list.books.iter().map(|book| {
        Row::new(vec![
            book.title.clone(),
            book.author.clone(),
            book.year.to_string(),
            book.genre_label().to_string(),
            book.read_label().to_string(),
        ])
    });

    let widths = [
        Constraint::Percentage(34),
        Constraint::Percentage(26),
        Constraint::Length(6),
        Constraint::Percentage(20),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if highlight && !list.is_empty() {
        state.select(Some(list.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// A bordered box holding one metric, styled like a dashboard tile.
///
/// `label` becomes the border title, `value` is shown in bold and `help` is a
/// dimmed caption underneath.
pub(crate) fn stat_card(label: &str, value: String, help: &str) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            help.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string()),
    )
}

/// Format a read percentage with one decimal place.
pub(crate) fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// Dimmed one-line message used for empty states.
pub(crate) fn placeholder(text: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Gray),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_uses_one_decimal() {
        assert_eq!(format_percentage(37.5), "37.5%");
        assert_eq!(format_percentage(100.0), "100.0%");
        assert_eq!(format_percentage(2.0 / 3.0 * 100.0), "66.7%");
    }
}
