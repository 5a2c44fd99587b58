use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{LibraryError, Result};
use crate::models::{NewBook, SearchField};

/// Earliest publication year the add form accepts.
pub(crate) const MIN_YEAR: i32 = 1900;
/// Latest publication year the add form accepts.
pub(crate) const MAX_YEAR: i32 = 2025;

/// Parse and range-check a publication year typed by the user.
pub(crate) fn parse_year(raw: &str) -> Result<i32> {
    let year = raw.trim().parse::<i32>().map_err(|_| {
        LibraryError::Validation("Please enter a valid Publication Year (e.g., 2021)".to_string())
    })?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(LibraryError::Validation(format!(
            "Publication Year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    Ok(year)
}

/// Render `Label: value` with the highlight rules shared by every form.
fn field_line(label: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Terminal column for a cursor `chars` cells into a line. Values wider than
/// the terminal can address stick at `u16::MAX`.
fn column(chars: usize) -> u16 {
    u16::try_from(chars).unwrap_or(u16::MAX)
}

/// Fields of the add-book form in focus order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    const ORDER: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Publication Year",
            BookField::Genre => "Genre",
            BookField::Read => "Mark as Read?",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            BookField::Title => "<enter book title>",
            BookField::Author => "<enter author name>",
            BookField::Year => "<enter year (1900-2025)>",
            BookField::Genre => "<optional>",
            BookField::Read => "",
        }
    }

    /// Row offset of the field inside the form, used for cursor placement.
    pub(crate) fn row(self) -> u16 {
        self.index() as u16
    }
}

/// State of the add-book form.
#[derive(Default, Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl BookForm {
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % BookField::ORDER.len();
        self.active = BookField::ORDER[next];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ORDER.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = BookField::ORDER[previous];
    }

    fn value_mut(&mut self, field: BookField) -> Option<&mut String> {
        match field {
            BookField::Title => Some(&mut self.title),
            BookField::Author => Some(&mut self.author),
            BookField::Year => Some(&mut self.year),
            BookField::Genre => Some(&mut self.genre),
            BookField::Read => None,
        }
    }

    fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
            BookField::Genre => &self.genre,
            BookField::Read => "",
        }
    }

    /// Append a character to the active field. On the read checkbox a space
    /// toggles the flag instead.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.active == BookField::Read {
            if ch == ' ' {
                self.read = !self.read;
                return true;
            }
            return false;
        }
        match self.value_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.value_mut(self.active) {
            value.pop();
        }
    }

    /// Validate in the order the user sees the messages: year format, year
    /// range, then the required text fields.
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        let year = parse_year(&self.year)?;
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(LibraryError::Validation(
                "Please fill in Title and Author fields".to_string(),
            ));
        }
        let genre = self.genre.trim();
        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            year,
            genre: (!genre.is_empty()).then(|| genre.to_string()),
            read_status: self.read,
        })
    }

    /// Render the line for one field, including the read checkbox.
    pub(crate) fn build_line(&self, field: BookField, focused: bool) -> Line<'static> {
        let is_active = focused && self.active == field;
        if field == BookField::Read {
            let mark = if self.read { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::styled(mark.to_string(), style),
                Span::raw(format!(" {}", field.label())),
            ]);
        }
        field_line(
            field.label(),
            self.value(field),
            field.placeholder(),
            is_active,
        )
    }

    pub(crate) fn lines(&self, focused: bool) -> Vec<Line<'static>> {
        BookField::ORDER
            .iter()
            .map(|field| self.build_line(*field, focused))
            .collect()
    }

    /// Cursor column offset for the active text field, if any.
    pub(crate) fn cursor_offset(&self) -> Option<u16> {
        if self.active == BookField::Read {
            return None;
        }
        let prefix = self.active.label().chars().count() + 2;
        Some(column(prefix + self.value(self.active).chars().count()))
    }
}

/// State of the remove-book form.
#[derive(Default, Clone, Debug)]
pub(crate) struct RemoveForm {
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl RemoveForm {
    pub(crate) const LABEL: &'static str = "Title to remove";

    pub(crate) fn with_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.title.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.title.pop();
    }

    /// Return the title to delete. Matching is exact, so the typed value is
    /// passed through untouched; a title made only of whitespace is rejected.
    pub(crate) fn parse_title(&self) -> Result<String> {
        if self.title.trim().is_empty() {
            Err(LibraryError::Validation("Please enter a title".to_string()))
        } else {
            Ok(self.title.clone())
        }
    }

    pub(crate) fn build_line(&self, focused: bool) -> Line<'static> {
        field_line(Self::LABEL, &self.title, "<book title>", focused)
    }

    pub(crate) fn cursor_offset(&self) -> u16 {
        column(Self::LABEL.chars().count() + 2 + self.title.chars().count())
    }
}

/// State of the search form: which column to match and the typed pattern.
#[derive(Default, Clone, Debug)]
pub(crate) struct SearchForm {
    pub(crate) field: SearchField,
    pub(crate) query: String,
}

impl SearchForm {
    pub(crate) fn toggle_field(&mut self) {
        self.field = self.field.toggled();
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.query.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.query.pop();
    }

    fn prompt(&self) -> String {
        format!("Enter {}", self.field)
    }

    /// Radio-style selector line for the search column.
    pub(crate) fn selector_line(&self) -> Line<'static> {
        let option = |field: SearchField| {
            let selected = self.field == field;
            let mark = if selected { "(•)" } else { "( )" };
            let style = if selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Span::styled(format!("{mark} {field}"), style)
        };
        Line::from(vec![
            Span::raw("Search by: "),
            option(SearchField::Title),
            Span::raw("   "),
            option(SearchField::Author),
        ])
    }

    pub(crate) fn build_line(&self, focused: bool) -> Line<'static> {
        let placeholder = format!("<search by {}>", self.field.to_string().to_lowercase());
        field_line(&self.prompt(), &self.query, &placeholder, focused)
    }

    pub(crate) fn cursor_offset(&self) -> u16 {
        column(self.prompt().chars().count() + 2 + self.query.chars().count())
    }
}
