use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Lowest rating the form allows.
const RATING_MIN: i64 = 1;
/// Highest rating the form allows.
const RATING_MAX: i64 = 5;
/// Rating preselected when the form opens, matching the middle of the scale.
const RATING_DEFAULT: i64 = 3;

/// Form state for adding a book. Text fields accumulate raw input; the read
/// flag and rating are edited in place so they can never hold an invalid
/// value.
#[derive(Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read_status: bool,
    pub(crate) rating: i64,
    pub(crate) summary: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: String::new(),
            genre: String::new(),
            read_status: false,
            rating: RATING_DEFAULT,
            summary: String::new(),
            active: BookField::Title,
            error: None,
        }
    }
}

/// Enumerates the form fields to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Year,
    Genre,
    ReadStatus,
    Rating,
    Summary,
}

impl BookField {
    /// Fields in visual order, used both for focus cycling and rendering.
    pub(crate) const ALL: [BookField; 7] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::ReadStatus,
        BookField::Rating,
        BookField::Summary,
    ];

    /// Label shown before the field value.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Genre => "Genre",
            BookField::ReadStatus => "Read",
            BookField::Rating => "Rating",
            BookField::Summary => "Summary",
        }
    }

    /// Position of the field within [`BookField::ALL`].
    pub(crate) fn index(&self) -> usize {
        BookField::ALL
            .iter()
            .position(|field| field == self)
            .unwrap_or(0)
    }
}

impl BookForm {
    /// Cycle focus forward across the fields.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % BookField::ALL.len();
        self.active = BookField::ALL[next];
    }

    /// Cycle focus backward across the fields.
    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = BookField::ALL[previous];
    }

    /// Insert a character into the active field, validating allowed input.
    /// Returns whether the key was consumed.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Year => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.year.push(ch);
            }
            BookField::Genre => self.genre.push(ch),
            BookField::ReadStatus => {
                if ch != ' ' {
                    return false;
                }
                self.read_status = !self.read_status;
            }
            BookField::Rating => {
                let Some(value) = ch.to_digit(10) else {
                    return false;
                };
                let value = value as i64;
                if !(RATING_MIN..=RATING_MAX).contains(&value) {
                    return false;
                }
                self.rating = value;
            }
            BookField::Summary => self.summary.push(ch),
        }
        true
    }

    /// Remove the last character from the active field. Checkbox and rating
    /// fields have nothing to erase.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::ReadStatus | BookField::Rating => {}
            BookField::Summary => {
                self.summary.pop();
            }
        }
    }

    /// Nudge the rating while it has focus, clamped to the 1-5 scale.
    pub(crate) fn adjust_rating(&mut self, delta: i64) -> bool {
        if self.active != BookField::Rating {
            return false;
        }
        self.rating = (self.rating + delta).clamp(RATING_MIN, RATING_MAX);
        true
    }

    /// Validate the inputs and return a typed record ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Book title is required."));
        }

        let year_raw = self.year.trim();
        let year = if year_raw.is_empty() {
            0
        } else {
            year_raw
                .parse::<i64>()
                .context("Publication year must be a number.")?
        };

        Ok(Book {
            title: title.to_string(),
            author: self.author.trim().to_string(),
            year,
            genre: self.genre.trim().to_string(),
            read_status: self.read_status,
            rating: self.rating,
            summary: self.summary.trim().to_string(),
        })
    }

    /// Render a styled line for one field of the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let is_active = self.active == field;

        let (display, is_empty) = match field {
            BookField::Title => (placeholder_or(&self.title, "<required>"), self.title.is_empty()),
            BookField::Author => (placeholder_or(&self.author, "<optional>"), self.author.is_empty()),
            BookField::Year => (placeholder_or(&self.year, "<optional>"), self.year.is_empty()),
            BookField::Genre => (placeholder_or(&self.genre, "<optional>"), self.genre.is_empty()),
            BookField::ReadStatus => {
                let display = if self.read_status {
                    "[x] Read".to_string()
                } else {
                    "[ ] Unread".to_string()
                };
                (display, false)
            }
            BookField::Rating => {
                let filled = self.rating.clamp(0, RATING_MAX) as usize;
                let mut stars = "★".repeat(filled);
                stars.push_str(&"☆".repeat(RATING_MAX as usize - filled));
                (format!("{stars} ({}/5)", self.rating), false)
            }
            BookField::Summary => (placeholder_or(&self.summary, "<optional>"), self.summary.is_empty()),
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if is_empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested text field, used to place the cursor.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Year => self.year.chars().count(),
            BookField::Genre => self.genre.chars().count(),
            BookField::ReadStatus | BookField::Rating => 0,
            BookField::Summary => self.summary.chars().count(),
        }
    }

    /// Whether the active field takes free text and should show a cursor.
    pub(crate) fn active_takes_text(&self) -> bool {
        !matches!(self.active, BookField::ReadStatus | BookField::Rating)
    }
}

fn placeholder_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Snapshot of the book about to be removed, shown in the confirmation dialog.
#[derive(Clone)]
pub(crate) struct ConfirmBookRemove {
    pub(crate) title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_inputs_requires_title() {
        let form = BookForm::default();
        let err = form.parse_inputs().unwrap_err();
        assert!(err.to_string().contains("title is required"));
    }

    #[test]
    fn year_accepts_digits_only() {
        let mut form = BookForm::default();
        form.active = BookField::Year;
        assert!(!form.push_char('x'));
        assert!(form.push_char('1'));
        assert!(form.push_char('9'));
        assert_eq!(form.year, "19");
    }

    #[test]
    fn blank_year_defaults_to_zero() {
        let mut form = BookForm::default();
        form.title = "Dune".to_string();
        let book = form.parse_inputs().unwrap();
        assert_eq!(book.year, 0);
    }

    #[test]
    fn rating_stays_within_scale() {
        let mut form = BookForm::default();
        form.active = BookField::Rating;
        assert_eq!(form.rating, 3);
        form.adjust_rating(10);
        assert_eq!(form.rating, 5);
        form.adjust_rating(-10);
        assert_eq!(form.rating, 1);
        assert!(form.push_char('4'));
        assert_eq!(form.rating, 4);
        assert!(!form.push_char('9'));
        assert_eq!(form.rating, 4);
    }

    #[test]
    fn space_toggles_read_only_when_focused() {
        let mut form = BookForm::default();
        assert!(form.push_char(' ')); // title field: plain text input
        assert_eq!(form.title, " ");
        assert!(!form.read_status);

        form.active = BookField::ReadStatus;
        assert!(form.push_char(' '));
        assert!(form.read_status);
        assert!(!form.push_char('x'));
        assert!(form.read_status);
    }

    #[test]
    fn parse_trims_text_fields() {
        let mut form = BookForm {
            title: "  Dune  ".to_string(),
            author: " Frank Herbert ".to_string(),
            year: "1965".to_string(),
            genre: " SciFi ".to_string(),
            summary: "  sand  ".to_string(),
            ..BookForm::default()
        };
        form.read_status = true;
        let book = form.parse_inputs().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, 1965);
        assert_eq!(book.genre, "SciFi");
        assert!(book.read_status);
        assert_eq!(book.summary, "sand");
    }
}
