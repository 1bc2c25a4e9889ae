use serde_json::Value;

use crate::data::path::resolve_path;
use crate::data::sort::{SortDirection, SortState};
use crate::data::value::display_text;

/// Formats a whole row into the cell text for one column.
pub type CellFormatter = fn(&Value) -> String;

/// One column of the grid: a dot-path key, a header label, whether the
/// header toggles sorting, and an optional custom formatter that overrides
/// the default path-resolved cell text.
#[derive(Debug, Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub format: Option<CellFormatter>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            format: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_format(mut self, format: CellFormatter) -> Self {
        self.format = Some(format);
        self
    }

    /// Cell text for a row: the custom formatter if present, otherwise the
    /// path-resolved value's display form. Missing paths render empty.
    pub fn cell_text(&self, row: &Value) -> String {
        if let Some(format) = self.format {
            return format(row);
        }
        resolve_path(row, &self.key)
            .map(display_text)
            .unwrap_or_default()
    }

    /// The sort indicator this column's header should show.
    pub fn sort_indicator(&self, sort: &SortState) -> SortIndicator {
        if !self.sortable {
            return SortIndicator::None;
        }
        if sort.is_active(&self.key) {
            match sort.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            }
        } else {
            SortIndicator::Sortable
        }
    }
}

/// Header sort marker, also the accessibility value for the column
/// (ascending / descending / none).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    /// Sortable but not the active sort column.
    Sortable,
    /// Not sortable at all.
    None,
}

impl SortIndicator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ascending => " ▲",
            Self::Descending => " ▼",
            Self::Sortable => " ↕",
            Self::None => "",
        }
    }

    /// Value for the header's sort attribute, mirroring aria-sort.
    pub fn sort_attr(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::Sortable | Self::None => "none",
        }
    }
}

/// Fields tried in order when deriving a descriptive label for a row's
/// selection checkbox.
const LABEL_FIELDS: [&str; 5] = ["name", "title", "description", "invoice_number", "client_name"];

/// Descriptive label for a row's selection checkbox, from the first
/// available descriptive field, with a generic fallback.
pub fn row_accessible_label(row: &Value) -> String {
    for field in LABEL_FIELDS {
        if let Some(value) = resolve_path(row, field) {
            let text = display_text(value);
            if !text.is_empty() {
                return format!("Select {text}");
            }
        }
    }
    String::from("Select row")
}
