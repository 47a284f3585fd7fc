// ── Typed view descriptions ──
//
// The render layer's output. Front ends paint these; they never see
// wire records. Every type is plain data so a panel can be compared,
// cloned into a watch channel, or asserted on in tests.

use crate::error::FailureKind;
use crate::resource::Resource;
use crate::status::StatusClass;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    /// Present for status badges.
    pub class: Option<StatusClass>,
    /// Rendered bold (names, threat types).
    pub emphasis: bool,
}

impl CellView {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
            emphasis: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            emphasis: true,
            ..Self::plain(text)
        }
    }

    pub fn status(text: impl Into<String>, class: StatusClass) -> Self {
        Self {
            class: Some(class),
            ..Self::plain(text)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Record,
    /// A single message spanning every column.
    Placeholder,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Record identity, used for selection and deletion.
    pub key: Option<String>,
    pub kind: RowKind,
    pub cells: Vec<CellView>,
}

impl RowView {
    pub fn record(key: Option<String>, cells: Vec<CellView>) -> Self {
        Self {
            key,
            kind: RowKind::Record,
            cells,
        }
    }

    pub fn placeholder(message: impl Into<String>) -> Self {
        Self {
            key: None,
            kind: RowKind::Placeholder,
            cells: vec![CellView::plain(message)],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == RowKind::Placeholder
    }
}

/// A table with a fixed column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
}

impl TableView {
    /// Build a table, substituting the placeholder row when `rows` is empty.
    pub fn new(columns: &[&'static str], rows: Vec<RowView>, empty_message: &str) -> Self {
        let rows = if rows.is_empty() {
            vec![RowView::placeholder(empty_message)]
        } else {
            rows
        };
        Self {
            columns: columns.to_vec(),
            rows,
        }
    }

    /// Index of a column by case-insensitive header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Rows backed by a record (not the placeholder).
    pub fn records(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(|r| !r.is_placeholder())
    }
}

/// Card accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Success,
    Warning,
    Danger,
    Info,
}

/// A single counter card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

/// The IBI run-state banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    /// Shown only while active.
    pub active: bool,
    pub message: String,
}

/// A scoped error panel replacing one region's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    /// `Error Loading <Resource>`.
    pub title: String,
    pub message: String,
    /// The underlying error text.
    pub detail: String,
    pub kind: FailureKind,
    /// Resource re-loaded by the panel's retry action.
    pub retry: Resource,
}

/// Content of one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelView {
    /// Nothing fetched yet.
    #[default]
    Loading,
    Table(TableView),
    Cards(Vec<CardView>),
    Alert(AlertView),
    Error(ErrorView),
}

impl PanelView {
    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorView> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
