use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::data::filter::MatchMode;
use crate::data::grid_view::GridView;
use crate::data::sort::SortState;
use crate::ui::column::Column;
use crate::ui::selection::{SelectAllState, SelectionSet};
use crate::ui::viewport::Viewport;

/// Invoked with the selected identifiers whenever the selection changes.
pub type SelectionCallback = Box<dyn FnMut(&[String])>;

/// Default identifier field on rows.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Owns every piece of grid state: the row snapshot, search term, sort
/// state, selection set, cursor, and scroll viewport. All mutation happens
/// through interaction handlers here; the widget only reads derived state.
///
/// The derived view is rebuilt lazily by `sync` and only when its inputs
/// changed, so unrelated events never re-run the filter/sort pipeline.
pub struct GridController {
    rows: Arc<Vec<Value>>,
    columns: Vec<Column>,
    search_fields: Vec<String>,
    id_field: String,
    selectable: bool,
    match_mode: MatchMode,
    loading: bool,

    search_input: Input,
    sort: SortState,
    selection: SelectionSet,
    view: GridView,
    cursor: usize,
    viewport: Viewport,

    on_selection_change: Option<SelectionCallback>,
}

impl GridController {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            rows: Arc::new(Vec::new()),
            columns,
            search_fields: Vec::new(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            selectable: true,
            match_mode: MatchMode::Contains,
            loading: false,
            search_input: Input::default(),
            sort: SortState::default(),
            selection: SelectionSet::new(),
            view: GridView::empty(),
            cursor: 0,
            viewport: Viewport::default(),
            on_selection_change: None,
        }
    }

    pub fn with_search_fields(mut self, fields: Vec<String>) -> Self {
        self.search_fields = fields;
        self
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn on_selection_change(mut self, callback: SelectionCallback) -> Self {
        self.on_selection_change = Some(callback);
        self
    }

    /// Swap in a new row snapshot. A new `Arc` is what signals "data
    /// changed"; the view rebuilds and the selection reconciles on the
    /// next `sync`.
    pub fn set_rows(&mut self, rows: Arc<Vec<Value>>) {
        self.rows = rows;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &Arc<Vec<Value>> {
        &self.rows
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn search_term(&self) -> &str {
        self.search_input.value()
    }

    pub fn search_input(&self) -> &Input {
        &self.search_input
    }

    /// Replace the search term programmatically.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_input = Input::new(term.to_string()).with_cursor(term.len());
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Bring the derived view up to date with the current inputs.
    ///
    /// Cheap when nothing changed: a signature comparison. When stale, the
    /// pipeline re-runs, the selection reconciles against the new view
    /// (notifying on shrink), and the cursor clamps back into range.
    pub fn sync(&mut self) -> &GridView {
        let signature = GridView::signature(
            &self.rows,
            self.search_input.value(),
            &self.search_fields,
            self.match_mode,
            &self.sort,
        );

        if self.view.is_stale(signature) {
            self.view = GridView::rebuild(
                &self.rows,
                self.search_input.value(),
                &self.search_fields,
                self.match_mode,
                &self.sort,
                &self.id_field,
                signature,
            );

            if self.selection.reconcile(self.view.keys()) {
                self.notify_selection();
            }
            self.cursor = self.cursor.min(self.view.len().saturating_sub(1));
        }

        &self.view
    }

    /// The current view without forcing a rebuild. Callers that just
    /// finished `sync` (or a key event) can read it immutably.
    pub fn view(&self) -> &GridView {
        &self.view
    }

    /// Activate sorting on the column at `index`, if it is sortable.
    pub fn sort_by_column(&mut self, index: usize) -> bool {
        let Some(column) = self.columns.get(index) else {
            return false;
        };
        if !column.sortable {
            return false;
        }
        let key = column.key.clone();
        self.sort.activate(&key);
        debug!(target: "grid", "Sort activated on {:?} ({:?})", key, self.sort.direction);
        self.sync();
        true
    }

    /// Toggle selection of the row under the cursor.
    pub fn toggle_cursor_selection(&mut self) {
        if !self.selectable {
            return;
        }
        self.sync();
        let Some(key) = self.view.key_at(self.cursor).map(str::to_string) else {
            return;
        };
        self.selection.toggle(&key);
        self.notify_selection();
    }

    /// Select-all semantics: when everything in the view is already
    /// selected, clear the ENTIRE selection; otherwise select every row in
    /// the current view (never the unfiltered dataset).
    pub fn toggle_select_all(&mut self) {
        if !self.selectable {
            return;
        }
        self.sync();
        match self.selection.select_all_state(self.view.keys()) {
            SelectAllState::Checked => self.selection.clear(),
            _ => self.selection.select_all(self.view.keys()),
        }
        self.notify_selection();
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.selection.select_all_state(self.view.keys())
    }

    /// Status line content: shown only while a search term is active,
    /// updated whenever the counts change so it can be announced.
    pub fn status_message(&self) -> Option<String> {
        if self.search_term().is_empty() {
            return None;
        }
        Some(format!(
            "Showing {} of {} results",
            self.view.len(),
            self.view.total()
        ))
    }

    fn notify_selection(&mut self) {
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(self.selection.keys());
        }
    }

    fn move_cursor_by(&mut self, delta: i64) {
        self.sync();
        let last = self.view.len().saturating_sub(1);
        self.cursor = self
            .cursor
            .saturating_add_signed(delta as isize)
            .min(last);
        self.scroll_cursor_into_view();
    }

    fn move_cursor_to(&mut self, position: usize) {
        self.sync();
        self.cursor = position.min(self.view.len().saturating_sub(1));
        self.scroll_cursor_into_view();
    }

    fn scroll_cursor_into_view(&mut self) {
        let len = self.view.len();
        if len > 0 {
            self.viewport.ensure_row_visible(self.cursor, len);
        }
    }

    /// Translate a key event into a state transition.
    ///
    /// Navigation, selection, and sort keys are handled here; anything else
    /// goes to the search input. Returns false only for events the grid has
    /// no use for (so the host can treat them as app-level keys).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.viewport.rows_per_page() as i64;

        match key.code {
            KeyCode::Up => self.move_cursor_by(-1),
            KeyCode::Down => self.move_cursor_by(1),
            KeyCode::PageUp => self.move_cursor_by(-page),
            KeyCode::PageDown => self.move_cursor_by(page),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::End => {
                self.sync();
                let last = self.view.len().saturating_sub(1);
                self.move_cursor_to(last);
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_select_all();
            }
            KeyCode::Char(' ') if key.modifiers.is_empty() => self.toggle_cursor_selection(),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' && key.modifiers.is_empty() => {
                let index = (c as usize) - ('1' as usize);
                if !self.sort_by_column(index) {
                    // Not a sortable column: the digit belongs to the search
                    self.search_input.handle_event(&Event::Key(key));
                    self.sync();
                }
            }
            KeyCode::Char(_)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.search_input.handle_event(&Event::Key(key));
                self.sync();
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Left | KeyCode::Right => {
                self.search_input.handle_event(&Event::Key(key));
                self.sync();
            }
            _ => return false,
        }
        true
    }
}
