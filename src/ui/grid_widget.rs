use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

use crate::ui::column::row_accessible_label;
use crate::ui::controller::GridController;
use crate::ui::selection::SelectAllState;

/// Width of the selection checkbox column, including trailing space.
const CHECKBOX_WIDTH: u16 = 4;
/// Minimum width a data column is given.
const MIN_COL_WIDTH: u16 = 3;

/// The grid's render surface: search bar, result-count status line,
/// bulk-action bar, header with sort indicators, and the body, which is
/// either every view row or the virtual window, depending on the controller.
///
/// All state lives in the `GridController`; this widget is presentation
/// options only and is rebuilt every frame, in the stateful-widget idiom.
pub struct DataGrid<'a> {
    block: Option<Block<'a>>,
    search_placeholder: &'a str,
    empty_state: Option<&'a str>,
    actions: Option<&'a str>,
    header_style: Style,
    row_style: Style,
    selected_style: Style,
    cursor_style: Style,
}

impl<'a> Default for DataGrid<'a> {
    fn default() -> Self {
        Self {
            block: None,
            search_placeholder: "Search...",
            empty_state: None,
            actions: None,
            header_style: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            row_style: Style::default(),
            selected_style: Style::default().fg(Color::Cyan),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl<'a> DataGrid<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn search_placeholder(mut self, placeholder: &'a str) -> Self {
        self.search_placeholder = placeholder;
        self
    }

    /// Text shown when the view is empty; a default message otherwise.
    pub fn empty_state(mut self, text: &'a str) -> Self {
        self.empty_state = Some(text);
        self
    }

    /// Bulk-action text; the bar only appears when rows are selected.
    pub fn actions(mut self, text: &'a str) -> Self {
        self.actions = Some(text);
        self
    }

    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    pub fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    pub fn cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    fn render_search_bar(&self, area: Rect, buf: &mut Buffer, state: &GridController) {
        let term = state.search_term();
        let line = if term.is_empty() {
            Line::from(vec![
                Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(self.search_placeholder, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(term),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }

    fn render_bulk_bar(&self, area: Rect, buf: &mut Buffer, state: &GridController) {
        let actions = self.actions.unwrap_or_default();
        let line = Line::from(vec![
            Span::styled(
                format!("{} selected", state.selection().len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(actions),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }

    fn column_widths(&self, state: &GridController, width: u16) -> Vec<u16> {
        let count = state.columns().len() as u16;
        if count == 0 {
            return Vec::new();
        }
        let each = (width / count).max(MIN_COL_WIDTH);
        vec![each; count as usize]
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, state: &GridController) {
        let mut x = area.x;

        if state.is_selectable() {
            let mark = match state.select_all_state() {
                SelectAllState::Checked => "[x]",
                SelectAllState::Indeterminate => "[-]",
                SelectAllState::Unchecked => "[ ]",
            };
            buf.set_string(x, area.y, mark, self.header_style);
            x += CHECKBOX_WIDTH;
        }

        let widths = self.column_widths(state, area.width.saturating_sub(x - area.x));
        for (column, width) in state.columns().iter().zip(widths) {
            let indicator = column.sort_indicator(state.sort_state());
            let text = format!("{}{}", column.label, indicator.symbol());
            buf.set_stringn(x, area.y, text, width.saturating_sub(1) as usize, self.header_style);
            x += width;
        }
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer, state: &mut GridController) {
        let row_height = state.viewport().row_height();
        state
            .viewport_mut()
            .set_viewport_height(area.height as usize * row_height);

        let view_len = state.view().len();
        let window = state.viewport_mut().window(view_len);
        let scroll_offset = state.viewport().scroll_offset();
        let first_visible = scroll_offset / row_height;

        for index in window.start..window.end {
            // Materialized rows above/below the viewport edge are clipped
            let offset = state.viewport().row_offset(index);
            if offset < scroll_offset {
                continue;
            }
            let y_units = offset - scroll_offset;
            let y = area.y + (y_units / row_height) as u16;
            if y >= area.y + area.height {
                break;
            }
            self.render_row(area, buf, state, index, y);
        }

        if window.virtualized {
            // The scrollbar is sized by the full view so the thumb reflects
            // the true list length, not the materialized window
            let mut scrollbar_state = ScrollbarState::new(view_len).position(first_visible);
            Scrollbar::new(ScrollbarOrientation::VerticalRight).render(
                area,
                buf,
                &mut scrollbar_state,
            );
        }
    }

    fn render_row(
        &self,
        area: Rect,
        buf: &mut Buffer,
        state: &GridController,
        index: usize,
        y: u16,
    ) {
        let Some(row_idx) = state.view().row_at(index) else {
            return;
        };
        let Some(row) = state.rows().get(row_idx) else {
            return;
        };

        let key = state.view().key_at(index).unwrap_or_default();
        let is_selected = state.selection().contains(key);
        let is_cursor = index == state.cursor();

        let style = if is_cursor {
            self.cursor_style
        } else if is_selected {
            self.selected_style
        } else {
            self.row_style
        };

        let mut x = area.x;
        if state.is_selectable() {
            let mark = if is_selected { "[x]" } else { "[ ]" };
            buf.set_string(x, y, mark, style);
            x += CHECKBOX_WIDTH;
        }

        let widths = self.column_widths(state, area.width.saturating_sub(x - area.x));
        for (column, width) in state.columns().iter().zip(widths) {
            let text = column.cell_text(row);
            buf.set_stringn(x, y, text, width.saturating_sub(1) as usize, style);
            x += width;
        }

        // Fill the rest of a highlighted line so the cursor reads as a bar
        if is_cursor {
            while x < area.x + area.width {
                buf.set_string(x, y, " ", style);
                x += 1;
            }
            // The checkbox's descriptive label, surfaced on the active row
            if state.is_selectable() {
                let label = row_accessible_label(row);
                let needed = label.chars().count() as u16 + 1;
                if area.width > needed + CHECKBOX_WIDTH {
                    let lx = area.x + area.width - needed;
                    buf.set_string(lx, y, label, style.add_modifier(Modifier::DIM));
                }
            }
        }
    }
}

impl<'a> StatefulWidget for DataGrid<'a> {
    type State = GridController;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        state.sync();

        let mut y = inner.y;
        let bottom = inner.y + inner.height;

        self.render_search_bar(Rect::new(inner.x, y, inner.width, 1), buf, state);
        y += 1;

        // Loading suppresses everything below the search bar, stale rows
        // included
        if state.is_loading() {
            if y < bottom {
                buf.set_string(inner.x, y, "Loading...", Style::default().fg(Color::DarkGray));
            }
            return;
        }

        if let Some(message) = state.status_message() {
            if y < bottom {
                buf.set_string(inner.x, y, message, Style::default().fg(Color::DarkGray));
                y += 1;
            }
        }

        if !state.selection().is_empty() && self.actions.is_some() && y < bottom {
            self.render_bulk_bar(Rect::new(inner.x, y, inner.width, 1), buf, state);
            y += 1;
        }

        if state.view().is_empty() {
            if y < bottom {
                let message = self.empty_state.unwrap_or("No results found");
                buf.set_string(inner.x, y, message, Style::default().fg(Color::DarkGray));
            }
            return;
        }

        if y < bottom {
            self.render_header(Rect::new(inner.x, y, inner.width, 1), buf, state);
            y += 1;
        }

        if y < bottom {
            let body = Rect::new(inner.x, y, inner.width, bottom - y);
            self.render_body(body, buf, state);
        }
    }
}
