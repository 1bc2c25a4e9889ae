#[cfg(test)]
mod tests {
    use datagrid::ui::viewport::Viewport;
    use datagrid::{Column, DataGrid, GridController};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn invoices(count: usize) -> Arc<Vec<Value>> {
        Arc::new(
            (0..count)
                .map(|i| {
                    json!({
                        "id": format!("inv-{i}"),
                        "invoice_number": format!("INV-{i:04}"),
                        "status": (["paid", "draft", "sent"][i % 3]),
                        "amount": (i as f64) * 10.0,
                    })
                })
                .collect(),
        )
    }

    fn grid(rows: Arc<Vec<Value>>) -> GridController {
        let mut grid = GridController::new(vec![
            Column::new("invoice_number", "Invoice").sortable(),
            Column::new("amount", "Amount").sortable(),
        ])
        .with_search_fields(vec!["invoice_number".to_string(), "status".to_string()])
        .with_viewport(Viewport::new(1, 5, 100));
        grid.set_rows(rows);
        grid.sync();
        grid
    }

    fn render(widget: DataGrid, state: &mut GridController, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_stateful_widget(widget, frame.area(), state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect::<String>()
            })
            .collect()
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    #[test]
    fn test_search_count_message() {
        let mut state = grid(invoices(10));
        // Rows 1, 4, and 7 carry the "draft" status
        state.set_search_term("draft");
        let lines = render(DataGrid::new(), &mut state, 60, 12);

        assert!(screen_contains(&lines, "Showing 3 of 10 results"));
        assert!(screen_contains(&lines, "INV-0001"));
        assert!(!screen_contains(&lines, "INV-0002"));
    }

    #[test]
    fn test_no_count_message_without_term() {
        let mut state = grid(invoices(10));
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(!screen_contains(&lines, "results"));
    }

    #[test]
    fn test_empty_state_default_and_custom() {
        let mut state = grid(invoices(5));
        state.set_search_term("no-such-invoice");
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "No results found"));
        assert!(!screen_contains(&lines, "INV-0001"));
        // Header is suppressed for an empty view
        assert!(!screen_contains(&lines, "Invoice"));

        let lines = render(
            DataGrid::new().empty_state("No invoices yet"),
            &mut state,
            60,
            12,
        );
        assert!(screen_contains(&lines, "No invoices yet"));
    }

    #[test]
    fn test_loading_suppresses_body_even_with_stale_rows() {
        let mut state = grid(invoices(5));
        state.set_loading(true);
        let lines = render(DataGrid::new(), &mut state, 60, 12);

        assert!(screen_contains(&lines, "Loading..."));
        assert!(!screen_contains(&lines, "INV-0001"));
        assert!(!screen_contains(&lines, "Invoice"));

        state.set_loading(false);
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "INV-0001"));
    }

    #[test]
    fn test_header_sort_indicators() {
        let mut state = grid(invoices(5));
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        // Both sortable columns idle: neutral indicator
        assert!(screen_contains(&lines, "Invoice ↕"));
        assert!(screen_contains(&lines, "Amount ↕"));

        state.sort_by_column(0);
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "Invoice ▲"));
        assert!(screen_contains(&lines, "Amount ↕"));

        state.sort_by_column(0);
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "Invoice ▼"));
    }

    #[test]
    fn test_select_all_tristate_and_bulk_bar() {
        let mut state = grid(invoices(4));
        let widget = || DataGrid::new().actions("[d] delete");

        let lines = render(widget(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "[ ] Invoice"));
        assert!(!screen_contains(&lines, "selected"));

        state.toggle_cursor_selection();
        let lines = render(widget(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "[-] Invoice"));
        assert!(screen_contains(&lines, "1 selected"));
        assert!(screen_contains(&lines, "[d] delete"));

        state.toggle_select_all();
        let lines = render(widget(), &mut state, 60, 12);
        assert!(screen_contains(&lines, "[x] Invoice"));
        assert!(screen_contains(&lines, "4 selected"));
    }

    #[test]
    fn test_bulk_bar_needs_actions_element() {
        let mut state = grid(invoices(4));
        state.toggle_cursor_selection();
        // Selection exists but no actions element: no bar
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(!screen_contains(&lines, "selected"));
    }

    #[test]
    fn test_search_placeholder_shown_when_term_empty() {
        let mut state = grid(invoices(3));
        let lines = render(
            DataGrid::new().search_placeholder("Search invoices..."),
            &mut state,
            60,
            12,
        );
        assert!(screen_contains(&lines, "Search: Search invoices..."));
    }

    #[test]
    fn test_unselectable_grid_renders_no_checkboxes() {
        let mut state = GridController::new(vec![Column::new("invoice_number", "Invoice")])
            .selectable(false);
        state.set_rows(invoices(3));
        state.sync();
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        assert!(!screen_contains(&lines, "[ ]"));
        assert!(screen_contains(&lines, "INV-0001"));
    }

    #[test]
    fn test_cursor_row_shows_descriptive_checkbox_label() {
        let mut state = grid(invoices(3));
        let lines = render(DataGrid::new(), &mut state, 60, 12);
        // Derived from the row's invoice_number, the first available
        // descriptive field
        assert!(screen_contains(&lines, "Select INV-0000"));
    }

    #[test]
    fn test_virtualized_body_renders_only_the_window() {
        let mut state = grid(invoices(150));
        let lines = render(DataGrid::new(), &mut state, 60, 14);

        // 14 rows tall: search + header + ~12 body lines from the top
        assert!(screen_contains(&lines, "INV-0000"));
        assert!(!screen_contains(&lines, "INV-0100"));
        assert!(!screen_contains(&lines, "INV-0149"));
    }
}
