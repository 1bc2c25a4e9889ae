use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Block, Terminal};
use serde_json::Value;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use datagrid::config::GridConfig;
use datagrid::data::loaders::load_rows;
use datagrid::logging::init_tracing;
use datagrid::ui::viewport::Viewport;
use datagrid::{Column, DataGrid, GridController, MatchMode};

fn main() -> Result<()> {
    let log_buffer = init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(file) = args.get(1) else {
        eprintln!("Usage: datagrid <rows.json|rows.csv>");
        std::process::exit(1);
    };

    let config = GridConfig::load().unwrap_or_default();
    let rows = load_rows(Path::new(file))
        .with_context(|| format!("Could not load rows from {file}"))?;

    let result = run_grid(rows, &config);

    // Dump captured logs after the terminal is restored
    for entry in log_buffer.get_recent(20) {
        eprintln!("{}", entry.format_for_display());
    }

    result
}

/// Derive grid columns from the first row's top-level fields.
fn columns_from_rows(rows: &[Value]) -> Vec<Column> {
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return Vec::new();
    };
    first
        .keys()
        .map(|key| Column::new(key.clone(), key.clone()).sortable())
        .collect()
}

fn match_mode_from_config(config: &GridConfig) -> MatchMode {
    match config.behavior.match_mode.as_str() {
        "regex" => MatchMode::Regex,
        "fuzzy" => MatchMode::Fuzzy,
        _ => MatchMode::Contains,
    }
}

fn run_grid(rows: Vec<Value>, config: &GridConfig) -> Result<()> {
    let columns = columns_from_rows(&rows);
    let search_fields: Vec<String> = columns.iter().map(|c| c.key.clone()).collect();

    let viewport = Viewport::new(
        config.behavior.row_height,
        config.behavior.overscan,
        config.behavior.virtualize_threshold,
    );

    let mut grid = GridController::new(columns)
        .with_search_fields(search_fields)
        .with_id_field(config.behavior.id_field.clone())
        .with_match_mode(match_mode_from_config(config))
        .with_viewport(viewport)
        .on_selection_change(Box::new(|keys| {
            info!(target: "selection", "Selection changed: {} rows", keys.len());
        }));
    grid.set_rows(Arc::new(rows));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut grid, config);

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    grid: &mut GridController,
    config: &GridConfig,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let widget = DataGrid::new()
                .block(Block::bordered().title(" datagrid "))
                .search_placeholder("Type to search, 1-9 to sort, Space to select, Esc to quit")
                .actions("[d] export selected")
                .header_style(config.theme.header_style())
                .selected_style(config.theme.selection_style());
            frame.render_stateful_widget(widget, frame.area(), grid);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {
                        grid.handle_key(key);
                    }
                }
            }
        }
    }
}
