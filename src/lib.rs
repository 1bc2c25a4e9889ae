pub mod config;
pub mod data;
pub mod logging;
pub mod ui;

pub use data::filter::MatchMode;
pub use data::grid_view::GridView;
pub use data::sort::{SortDirection, SortState};
pub use ui::column::{Column, SortIndicator};
pub use ui::controller::GridController;
pub use ui::grid_widget::DataGrid;
pub use ui::selection::{SelectAllState, SelectionSet};
pub use ui::viewport::{Viewport, VirtualWindow};
