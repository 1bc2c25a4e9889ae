//! User interface layer: controller state, windowing, and the widget.

pub mod column;
pub mod controller;
pub mod grid_widget;
pub mod selection;
pub mod viewport;
