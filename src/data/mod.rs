//! Data layer: the pure derive pipeline and its inputs.
//!
//! Everything here is a pure function of its arguments: rows go in,
//! filtered/sorted index views come out. Presentation lives in `ui`.

pub mod filter;
pub mod grid_view;
pub mod loaders;
pub mod path;
pub mod sort;
pub mod value;
