//! Spreadsheet viewer core: loading, range highlighting, row filtering,
//! the table view model and export. The egui front end lives in the binary.

pub mod cli;
pub mod data;
pub mod state;
pub mod view;
