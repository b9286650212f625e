//! egui drawing code. Reads and mutates [`AppState`](sheetview::state::AppState)
//! only through its handler methods; no filtering decisions here.

pub mod download;
pub mod panels;
pub mod table;
