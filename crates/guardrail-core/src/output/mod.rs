pub mod ansi;
pub mod csv;
pub mod json;
pub mod text;
