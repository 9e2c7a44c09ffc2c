mod cell;
mod reader;
mod types;

pub use cell::{coerce, Cell, Numeric};
pub use reader::{read_table, sniff_delimiter};
pub use types::Table;
