pub mod console_table;

pub use console_table::ConsoleTable;
