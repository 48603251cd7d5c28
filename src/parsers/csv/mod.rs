mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::{MIN_FIELDS, RawTransaction};
    pub use super::parser::CsvParser;
    pub use super::types::{CsvDate, parse_amount};
}
