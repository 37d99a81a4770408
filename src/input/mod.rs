pub mod reader;
pub mod records;

pub use records::{QueryRecord, load_targets, parse_query_records, read_query_records};

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
