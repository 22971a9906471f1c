//! Rule-based field extractors for earnings statements.

pub mod amounts;
pub mod dates;
pub mod identifier;
pub mod patterns;

pub use amounts::{parse_amount, split_trailing_amount};
pub use dates::{at_clock_time, parse_clock_time, parse_long_date};
pub use identifier::{identifier_from_file_name, new_identifier, resolve_identifier};
pub use patterns::*;
