//! Value coercion for raw listing cells.
//!
//! Every function here is pure and total: malformed input degrades to `None`
//! instead of an error, so one bad cell never blocks a row.

pub mod coerce;
pub mod dates;

pub use coerce::{
    NULL_TOKENS, clean_str, clean_string, format_numeric, is_null_like, parse_numeric, to_integer,
    to_numeric,
};
pub use dates::{parse_date, to_date};
