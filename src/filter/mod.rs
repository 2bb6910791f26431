//! Filter expression parsing and matching
//!
//! Each `--filter` value is compiled into a [`Predicate`]; several values
//! combine with AND.
//!
//! # Syntax
//!
//! ```text
//! text              raw line contains text
//! ^text / text$     raw line starts / ends with text
//! N:text            field N contains text (N may be negative, -1 is the last field)
//! N:^text / N:text$ field N starts / ends with text, N:^text$ equals it
//! N:<value          field N is less than value
//! N:>value          field N is greater than value
//! !expr             negate the whole expression
//! N:!test           negate the field test only
//! ```
//!
//! Comparisons are numeric when both the field and the value parse as
//! numbers, byte-lexicographic otherwise. A field that does not exist on a
//! record never matches, so `!3:x` accepts a record with two fields while
//! `3:!x` rejects it. Field 0 is the timestamp and cannot be filtered.
//!
//! # Examples
//!
//! ```text
//! ERROR                 # lines mentioning ERROR
//! 2:^GET                # second field starts with GET
//! -1:>500               # last field above 500
//! !3:healthcheck        # third field missing or not mentioning healthcheck
//! ```

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::CompileError;
pub use matcher::{Comparison, FieldIndex, FieldTest, Operand, Predicate, TextMatch};
pub use parser::{compile_filters, parse_filter};
