//! Value coercion for canonical fields.
//!
//! - **numeric**: permissive number parsing (currency, separators, age ranges)
//! - **categorical**: whitespace/case cleanup and synonym resolution
//! - **date**: the accepted submission date formats

pub mod categorical;
pub mod date;
pub mod numeric;

pub use categorical::{CategoryOutcome, is_null_token, normalize_category, sentence_case};
pub use date::parse_submission_date;
pub use numeric::{NumericOutcome, parse_numeric};
