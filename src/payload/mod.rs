pub mod extract;
pub mod parse;

pub use extract::{extract, Extraction};
pub use parse::{parse, PayloadFormat};
