//! Command-line glue for tugtags.
//!
//! - [`files`]: assembling the input file list (arguments, `-L` lists,
//!   recursive walks, exclusion globs)
//! - [`cli`]: running a tagging pass and writing the result

pub mod cli;
pub mod files;
