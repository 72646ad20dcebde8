//! Native CLI support for the heritage binary.

pub mod args;
pub mod driver;

pub use driver::run;
