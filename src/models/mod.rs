pub mod data;
pub mod lexicon;

pub use data::*;
