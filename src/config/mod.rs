pub mod constants;
pub mod vocabulary;

pub use vocabulary::{AttributeClass, Vocabulary};
