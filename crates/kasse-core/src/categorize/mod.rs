pub mod engine;
pub mod outcome;

pub use engine::categorize;
pub use outcome::{CategorizedReceipt, CategoryGroup};
