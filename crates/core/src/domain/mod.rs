pub mod quote;
pub mod selection;
