pub mod result;

pub use result::TurnResult;
