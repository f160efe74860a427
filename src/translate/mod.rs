pub mod interface;
pub mod language;
pub mod prompt;
pub mod translator;

pub use interface::*;
pub use language::*;
pub use translator::*;
