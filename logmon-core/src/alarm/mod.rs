mod engine;
mod types;


pub use engine::*;
pub use types::*;
