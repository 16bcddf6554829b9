pub mod calculation;
pub mod encounter;

pub use calculation::*;
pub use encounter::*;
