pub mod docs;
pub mod ops;

pub use docs::*;
pub use ops::*;
