pub mod error;
pub mod field;
pub mod method;
pub mod resource;
pub mod tag;

pub use error::*;
pub use field::*;
pub use method::*;
pub use resource::*;
pub use tag::*;
