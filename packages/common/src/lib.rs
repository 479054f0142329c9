pub mod component;
pub mod error;
pub mod id_generator;
pub mod page;
pub mod result;
pub mod visitor;

pub use component::*;
pub use error::*;
pub use id_generator::*;
pub use page::*;
pub use result::*;
pub use visitor::*;
