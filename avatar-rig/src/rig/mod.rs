mod builder;
mod mapping;

pub use builder::*;
pub use mapping::*;
