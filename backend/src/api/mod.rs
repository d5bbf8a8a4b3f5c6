pub mod suggest;
pub mod videos;

pub use suggest::*;
pub use videos::*;
