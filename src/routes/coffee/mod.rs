mod get;
mod post;
mod update;

pub use get::*;
pub use post::*;
pub use update::*;
