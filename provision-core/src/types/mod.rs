mod common;
mod manifest;
mod step;

pub use common::*;
pub use manifest::*;
pub use step::*;
