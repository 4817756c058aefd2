mod common;
mod contradiction;
mod graph;
mod memory;

pub use common::*;
pub use contradiction::*;
pub use graph::*;
pub use memory::*;
