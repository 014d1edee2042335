//! Widget layer: modifiers, composable widget functions and the node
//! descriptor types they emit.

pub mod modifier;
pub mod semantics;
pub mod widgets;

pub use modifier::*;
pub use semantics::*;
pub use widgets::*;

pub use vtext_macros::composable;

#[cfg(test)]
mod tests;
