//! Composable widget functions.

pub mod button;
pub mod lazy_list;
pub mod nodes;
pub mod spacer;
pub mod text;
pub mod view;

pub use button::*;
pub use lazy_list::*;
pub use nodes::*;
pub use spacer::*;
pub use text::*;
pub use view::*;
