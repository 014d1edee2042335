//! Two-mode list demo: the same 2000 text-heavy rows composed either with a
//! dedicated native text view per fragment (Heavy) or with virtual spans
//! merged into one allocation (Light).

pub mod app;

pub use app::*;
