// Scoped parameter resolution
// A cell holds an optional override and defers to the corresponding cell
// one scope up (sheet -> book -> process default) when it has none.

pub mod cell;
pub mod codec;
pub mod scope;

pub use cell::Param;
pub use scope::Scope;
