// Score-processing configuration
// Parameter aggregates with three-level scope resolution (process default
// -> book -> sheet), plus the value tables and switch registry they carry.

pub mod barline;
pub mod defaults;
pub mod filter;
pub mod fonts;
pub mod io;
pub mod params;
pub mod quality;
pub mod switches;

pub use defaults::GlobalDefaults;
pub use params::{BookParams, Params, SheetParams};
pub use switches::{ProcessingSwitch, ProcessingSwitches, SwitchGroup};
