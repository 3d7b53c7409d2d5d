// chordlink-core/src/types/mod.rs

pub mod chord;
pub mod instrument;
pub mod lookup;
pub mod session;
pub mod step;
pub mod timing;

pub use chord::{ChordEntry, LibraryChord, Provenance};
pub use instrument::{EqSettings, InstrumentProfile};
pub use lookup::LookupContext;
pub use session::SessionState;
pub use step::{Pattern, StepToken};
pub use timing::{Subdivision, Timing};
