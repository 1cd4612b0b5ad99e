#![no_std] // Shared with the wasm platform

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;
pub mod model;

pub use ids::{DocumentId, ParadigmId, TermId};
pub use model::*;
pub use morphology::*;
