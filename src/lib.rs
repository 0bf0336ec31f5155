//! Ground STRIPS problem representation: fluents, actions with conditional
//! effects, init/goal membership and the per-fluent action tables a search
//! engine queries.
pub mod strips;

pub use strips::{Action, ActionIndex, BitArray, BitMatrix, ConditionalEffect, Error, Fluent, FluentIndex, Problem};
