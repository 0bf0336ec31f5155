pub mod action;
pub mod bit_array;
pub mod bit_matrix;
pub mod error;
pub mod fluent;
pub mod problem;

/// Position of a fluent in its [`problem::Problem`].
pub type FluentIndex = usize;
/// Position of an action in its [`problem::Problem`].
pub type ActionIndex = usize;

pub use action::{Action, ConditionalEffect};
pub use bit_array::BitArray;
pub use bit_matrix::BitMatrix;
pub use error::Error;
pub use fluent::Fluent;
pub use problem::Problem;
