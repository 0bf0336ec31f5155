use thiserror::Error;

use super::{ActionIndex, FluentIndex};

/// Failures surfaced by [`Problem`](super::problem::Problem) at its API boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("fluent index {index} is out of range for a problem with {count} fluents")]
    InvalidIndex { index: FluentIndex, count: usize },

    #[error("action index {index} is out of range for a problem with {count} actions")]
    InvalidAction { index: ActionIndex, count: usize },

    #[error("no fluent with signature '{0}'")]
    UnknownFluent(String),

    #[error("action tables have not been built")]
    NotBuilt,

    #[error("action tables were built for {built_fluents} fluents and {built_actions} actions, but the problem now has {fluents} fluents and {actions} actions")]
    StaleIndex {
        built_fluents: usize,
        built_actions: usize,
        fluents: usize,
        actions: usize,
    },

    #[error("action {action} can not have cost {cost}")]
    InvalidCost { action: ActionIndex, cost: f32 },
}
