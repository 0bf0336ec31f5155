use std::fmt;

use super::FluentIndex;

/// A ground proposition. Its index is the position in the owning problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fluent {
    index: FluentIndex,
    signature: String,
}

impl Fluent {
    pub(crate) fn new(index: FluentIndex, signature: &str) -> Self {
        Self { index, signature: signature.to_owned() }
    }

    pub fn index(&self) -> FluentIndex {
        self.index
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for Fluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}
