use super::{bit_array::BitArray, ActionIndex, FluentIndex};

/// Cost every action gets unless it is set explicitly.
pub const DEFAULT_COST: f32 = 1.0;

/// Effect that only fires when its own precondition holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalEffect {
    prec: Vec<FluentIndex>,
    add: Vec<FluentIndex>,
    del: Vec<FluentIndex>,
}

impl ConditionalEffect {
    pub fn new(prec: Vec<FluentIndex>, add: Vec<FluentIndex>, del: Vec<FluentIndex>) -> Self {
        Self { prec, add, del }
    }

    pub fn prec_vec(&self) -> &[FluentIndex] {
        &self.prec
    }

    pub fn add_vec(&self) -> &[FluentIndex] {
        &self.add
    }

    pub fn del_vec(&self) -> &[FluentIndex] {
        &self.del
    }

    /// Every fluent this effect mentions, in prec/add/del order.
    pub fn fluents(&self) -> impl Iterator<Item = FluentIndex> + '_ {
        self.prec.iter().chain(&self.add).chain(&self.del).copied()
    }
}

/// A ground STRIPS operator.
///
/// The `*_vec` lists keep whatever order and duplicates the builder passed
/// in. The `*_set` bitsets mirror the base lists for O(1) membership tests and
/// are sized to the fluent count at the time the action was created.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    index: ActionIndex,
    signature: String,
    cost: f32,
    prec: Vec<FluentIndex>,
    add: Vec<FluentIndex>,
    del: Vec<FluentIndex>,
    prec_set: BitArray,
    add_set: BitArray,
    del_set: BitArray,
    ceffs: Vec<ConditionalEffect>,
}

impl Action {
    /// Callers guarantee every fluent referenced is below `num_fluents`.
    pub(crate) fn new(index: ActionIndex,
                      signature: &str,
                      prec: Vec<FluentIndex>,
                      add: Vec<FluentIndex>,
                      del: Vec<FluentIndex>,
                      ceffs: Vec<ConditionalEffect>,
                      num_fluents: usize) -> Self {
        let prec_set = BitArray::with_ones(num_fluents, &prec);
        let add_set = BitArray::with_ones(num_fluents, &add);
        let del_set = BitArray::with_ones(num_fluents, &del);
        Self {
            index,
            signature: signature.to_owned(),
            cost: DEFAULT_COST,
            prec, add, del,
            prec_set, add_set, del_set,
            ceffs,
        }
    }

    pub fn index(&self) -> ActionIndex {
        self.index
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub(crate) fn set_cost(&mut self, cost: f32) {
        self.cost = cost;
    }

    pub fn prec_vec(&self) -> &[FluentIndex] {
        &self.prec
    }

    pub fn add_vec(&self) -> &[FluentIndex] {
        &self.add
    }

    pub fn del_vec(&self) -> &[FluentIndex] {
        &self.del
    }

    pub fn ceff_vec(&self) -> &[ConditionalEffect] {
        &self.ceffs
    }

    pub fn has_ceff(&self) -> bool {
        !self.ceffs.is_empty()
    }

    #[inline]
    fn member(set: &BitArray, f: FluentIndex) -> bool {
        f < set.len() && set.isset(f)
    }

    /// True when `f` is in the base precondition.
    pub fn requires(&self, f: FluentIndex) -> bool {
        Self::member(&self.prec_set, f)
    }

    /// True when the base effect adds `f`.
    pub fn asserts(&self, f: FluentIndex) -> bool {
        Self::member(&self.add_set, f)
    }

    /// True when the base effect deletes `f`.
    pub fn retracts(&self, f: FluentIndex) -> bool {
        Self::member(&self.del_set, f)
    }

    /// Every fluent the action mentions, base effect first, then each conditional effect.
    pub fn fluents(&self) -> impl Iterator<Item = FluentIndex> + '_ {
        self.prec.iter().chain(&self.add).chain(&self.del).copied()
            .chain(self.ceffs.iter().flat_map(|c| c.fluents()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ConditionalEffect, DEFAULT_COST};

    #[test]
    fn test_membership() {
        let ceff = ConditionalEffect::new(vec![3], vec![2], vec![]);
        let a = Action::new(0, "pick", vec![0, 1], vec![2], vec![0], vec![ceff], 4);
        assert_eq!(a.cost(), DEFAULT_COST);
        assert!(a.requires(0) && a.requires(1) && !a.requires(2));
        assert!(a.asserts(2) && !a.asserts(0));
        assert!(a.retracts(0) && !a.retracts(1));
        // conditional effects are not part of the base sets
        assert!(!a.requires(3));
        assert!(a.has_ceff());
        // past the sets' range is simply "no"
        assert!(!a.requires(10));
    }

    #[test]
    fn test_vectors_keep_duplicates() {
        let a = Action::new(2, "noisy", vec![1, 0, 1], vec![], vec![], vec![], 2);
        assert_eq!(a.prec_vec(), &[1, 0, 1]);
        assert_eq!(a.index(), 2);
        assert_eq!(a.signature(), "noisy");
        assert!(!a.has_ceff());
    }

    #[test]
    fn test_fluents() {
        let ceffs = vec![ConditionalEffect::new(vec![4], vec![5], vec![6]), ConditionalEffect::new(vec![], vec![], vec![0])];
        let a = Action::new(0, "a", vec![0], vec![1], vec![2], ceffs, 7);
        assert_eq!(a.fluents().collect::<Vec<_>>(), vec![0, 1, 2, 4, 5, 6, 0]);
    }
}
