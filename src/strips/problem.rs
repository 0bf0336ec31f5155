use std::{collections::HashMap, fmt, io};

use log::{debug, trace, warn};

use super::action::{Action, ConditionalEffect};
use super::bit_array::BitArray;
use super::error::Error;
use super::fluent::Fluent;
use super::{ActionIndex, FluentIndex};

/// Signature given to the synthetic action whose precondition is the goal.
pub const END_SIGNATURE: &str = "(END)";

/// Per-fluent inverse lists, plus the problem size they were built for.
#[derive(Debug, Clone, Default)]
struct ActionTables {
    requiring: Vec<Vec<ActionIndex>>,
    adding: Vec<Vec<ActionIndex>>,
    deleting: Vec<Vec<ActionIndex>>,
    num_fluents: usize,
    num_actions: usize,
}

impl ActionTables {
    fn build(num_fluents: usize, actions: &[Action]) -> Self {
        let mut tables = Self {
            requiring: vec![Vec::new(); num_fluents],
            adding: vec![Vec::new(); num_fluents],
            deleting: vec![Vec::new(); num_fluents],
            num_fluents,
            num_actions: actions.len(),
        };
        for action in actions {
            tables.register(action);
        }
        tables
    }

    /// Appends `action` once per reference, so an action touching a fluent from
    /// both its base effect and a conditional effect shows up twice.
    fn register(&mut self, action: &Action) {
        let id = action.index();
        Self::append(&mut self.requiring, action.prec_vec(), id);
        Self::append(&mut self.adding, action.add_vec(), id);
        Self::append(&mut self.deleting, action.del_vec(), id);
        for ceff in action.ceff_vec() {
            Self::append(&mut self.requiring, ceff.prec_vec(), id);
            Self::append(&mut self.adding, ceff.add_vec(), id);
            Self::append(&mut self.deleting, ceff.del_vec(), id);
        }
    }

    #[inline]
    fn append(table: &mut [Vec<ActionIndex>], fluents: &[FluentIndex], action: ActionIndex) {
        for &f in fluents {
            table[f].push(action);
        }
    }

    fn references(&self) -> usize {
        [&self.requiring, &self.adding, &self.deleting].iter()
            .map(|table| table.iter().map(Vec::len).sum::<usize>())
            .sum()
    }
}

/// Owns every fluent and action of one ground STRIPS problem.
///
/// A builder adds fluents and actions, sets init and goal, then calls
/// [`Problem::build_action_tables`]. From there on the `actions_*` queries
/// are answered from the inverse tables. Adding anything afterwards makes
/// those queries fail with [`Error::StaleIndex`] until the tables are rebuilt.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    domain_name: String,
    problem_name: String,
    fluents: Vec<Fluent>,
    actions: Vec<Action>,
    fluents_map: HashMap<String, FluentIndex>,
    init: Vec<FluentIndex>,
    goal: Vec<FluentIndex>,
    in_init: BitArray,
    in_goal: BitArray,
    end_operator: Option<ActionIndex>,
    tables: Option<ActionTables>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(domain_name: &str, problem_name: &str) -> Self {
        Self {
            domain_name: domain_name.to_owned(),
            problem_name: problem_name.to_owned(),
            ..Self::default()
        }
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn problem_name(&self) -> &str {
        &self.problem_name
    }

    pub fn num_fluents(&self) -> usize {
        self.fluents.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn fluents(&self) -> &[Fluent] {
        &self.fluents
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn fluent(&self, f: FluentIndex) -> Result<&Fluent, Error> {
        self.fluents.get(f).ok_or(Error::InvalidIndex { index: f, count: self.fluents.len() })
    }

    pub fn action(&self, a: ActionIndex) -> Result<&Action, Error> {
        self.actions.get(a).ok_or(Error::InvalidAction { index: a, count: self.actions.len() })
    }

    pub fn init(&self) -> &[FluentIndex] {
        &self.init
    }

    pub fn goal(&self) -> &[FluentIndex] {
        &self.goal
    }

    /// Index of the `(END)` action, if one was requested through [`Problem::set_goal`].
    pub fn end_operator(&self) -> Option<ActionIndex> {
        self.end_operator
    }

    pub fn has_cond_effs(&self) -> bool {
        self.actions.iter().any(Action::has_ceff)
    }

    /// A fluent registered under an already used signature takes over the
    /// lookup entry; the older fluent stays reachable by index only.
    pub fn add_fluent(&mut self, signature: &str) -> FluentIndex {
        let index = self.fluents.len();
        if let Some(previous) = self.fluents_map.insert(signature.to_owned(), index) {
            warn!("Fluent {} shadows fluent {} with the same signature '{}'", index, previous, signature);
        }
        self.fluents.push(Fluent::new(index, signature));
        trace!("Added fluent {}: {}", index, signature);
        index
    }

    pub fn add_action(&mut self,
                      signature: &str,
                      prec: Vec<FluentIndex>,
                      add: Vec<FluentIndex>,
                      del: Vec<FluentIndex>,
                      ceffs: Vec<ConditionalEffect>) -> Result<ActionIndex, Error> {
        let count = self.fluents.len();
        let check = |f: FluentIndex| if f < count { Ok(()) } else { Err(Error::InvalidIndex { index: f, count }) };
        prec.iter().chain(&add).chain(&del).try_for_each(|&f| check(f))?;
        ceffs.iter().flat_map(ConditionalEffect::fluents).try_for_each(check)?;

        let index = self.actions.len();
        self.actions.push(Action::new(index, signature, prec, add, del, ceffs, count));
        trace!("Added action {}: {}", index, signature);
        Ok(index)
    }

    pub fn set_action_cost(&mut self, a: ActionIndex, cost: f32) -> Result<(), Error> {
        if cost.is_nan() || cost < 0.0 {
            return Err(Error::InvalidCost { action: a, cost });
        }
        let count = self.actions.len();
        let action = self.actions.get_mut(a).ok_or(Error::InvalidAction { index: a, count })?;
        action.set_cost(cost);
        Ok(())
    }

    fn check_fluents(&self, fluents: &[FluentIndex]) -> Result<(), Error> {
        let count = self.fluents.len();
        match fluents.iter().find(|&&f| f >= count) {
            Some(&index) => Err(Error::InvalidIndex { index, count }),
            None => Ok(()),
        }
    }

    /// Replaces the initial state. Membership from any earlier call is dropped.
    pub fn set_init(&mut self, init: &[FluentIndex]) -> Result<(), Error> {
        self.check_fluents(init)?;
        self.init = init.to_vec();
        self.in_init = BitArray::with_ones(self.fluents.len(), init);
        debug!("Initial state set to {} fluents", self.in_init.count_ones());
        Ok(())
    }

    /// Replaces the goal. With `create_end_action` a zero cost `(END)` action
    /// requiring exactly the goal is appended and becomes the end operator.
    pub fn set_goal(&mut self, goal: &[FluentIndex], create_end_action: bool) -> Result<Option<ActionIndex>, Error> {
        self.check_fluents(goal)?;
        self.goal = goal.to_vec();
        self.in_goal = BitArray::with_ones(self.fluents.len(), goal);
        debug!("Goal set to {} fluents", self.in_goal.count_ones());
        if create_end_action {
            let end = self.add_action(END_SIGNATURE, goal.to_vec(), Vec::new(), Vec::new(), Vec::new())?;
            self.set_action_cost(end, 0.0)?;
            self.end_operator = Some(end);
            debug!("Created end operator {}", end);
            Ok(Some(end))
        } else {
            Ok(None)
        }
    }

    /// Rebuilds the requiring/adding/deleting tables from every action
    /// currently in the problem. Previous tables are discarded.
    pub fn build_action_tables(&mut self) {
        let tables = ActionTables::build(self.fluents.len(), &self.actions);
        debug!("Built action tables over {} fluents and {} actions ({} references)",
            tables.num_fluents, tables.num_actions, tables.references());
        self.tables = Some(tables);
    }

    /// True when the tables exist and cover every fluent and action.
    pub fn is_indexed(&self) -> bool {
        self.tables().is_ok()
    }

    fn tables(&self) -> Result<&ActionTables, Error> {
        let tables = self.tables.as_ref().ok_or(Error::NotBuilt)?;
        if tables.num_fluents != self.fluents.len() || tables.num_actions != self.actions.len() {
            return Err(Error::StaleIndex {
                built_fluents: tables.num_fluents,
                built_actions: tables.num_actions,
                fluents: self.fluents.len(),
                actions: self.actions.len(),
            });
        }
        Ok(tables)
    }

    fn lookup<'a>(&'a self, f: FluentIndex, table: fn(&ActionTables) -> &Vec<Vec<ActionIndex>>) -> Result<&'a [ActionIndex], Error> {
        let tables = self.tables()?;
        self.check_fluents(&[f])?;
        Ok(table(tables)[f].as_slice())
    }

    pub fn actions_requiring(&self, f: FluentIndex) -> Result<&[ActionIndex], Error> {
        self.lookup(f, |t| &t.requiring)
    }

    pub fn actions_adding(&self, f: FluentIndex) -> Result<&[ActionIndex], Error> {
        self.lookup(f, |t| &t.adding)
    }

    pub fn actions_deleting(&self, f: FluentIndex) -> Result<&[ActionIndex], Error> {
        self.lookup(f, |t| &t.deleting)
    }

    pub fn fluent_index(&self, signature: &str) -> Result<FluentIndex, Error> {
        self.fluents_map.get(signature).copied().ok_or_else(|| Error::UnknownFluent(signature.to_owned()))
    }

    /// Fluents added after the last `set_init` are never in the initial state.
    #[inline]
    pub fn is_in_init(&self, f: FluentIndex) -> bool {
        f < self.in_init.len() && self.in_init.isset(f)
    }

    #[inline]
    pub fn is_in_goal(&self, f: FluentIndex) -> bool {
        f < self.in_goal.len() && self.in_goal.isset(f)
    }

    /// Signatures of `fluents`, comma separated.
    pub fn fluent_vec_display(&self, fluents: &[FluentIndex]) -> String {
        let name = |f: &FluentIndex| match self.fluents.get(*f) {
            Some(fluent) => fluent.signature().to_owned(),
            None => format!("#{}", f),
        };
        let first = fluents.iter().take(1).fold(String::new(), |acc, item| acc + &name(item));
        fluents.iter().skip(1).fold(first, |acc, item| acc + ", " + &name(item))
    }

    pub fn write_listing<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "(problem {}) (domain {})", self.problem_name, self.domain_name)?;
        writeln!(f, "fluents: {}", self.fluents.len())?;
        for fluent in &self.fluents {
            writeln!(f, "\t{}: {}", fluent.index(), fluent)?;
        }
        writeln!(f, "actions: {}", self.actions.len())?;
        for action in &self.actions {
            writeln!(f, "\t{}: {} cost {}", action.index(), action.signature(), action.cost())?;
            writeln!(f, "\t\tpre: {}", self.fluent_vec_display(action.prec_vec()))?;
            writeln!(f, "\t\tadd: {}", self.fluent_vec_display(action.add_vec()))?;
            writeln!(f, "\t\tdel: {}", self.fluent_vec_display(action.del_vec()))?;
            for ceff in action.ceff_vec() {
                writeln!(f, "\t\twhen ({}) add ({}) del ({})",
                    self.fluent_vec_display(ceff.prec_vec()),
                    self.fluent_vec_display(ceff.add_vec()),
                    self.fluent_vec_display(ceff.del_vec()))?;
            }
        }
        writeln!(f, "init: {}", self.fluent_vec_display(&self.init))?;
        writeln!(f, "goal: {}", self.fluent_vec_display(&self.goal))
    }
}
