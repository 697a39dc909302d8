use crate::utils::{Label, LabelSet, LabelType};
use std::collections::HashSet;
use std::sync::OnceLock;

/// A named variant of an argumentation framework.
pub type FrameworkState<T> = Label<T>;

/// The framework states that may explain the acceptance of an observation.
///
/// Each state declares its own arguments and attacks, and may be an expansion of another state.
/// The effective facts of a state are its own facts and the effective facts of the state it expands.
/// They are computed on first request and then kept for the lifetime of the object.
///
/// Arguments are referred to by their ids in the argument set of the framework that gathers the facts of all the states.
///
/// Framework states are built through a [`ModelBuilder`](crate::aa::ModelBuilder), which ensures the expansion relation is acyclic.
pub struct FrameworkStates<T>
where
    T: LabelType,
{
    states: LabelSet<T>,
    expansion_of: Vec<Option<usize>>,
    own_arguments: Vec<Vec<usize>>,
    own_attacks: Vec<Vec<(usize, usize)>>,
    effective_arguments: Vec<OnceLock<HashSet<usize>>>,
    effective_attacks: Vec<OnceLock<HashSet<(usize, usize)>>>,
}

impl<T> Default for FrameworkStates<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new(LabelSet::default(), vec![], vec![], vec![])
    }
}

impl<T> FrameworkStates<T>
where
    T: LabelType,
{
    pub(crate) fn new(
        states: LabelSet<T>,
        expansion_of: Vec<Option<usize>>,
        own_arguments: Vec<Vec<usize>>,
        own_attacks: Vec<Vec<(usize, usize)>>,
    ) -> Self {
        let n = states.len();
        debug_assert!(find_expansion_cycle(&expansion_of).is_none());
        Self {
            states,
            expansion_of,
            own_arguments,
            own_attacks,
            effective_arguments: (0..n).map(|_| OnceLock::new()).collect(),
            effective_attacks: (0..n).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Returns the set of declared states.
    pub fn state_set(&self) -> &LabelSet<T> {
        &self.states
    }

    /// Returns the number of declared states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` iff no state is declared.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over the declared states.
    pub fn iter_states(&self) -> impl Iterator<Item = &FrameworkState<T>> + '_ {
        self.states.iter()
    }

    /// Returns the state the given one is an expansion of, if any.
    pub fn expansion_of(&self, state: &FrameworkState<T>) -> Option<&FrameworkState<T>> {
        self.expansion_of[state.id()].map(|id| self.states.get_label_by_id(id))
    }

    /// Iterates over the ids of a state and its ancestors, from the state to the root of its expansion chain.
    pub fn expansion_chain(&self, state_id: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(state_id), move |id| self.expansion_of[*id])
    }

    /// Returns the ids of the arguments of the state, including the inherited ones.
    pub fn effective_argument_ids(&self, state_id: usize) -> &HashSet<usize> {
        self.effective_arguments[state_id].get_or_init(|| {
            self.expansion_chain(state_id)
                .flat_map(|s| self.own_arguments[s].iter().copied())
                .collect()
        })
    }

    /// Returns the attacks of the state as couples of argument ids, including the inherited ones.
    pub fn effective_attack_ids(&self, state_id: usize) -> &HashSet<(usize, usize)> {
        self.effective_attacks[state_id].get_or_init(|| {
            self.expansion_chain(state_id)
                .flat_map(|s| self.own_attacks[s].iter().copied())
                .collect()
        })
    }

    /// Returns `true` iff the attack from `from` to `to` holds in the given state.
    pub fn has_effective_attack(&self, state_id: usize, from: usize, to: usize) -> bool {
        self.effective_attack_ids(state_id).contains(&(from, to))
    }
}

/// Looks for a cycle in an expansion relation given as a parent list.
///
/// Returns the id of a state involved in a cycle, if any.
pub(crate) fn find_expansion_cycle(expansion_of: &[Option<usize>]) -> Option<usize> {
    // 0: unvisited, 1: on the current chain, 2: known to reach a root
    let mut status = vec![0u8; expansion_of.len()];
    for start in 0..expansion_of.len() {
        let mut chain = vec![];
        let mut current = Some(start);
        while let Some(id) = current {
            match status[id] {
                1 => return Some(id),
                2 => break,
                _ => {
                    status[id] = 1;
                    chain.push(id);
                    current = expansion_of[id];
                }
            }
        }
        chain.into_iter().for_each(|id| status[id] = 2);
    }
    None
}
