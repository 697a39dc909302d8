use crate::utils::{Label, LabelSet, LabelType};
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// A property that may be attached to arguments.
pub type Property<T> = Label<T>;

/// The properties attached to arguments, their weights, and the legal motivational states.
///
/// A motivational state is a set of properties.
/// The weight of a set of properties under a motivational state is the sum of the weights of the properties belonging to both sets.
/// An attack is enabled under a motivational state if the weight of the properties of the attacked argument
/// does not exceed the one of the properties of the attacker.
///
/// Arguments are referred to by their ids in the argument set of the framework.
/// Properties with no declared weight weigh 0; arguments with no declared property set have no property.
pub struct PropertyModel<T>
where
    T: LabelType,
{
    properties: LabelSet<T>,
    weights: Vec<i64>,
    argument_properties: Vec<Vec<usize>>,
    legal_states: Vec<BTreeSet<usize>>,
}

impl<T> Default for PropertyModel<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new(LabelSet::default(), vec![], vec![], vec![])
    }
}

impl<T> PropertyModel<T>
where
    T: LabelType,
{
    pub(crate) fn new(
        properties: LabelSet<T>,
        weights: Vec<i64>,
        argument_properties: Vec<Vec<usize>>,
        legal_states: Vec<BTreeSet<usize>>,
    ) -> Self {
        let mut distinct_states: Vec<BTreeSet<usize>> = Vec::with_capacity(legal_states.len());
        for s in legal_states {
            if !distinct_states.contains(&s) {
                distinct_states.push(s);
            }
        }
        Self {
            properties,
            weights,
            argument_properties,
            legal_states: distinct_states,
        }
    }

    /// Returns the set of declared properties.
    pub fn property_set(&self) -> &LabelSet<T> {
        &self.properties
    }

    /// Returns the weight of the property with the given id.
    pub fn weight_of(&self, property_id: usize) -> i64 {
        self.weights.get(property_id).copied().unwrap_or_default()
    }

    /// Returns the ids of the properties of the argument with the given id.
    pub fn property_ids_of(&self, argument_id: usize) -> &[usize] {
        self.argument_properties
            .get(argument_id)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Returns the legal motivational states, in declaration order.
    ///
    /// States declared several times (possibly with another property order) appear once.
    pub fn legal_states(&self) -> &[BTreeSet<usize>] {
        &self.legal_states
    }

    /// Returns `true` iff the set of properties is a legal motivational state, regardless of the order of the properties.
    pub fn is_legal<'a, I>(&self, state: I) -> bool
    where
        I: IntoIterator<Item = &'a usize>,
    {
        let state = state.into_iter().copied().collect::<BTreeSet<usize>>();
        self.legal_states.contains(&state)
    }

    /// Iterates over the legal motivational states that include the given one.
    pub fn legal_supersets<'a>(
        &'a self,
        state: &'a IndexSet<usize>,
    ) -> impl Iterator<Item = &'a BTreeSet<usize>> + 'a {
        self.legal_states
            .iter()
            .filter(move |legal| state.iter().all(|p| legal.contains(p)))
    }

    /// Computes the weight of a set of properties under a motivational state.
    ///
    /// The sum is computed on 128 bits, so that it cannot overflow whatever the declared weights.
    pub fn weight_under<F>(&self, properties: &[usize], in_state: F) -> i128
    where
        F: Fn(usize) -> bool,
    {
        properties
            .iter()
            .filter(|p| in_state(**p))
            .map(|p| i128::from(self.weight_of(*p)))
            .sum()
    }

    /// Returns `true` iff the attack between the arguments with the given ids is enabled under the motivational state.
    ///
    /// The motivational state is given as a membership predicate over property ids.
    pub fn is_enabled<F>(&self, attacker: usize, attacked: usize, in_state: F) -> bool
    where
        F: Fn(usize) -> bool,
    {
        self.weight_under(self.property_ids_of(attacked), &in_state)
            <= self.weight_under(self.property_ids_of(attacker), &in_state)
    }
}
