use super::{
    framework_states::find_expansion_cycle, AAFramework, Argument, ArgumentSet, Attack,
    FrameworkState, FrameworkStates, PropertyModel,
};
use crate::utils::{LabelSet, LabelType};
use anyhow::Result;
use std::collections::BTreeSet;
use thiserror::Error;

/// The structural errors detected while building an [`ArgumentationModel`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidModel {
    /// An argument is used but never declared.
    #[error(r#"undeclared argument "{argument}" in {context}"#)]
    UndeclaredArgument {
        /// the argument
        argument: String,
        /// the fact involving the argument
        context: String,
    },
    /// A framework state is used but never declared.
    #[error(r#"undeclared framework state "{state}" in {context}"#)]
    UndeclaredState {
        /// the state
        state: String,
        /// the fact involving the state
        context: String,
    },
    /// A framework state is declared as the expansion of two distinct states.
    #[error(r#"framework state "{0}" is declared as the expansion of more than one state"#)]
    ConflictingExpansion(String),
    /// The expansion relation between framework states is cyclic.
    #[error(r#"framework state "{0}" is involved in an expansion cycle"#)]
    ExpansionCycle(String),
    /// A property is used but never declared.
    #[error(r#"undeclared property "{property}" in {context}"#)]
    UndeclaredProperty {
        /// the property
        property: String,
        /// the fact involving the property
        context: String,
    },
    /// A property is given two distinct weights.
    #[error(r#"property "{0}" is given more than one weight"#)]
    ConflictingWeight(String),
}

/// The read-only model queried by the dialogue engines.
///
/// It gathers an attack graph, the framework states used for abduction and the property-based material used for weak acceptance.
/// The attack graph contains the top-level arguments and attacks, and the ones of each framework state.
///
/// Models are built by a [`ModelBuilder`].
pub struct ArgumentationModel<T>
where
    T: LabelType,
{
    framework: AAFramework<T>,
    states: FrameworkStates<T>,
    properties: PropertyModel<T>,
}

impl<T> From<AAFramework<T>> for ArgumentationModel<T>
where
    T: LabelType,
{
    fn from(framework: AAFramework<T>) -> Self {
        Self {
            framework,
            states: FrameworkStates::default(),
            properties: PropertyModel::default(),
        }
    }
}

impl<T> ArgumentationModel<T>
where
    T: LabelType,
{
    /// Returns the attack graph.
    pub fn framework(&self) -> &AAFramework<T> {
        &self.framework
    }

    /// Returns the framework states.
    pub fn states(&self) -> &FrameworkStates<T> {
        &self.states
    }

    /// Returns the properties, weights and legal motivational states.
    pub fn properties(&self) -> &PropertyModel<T> {
        &self.properties
    }

    /// Returns the arguments of a framework state, including the inherited ones, in id order.
    pub fn effective_arguments(&self, state: &FrameworkState<T>) -> Vec<&Argument<T>> {
        let mut ids = self
            .states
            .effective_argument_ids(state.id())
            .iter()
            .copied()
            .collect::<Vec<usize>>();
        ids.sort_unstable();
        ids.into_iter()
            .map(|id| self.framework.argument_set().get_label_by_id(id))
            .collect()
    }

    /// Returns the attacks of a framework state, including the inherited ones, in attack graph order.
    pub fn effective_attacks(&self, state: &FrameworkState<T>) -> Vec<Attack<'_, T>> {
        self.framework
            .iter_attacks()
            .filter(|att| {
                self.states.has_effective_attack(
                    state.id(),
                    att.attacker().id(),
                    att.attacked().id(),
                )
            })
            .collect()
    }
}

/// A builder for [`ArgumentationModel`] objects.
///
/// Facts may be declared in any order; they are checked when [`build`](Self::build) is called.
///
/// # Example
///
/// ```
/// # use dialabri::aa::{InvalidModel, ModelBuilder};
/// let mut builder = ModelBuilder::default();
/// builder.add_argument("a");
/// builder.add_attack("a", "b");
/// let err = builder.build().err().unwrap();
/// assert!(matches!(
///     err.downcast_ref::<InvalidModel>(),
///     Some(InvalidModel::UndeclaredArgument { .. })
/// ));
/// ```
pub struct ModelBuilder<T>
where
    T: LabelType,
{
    arguments: Vec<T>,
    attacks: Vec<(T, T)>,
    states: Vec<T>,
    expansions: Vec<(T, T)>,
    state_arguments: Vec<(T, T)>,
    state_attacks: Vec<(T, T, T)>,
    properties: Vec<T>,
    argument_properties: Vec<(T, Vec<T>)>,
    motivational_states: Vec<Vec<T>>,
    weights: Vec<(T, i64)>,
}

impl<T> Default for ModelBuilder<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self {
            arguments: vec![],
            attacks: vec![],
            states: vec![],
            expansions: vec![],
            state_arguments: vec![],
            state_attacks: vec![],
            properties: vec![],
            argument_properties: vec![],
            motivational_states: vec![],
            weights: vec![],
        }
    }
}

impl<T> ModelBuilder<T>
where
    T: LabelType,
{
    /// Declares an argument (`arg(X)`).
    pub fn add_argument(&mut self, argument: T) {
        self.arguments.push(argument);
    }

    /// Declares an attack (`att(X,Y)`).
    pub fn add_attack(&mut self, attacker: T, attacked: T) {
        self.attacks.push((attacker, attacked));
    }

    /// Declares a framework state (`afstate(S)`).
    pub fn add_state(&mut self, state: T) {
        self.states.push(state);
    }

    /// Declares a state as the expansion of another one (`expansionOf(S1,S2)`).
    pub fn add_expansion(&mut self, expansion: T, expanded: T) {
        self.expansions.push((expansion, expanded));
    }

    /// Declares an argument of a framework state (`argInState(X,S)`).
    ///
    /// The argument is also added to the attack graph.
    pub fn add_argument_in_state(&mut self, argument: T, state: T) {
        self.state_arguments.push((argument, state));
    }

    /// Declares an attack of a framework state (`attInState(X,Y,S)`).
    ///
    /// The attack is also added to the attack graph.
    pub fn add_attack_in_state(&mut self, attacker: T, attacked: T, state: T) {
        self.state_attacks.push((attacker, attacked, state));
    }

    /// Declares a property (`prp(P)`).
    pub fn add_property(&mut self, property: T) {
        self.properties.push(property);
    }

    /// Sets properties to an argument (`prp(X,PS)`).
    ///
    /// Successive declarations for the same argument are merged.
    pub fn add_argument_properties(&mut self, argument: T, properties: Vec<T>) {
        self.argument_properties.push((argument, properties));
    }

    /// Declares a legal motivational state (`ms(PS)`).
    pub fn add_motivational_state(&mut self, properties: Vec<T>) {
        self.motivational_states.push(properties);
    }

    /// Sets the weight of a property (`weight(P,N)`).
    pub fn add_weight(&mut self, property: T, weight: i64) {
        self.weights.push((property, weight));
    }

    /// Checks the declarations and builds the model.
    ///
    /// Structural errors are returned as [`InvalidModel`] instances wrapped into [`anyhow::Error`].
    pub fn build(self) -> Result<ArgumentationModel<T>> {
        let arguments = ArgumentSet::new_with_labels(
            &self
                .arguments
                .iter()
                .chain(self.state_arguments.iter().map(|(a, _)| a))
                .cloned()
                .collect::<Vec<T>>(),
        );
        let mut framework = AAFramework::new(arguments);
        for (from, to) in self.attacks.iter() {
            let context = || format!("att({},{})", from, to);
            let from_id = argument_id(&framework, from, context)?;
            let to_id = argument_id(&framework, to, context)?;
            framework.new_attack_by_ids(from_id, to_id)?;
        }
        let states = self.build_states(&mut framework)?;
        let properties = self.build_properties(&framework)?;
        Ok(ArgumentationModel {
            framework,
            states,
            properties,
        })
    }

    fn build_states(&self, framework: &mut AAFramework<T>) -> Result<FrameworkStates<T>> {
        let states = LabelSet::new_with_labels(&self.states);
        let mut expansion_of = vec![None; states.len()];
        for (expansion, expanded) in self.expansions.iter() {
            let context = || format!("expansionOf({},{})", expansion, expanded);
            let expansion_id = state_id(&states, expansion, context)?;
            let expanded_id = state_id(&states, expanded, context)?;
            match expansion_of[expansion_id] {
                Some(other) if other != expanded_id => {
                    return Err(InvalidModel::ConflictingExpansion(expansion.to_string()).into())
                }
                _ => expansion_of[expansion_id] = Some(expanded_id),
            }
        }
        if let Some(id) = find_expansion_cycle(&expansion_of) {
            return Err(
                InvalidModel::ExpansionCycle(states.get_label_by_id(id).to_string()).into(),
            );
        }
        let mut own_arguments = vec![vec![]; states.len()];
        for (argument, state) in self.state_arguments.iter() {
            let context = || format!("argInState({},{})", argument, state);
            let s = state_id(&states, state, context)?;
            own_arguments[s].push(argument_id(framework, argument, context)?);
        }
        let mut own_attacks = vec![vec![]; states.len()];
        for (from, to, state) in self.state_attacks.iter() {
            let context = || format!("attInState({},{},{})", from, to, state);
            let s = state_id(&states, state, context)?;
            let from_id = argument_id(framework, from, context)?;
            let to_id = argument_id(framework, to, context)?;
            framework.new_attack_by_ids(from_id, to_id)?;
            own_attacks[s].push((from_id, to_id));
        }
        Ok(FrameworkStates::new(
            states,
            expansion_of,
            own_arguments,
            own_attacks,
        ))
    }

    fn build_properties(&self, framework: &AAFramework<T>) -> Result<PropertyModel<T>> {
        let properties = LabelSet::new_with_labels(&self.properties);
        let mut argument_properties: Vec<Vec<usize>> = vec![vec![]; framework.n_arguments()];
        for (argument, props) in self.argument_properties.iter() {
            let context = || format!("prp({},{})", argument, list_to_string(props));
            let arg_id = argument_id(framework, argument, context)?;
            for p in props {
                let p_id = property_id(&properties, p, context)?;
                if !argument_properties[arg_id].contains(&p_id) {
                    argument_properties[arg_id].push(p_id);
                }
            }
        }
        let mut legal_states = Vec::with_capacity(self.motivational_states.len());
        for props in self.motivational_states.iter() {
            let context = || format!("ms({})", list_to_string(props));
            legal_states.push(
                props
                    .iter()
                    .map(|p| property_id(&properties, p, context))
                    .collect::<Result<BTreeSet<usize>, InvalidModel>>()?,
            );
        }
        let mut weights: Vec<Option<i64>> = vec![None; properties.len()];
        for (property, weight) in self.weights.iter() {
            let context = || format!("weight({},{})", property, weight);
            let p_id = property_id(&properties, property, context)?;
            match weights[p_id] {
                Some(w) if w != *weight => {
                    return Err(InvalidModel::ConflictingWeight(property.to_string()).into())
                }
                _ => weights[p_id] = Some(*weight),
            }
        }
        Ok(PropertyModel::new(
            properties,
            weights.into_iter().map(|w| w.unwrap_or_default()).collect(),
            argument_properties,
            legal_states,
        ))
    }
}

fn argument_id<T, F>(framework: &AAFramework<T>, argument: &T, context: F) -> Result<usize, InvalidModel>
where
    T: LabelType,
    F: Fn() -> String,
{
    framework
        .argument_set()
        .get_label(argument)
        .map(|a| a.id())
        .map_err(|_| InvalidModel::UndeclaredArgument {
            argument: argument.to_string(),
            context: context(),
        })
}

fn state_id<T, F>(states: &LabelSet<T>, state: &T, context: F) -> Result<usize, InvalidModel>
where
    T: LabelType,
    F: Fn() -> String,
{
    states
        .get_label(state)
        .map(|s| s.id())
        .map_err(|_| InvalidModel::UndeclaredState {
            state: state.to_string(),
            context: context(),
        })
}

fn property_id<T, F>(properties: &LabelSet<T>, property: &T, context: F) -> Result<usize, InvalidModel>
where
    T: LabelType,
    F: Fn() -> String,
{
    properties
        .get_label(property)
        .map(|p| p.id())
        .map_err(|_| InvalidModel::UndeclaredProperty {
            property: property.to_string(),
            context: context(),
        })
}

fn list_to_string<T: LabelType>(list: &[T]) -> String {
    format!(
        "[{}]",
        list.iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>()
            .join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_model(builder: ModelBuilder<&'static str>) -> InvalidModel {
        builder
            .build()
            .err()
            .unwrap()
            .downcast::<InvalidModel>()
            .unwrap()
    }

    #[test]
    fn test_build_base_graph() {
        let mut builder = ModelBuilder::default();
        builder.add_argument("a");
        builder.add_argument("b");
        builder.add_attack("a", "b");
        builder.add_attack("a", "b");
        let model = builder.build().unwrap();
        assert_eq!(2, model.framework().n_arguments());
        assert_eq!(1, model.framework().n_attacks());
        assert!(model.states().is_empty());
    }

    #[test]
    fn test_undeclared_attack_endpoint() {
        let mut builder = ModelBuilder::default();
        builder.add_argument("a");
        builder.add_attack("a", "b");
        assert_eq!(
            InvalidModel::UndeclaredArgument {
                argument: "b".to_string(),
                context: "att(a,b)".to_string()
            },
            invalid_model(builder)
        );
    }

    #[test]
    fn test_states_extend_the_graph() {
        let mut builder = ModelBuilder::default();
        builder.add_state("s0");
        builder.add_state("s1");
        builder.add_expansion("s1", "s0");
        builder.add_argument_in_state("a", "s0");
        builder.add_argument_in_state("b", "s1");
        builder.add_attack_in_state("b", "a", "s1");
        let model = builder.build().unwrap();
        assert_eq!(2, model.framework().n_arguments());
        assert_eq!(1, model.framework().n_attacks());
        let s0 = model.states().state_set().get_label(&"s0").unwrap();
        let s1 = model.states().state_set().get_label(&"s1").unwrap();
        let labels = |args: Vec<&Argument<&'static str>>| {
            args.iter().map(|a| *a.label()).collect::<Vec<_>>()
        };
        assert_eq!(vec!["a"], labels(model.effective_arguments(s0)));
        assert_eq!(vec!["a", "b"], labels(model.effective_arguments(s1)));
        assert!(model.effective_attacks(s0).is_empty());
        assert_eq!(1, model.effective_attacks(s1).len());
    }

    #[test]
    fn test_expansion_cycle() {
        let mut builder = ModelBuilder::default();
        builder.add_state("s0");
        builder.add_state("s1");
        builder.add_expansion("s1", "s0");
        builder.add_expansion("s0", "s1");
        assert!(matches!(
            invalid_model(builder),
            InvalidModel::ExpansionCycle(_)
        ));
    }

    #[test]
    fn test_self_expansion() {
        let mut builder = ModelBuilder::default();
        builder.add_state("s0");
        builder.add_expansion("s0", "s0");
        assert_eq!(
            InvalidModel::ExpansionCycle("s0".to_string()),
            invalid_model(builder)
        );
    }

    #[test]
    fn test_conflicting_expansion() {
        let mut builder = ModelBuilder::default();
        builder.add_state("s0");
        builder.add_state("s1");
        builder.add_state("s2");
        builder.add_expansion("s2", "s0");
        builder.add_expansion("s2", "s1");
        assert_eq!(
            InvalidModel::ConflictingExpansion("s2".to_string()),
            invalid_model(builder)
        );
    }

    #[test]
    fn test_undeclared_state() {
        let mut builder = ModelBuilder::default();
        builder.add_argument_in_state("a", "s0");
        assert!(matches!(
            invalid_model(builder),
            InvalidModel::UndeclaredState { .. }
        ));
    }

    #[test]
    fn test_properties() {
        let mut builder = ModelBuilder::default();
        builder.add_argument("a");
        builder.add_property("rr");
        builder.add_property("gg");
        builder.add_argument_properties("a", vec!["rr"]);
        builder.add_argument_properties("a", vec!["gg", "rr"]);
        builder.add_motivational_state(vec!["gg", "rr"]);
        builder.add_weight("rr", 3);
        let model = builder.build().unwrap();
        let props = model.properties();
        assert_eq!(&[0, 1], props.property_ids_of(0));
        assert_eq!(3, props.weight_of(0));
        assert_eq!(0, props.weight_of(1));
        assert!(props.is_legal(&[0, 1]));
    }

    #[test]
    fn test_motivational_state_with_undeclared_property() {
        let mut builder = ModelBuilder::default();
        builder.add_property("rr");
        builder.add_motivational_state(vec!["rr", "gg"]);
        assert_eq!(
            InvalidModel::UndeclaredProperty {
                property: "gg".to_string(),
                context: "ms([rr,gg])".to_string()
            },
            invalid_model(builder)
        );
    }

    #[test]
    fn test_weight_of_undeclared_property() {
        let mut builder = ModelBuilder::default();
        builder.add_weight("rr", 1);
        assert!(matches!(
            invalid_model(builder),
            InvalidModel::UndeclaredProperty { .. }
        ));
    }

    #[test]
    fn test_conflicting_weights() {
        let mut builder = ModelBuilder::default();
        builder.add_property("rr");
        builder.add_weight("rr", 1);
        builder.add_weight("rr", 1);
        builder.add_weight("rr", 2);
        assert_eq!(
            InvalidModel::ConflictingWeight("rr".to_string()),
            invalid_model(builder)
        );
    }
}
