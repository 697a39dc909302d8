use super::{
    dispute::{dispute, sub_dispute, Branches, DisputeState, ProponentStrategy},
    Dialogue, Move, WeakAcceptanceDialogue,
};
use crate::{
    aa::{AAFramework, Argument, ArgumentationModel, PropertyModel},
    utils::LabelType,
};
use indexmap::IndexSet;
use log::{debug, trace};
use std::collections::BTreeSet;

/// A solver building dialogues for the weak acceptance of arguments, given weighted properties.
///
/// Whether an attack succeeds depends on a motivational state, i.e. a set of properties:
/// an attack is enabled if the properties of the attacker weigh at least as much as the ones of the attacked argument,
/// only the properties in the motivational state being counted.
///
/// The motivational state starts empty and is extended by the proponent along the dialogue, each extension being a legal motivational state.
/// The proponent answers a challenge either by a counter-attack, extending the motivational state first if the counter-attack is disabled,
/// or by extending the motivational state so that the challenge gets disabled.
/// The counter-attacks of the proponent must remain enabled, and the challenges it disabled must remain disabled, under every later extension.
///
/// Each dialogue comes with the final motivational state and the attacks it must disable and enable.
pub struct PropertyDialogueSolver<'a, T>
where
    T: LabelType,
{
    model: &'a ArgumentationModel<T>,
    game: PropertyGame<'a, T>,
}

impl<'a, T> PropertyDialogueSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new solver for the properties and motivational states of a model.
    pub fn new(model: &'a ArgumentationModel<T>) -> Self {
        Self {
            model,
            game: PropertyGame {
                af: model.framework(),
                properties: model.properties(),
            },
        }
    }

    /// Enumerates the dialogues proving the weak acceptance of the claim.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::ModelBuilder;
    /// # use dialabri::dialogues::PropertyDialogueSolver;
    /// let mut builder = ModelBuilder::default();
    /// builder.add_argument("a");
    /// builder.add_argument("b");
    /// builder.add_attack("b", "a");
    /// builder.add_property("p");
    /// builder.add_argument_properties("a", vec!["p"]);
    /// builder.add_weight("p", 1);
    /// builder.add_motivational_state(vec!["p"]);
    /// let model = builder.build().unwrap();
    /// let solver = PropertyDialogueSolver::new(&model);
    /// let a = model.framework().argument_set().get_label(&"a").unwrap();
    /// let dialogue = solver.weak_acceptance_dialogues(a).next().unwrap();
    /// assert_eq!(vec!["opp b a", "pro(property) [p]", "opp ok", "pro win"], dialogue.dialogue().trace());
    /// assert_eq!(&["p"], dialogue.motivational_state());
    /// assert_eq!(&[("b", "a")], dialogue.disabled_attacks());
    /// ```
    pub fn weak_acceptance_dialogues(
        &self,
        claim: &Argument<T>,
    ) -> impl Iterator<Item = WeakAcceptanceDialogue<T>> + '_ {
        debug!(
            "looking for weak acceptance dialogues about {} with {} legal motivational states",
            claim,
            self.game.properties.legal_states().len()
        );
        dispute(&self.game, claim.id(), PropertyState::default())
            .map(move |state| self.to_weak_acceptance_dialogue(state))
    }

    fn to_weak_acceptance_dialogue(&self, state: PropertyState) -> WeakAcceptanceDialogue<T> {
        let arguments = self.model.framework().argument_set();
        let properties = self.model.properties().property_set();
        let attack_labels = |attacks: &IndexSet<(usize, usize)>| -> Vec<(T, T)> {
            attacks
                .iter()
                .map(|(from, to)| {
                    (
                        arguments.get_label_by_id(*from).label().clone(),
                        arguments.get_label_by_id(*to).label().clone(),
                    )
                })
                .collect()
        };
        WeakAcceptanceDialogue {
            motivational_state: state
                .motivational_state
                .iter()
                .map(|p| properties.get_label_by_id(*p).label().clone())
                .collect(),
            disabled_attacks: attack_labels(&state.disabled),
            enabled_attacks: attack_labels(&state.enabled),
            dialogue: Dialogue::from_id_moves(state.moves, self.model),
        }
    }
}

#[derive(Clone, Default)]
struct PropertyState {
    moves: Vec<Move<usize>>,
    used_by_proponent: IndexSet<(usize, usize)>,
    disabled: IndexSet<(usize, usize)>,
    enabled: IndexSet<(usize, usize)>,
    motivational_state: IndexSet<usize>,
}

impl PropertyState {
    fn extend_motivational_state(&mut self, properties: &[usize]) {
        self.motivational_state.extend(properties.iter().copied());
    }
}

impl DisputeState for PropertyState {
    fn push_move(&mut self, m: Move<usize>) {
        self.moves.push(m)
    }

    fn line_attacks(&mut self) -> &mut IndexSet<(usize, usize)> {
        &mut self.used_by_proponent
    }
}

struct PropertyGame<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    properties: &'a PropertyModel<T>,
}

impl<T> PropertyGame<'_, T>
where
    T: LabelType,
{
    fn is_enabled_under(&self, attack: &(usize, usize), legal: &BTreeSet<usize>) -> bool {
        self.properties
            .is_enabled(attack.0, attack.1, |p| legal.contains(&p))
    }

    fn is_enabled(&self, attack: &(usize, usize), state: &PropertyState) -> bool {
        self.properties.is_enabled(attack.0, attack.1, |p| {
            state.motivational_state.contains(&p)
        })
    }

    /// Lists the properties to add to the motivational state to reach each legal superset keeping the commitments of the proponent.
    ///
    /// If `to_enable` is set, the legal supersets under which this attack is disabled are discarded.
    fn extensions(&self, state: &PropertyState, to_enable: Option<(usize, usize)>) -> Vec<Vec<usize>> {
        let result = self
            .properties
            .legal_supersets(&state.motivational_state)
            .filter(|legal| {
                to_enable
                    .iter()
                    .chain(state.enabled.iter())
                    .all(|a| self.is_enabled_under(a, legal))
                    && state
                        .disabled
                        .iter()
                        .all(|a| !self.is_enabled_under(a, legal))
            })
            .map(|legal| {
                legal
                    .iter()
                    .copied()
                    .filter(|p| !state.motivational_state.contains(p))
                    .collect()
            })
            .collect::<Vec<Vec<usize>>>();
        if result.is_empty() {
            trace!(
                "no legal motivational state extends {:?} (enabling {:?})",
                state.motivational_state,
                to_enable
            );
        }
        result
    }

    fn defend_with_attackers<'b>(
        &'b self,
        state: &PropertyState,
        challenger: usize,
    ) -> Branches<'b, PropertyState> {
        let mut ready = vec![];
        for defender in self.af.attacker_ids(challenger).iter().copied() {
            let attack = (defender, challenger);
            if state.used_by_proponent.contains(&attack) {
                continue;
            }
            if self.is_enabled(&attack, state) {
                ready.push((attack, state.clone()));
                continue;
            }
            for added in self.extensions(state, Some(attack)) {
                let mut enabling = state.clone();
                enabling.extend_motivational_state(&added);
                enabling.push_move(Move::EnableProperty(added));
                ready.push((attack, enabling));
            }
        }
        Box::new(ready.into_iter().flat_map(move |(attack, mut defended)| {
            defended.enabled.insert(attack);
            defended.push_move(Move::Defend {
                attacker: attack.0,
                attacked: attack.1,
            });
            sub_dispute(self, attack.0, attack.1, defended)
        }))
    }

    fn defend_with_properties(
        &self,
        state: &PropertyState,
        challenger: usize,
        challenged: usize,
    ) -> Vec<PropertyState> {
        let mut disabling = state.clone();
        disabling.disabled.insert((challenger, challenged));
        self.extensions(&disabling, None)
            .into_iter()
            .map(|added| {
                let mut defended = disabling.clone();
                defended.extend_motivational_state(&added);
                defended.push_move(Move::DefendWithProperty(added));
                defended
            })
            .collect()
    }
}

impl<T> ProponentStrategy for PropertyGame<'_, T>
where
    T: LabelType,
{
    type State = PropertyState;

    fn attacker_ids(&self, arg_id: usize) -> &[usize] {
        self.af.attacker_ids(arg_id)
    }

    fn answer<'b>(
        &'b self,
        state: PropertyState,
        challenger: usize,
        challenged: usize,
    ) -> Branches<'b, PropertyState> {
        let by_properties = self.defend_with_properties(&state, challenger, challenged);
        Box::new(
            self.defend_with_attackers(&state, challenger)
                .chain(by_properties),
        )
    }
}
