use super::{
    dispute::{dispute, sub_dispute, Branches, DisputeState, ProponentStrategy},
    AbductiveExplanation, Dialogue, Move,
};
use crate::{
    aa::{AAFramework, Argument, ArgumentationModel, FrameworkStates},
    utils::LabelType,
};
use indexmap::IndexSet;
use log::{debug, trace};
use std::iter;

/// A solver looking for the framework states that explain the skeptical acceptance of an observation.
///
/// The game is played on the framework gathering the arguments and attacks of all the states.
/// Along a branch, the solver keeps the set of states that remain consistent with the answers of the proponent.
/// The proponent answers a challenge `(Y, X)` either by asserting a counter-attack `(Z, Y)`, which keeps the states in which this attack holds,
/// or by denying the challenge, which keeps the states in which `(Y, X)` does not hold.
/// A branch is abandoned as soon as no state remains.
///
/// Each explanation is made of the winning dialogue and the states still active at its end.
pub struct AbductiveDialogueSolver<'a, T>
where
    T: LabelType,
{
    model: &'a ArgumentationModel<T>,
    game: AbductiveGame<'a, T>,
}

impl<'a, T> AbductiveDialogueSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new abductive solver for the framework states of a model.
    pub fn new(model: &'a ArgumentationModel<T>) -> Self {
        Self {
            model,
            game: AbductiveGame {
                af: model.framework(),
                states: model.states(),
            },
        }
    }

    /// Enumerates the explanations of the skeptical acceptance of the claim.
    ///
    /// If the model declares no framework state, there is nothing to explain the claim with and the sequence is empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::ModelBuilder;
    /// # use dialabri::dialogues::AbductiveDialogueSolver;
    /// let mut builder = ModelBuilder::default();
    /// builder.add_state("s0");
    /// builder.add_state("s1");
    /// builder.add_argument_in_state("a", "s0");
    /// builder.add_argument_in_state("b", "s0");
    /// builder.add_attack_in_state("b", "a", "s1");
    /// let model = builder.build().unwrap();
    /// let solver = AbductiveDialogueSolver::new(&model);
    /// let a = model.framework().argument_set().get_label(&"a").unwrap();
    /// let explanations = solver.abductive_explanations(a).collect::<Vec<_>>();
    /// assert_eq!(1, explanations.len());
    /// assert_eq!(&["s0"], explanations[0].states());
    /// ```
    pub fn abductive_explanations(
        &self,
        claim: &Argument<T>,
    ) -> impl Iterator<Item = AbductiveExplanation<T>> + '_ {
        debug!(
            "looking for abductive explanations of {} among {} states",
            claim,
            self.game.states.len()
        );
        let branches: Branches<'_, AbductiveState> = if self.game.states.is_empty() {
            Box::new(iter::empty())
        } else {
            let initial = AbductiveState {
                active_states: (0..self.game.states.len()).collect(),
                ..Default::default()
            };
            dispute(&self.game, claim.id(), initial)
        };
        branches.map(move |state| {
            let state_set = self.model.states().state_set();
            AbductiveExplanation {
                states: state
                    .active_states
                    .iter()
                    .map(|s| state_set.get_label_by_id(*s).label().clone())
                    .collect(),
                dialogue: Dialogue::from_id_moves(state.moves, self.model),
            }
        })
    }
}

#[derive(Clone, Default)]
struct AbductiveState {
    moves: Vec<Move<usize>>,
    used_by_proponent: IndexSet<(usize, usize)>,
    active_states: IndexSet<usize>,
}

impl DisputeState for AbductiveState {
    fn push_move(&mut self, m: Move<usize>) {
        self.moves.push(m)
    }

    fn line_attacks(&mut self) -> &mut IndexSet<(usize, usize)> {
        &mut self.used_by_proponent
    }
}

struct AbductiveGame<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    states: &'a FrameworkStates<T>,
}

impl<T> AbductiveGame<'_, T>
where
    T: LabelType,
{
    fn filter_states(
        &self,
        active_states: &IndexSet<usize>,
        attack: (usize, usize),
        holds: bool,
    ) -> Option<IndexSet<usize>> {
        let filtered = active_states
            .iter()
            .copied()
            .filter(|s| self.states.has_effective_attack(*s, attack.0, attack.1) == holds)
            .collect::<IndexSet<usize>>();
        if filtered.is_empty() {
            trace!(
                "no state left after {} attack {:?}",
                if holds { "asserting" } else { "denying" },
                attack
            );
            None
        } else {
            Some(filtered)
        }
    }
}

impl<T> ProponentStrategy for AbductiveGame<'_, T>
where
    T: LabelType,
{
    type State = AbductiveState;

    fn attacker_ids(&self, arg_id: usize) -> &[usize] {
        self.af.attacker_ids(arg_id)
    }

    fn answer<'b>(
        &'b self,
        state: AbductiveState,
        challenger: usize,
        challenged: usize,
    ) -> Branches<'b, AbductiveState> {
        let assertions = self
            .af
            .attacker_ids(challenger)
            .iter()
            .copied()
            .filter(|z| !state.used_by_proponent.contains(&(*z, challenger)))
            .filter_map(|z| {
                self.filter_states(&state.active_states, (z, challenger), true)
                    .map(|active_states| (z, active_states))
            })
            .collect::<Vec<(usize, IndexSet<usize>)>>();
        let denial = self
            .filter_states(&state.active_states, (challenger, challenged), false)
            .map(|active_states| {
                let mut denied = state.clone();
                denied.active_states = active_states;
                denied.push_move(Move::HypotheticalDeny {
                    attacker: challenger,
                    attacked: challenged,
                });
                denied
            });
        Box::new(
            assertions
                .into_iter()
                .flat_map(move |(defender, active_states)| {
                    let mut asserted = state.clone();
                    asserted.active_states = active_states;
                    asserted.push_move(Move::HypotheticalAssert {
                        attacker: defender,
                        attacked: challenger,
                    });
                    sub_dispute(self, defender, challenger, asserted)
                })
                .chain(denial),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{FactsReader, InstanceReader};

    const INSTANCE: &str = r#"
    afstate(f). afstate(g1). afstate(g2). afstate(g3).
    expansionOf(g1,f).
    expansionOf(f,g2).
    expansionOf(g3,g2).
    argInState(a,g2). argInState(b,g2).
    attInState(a,b,g2).
    argInState(c,f). argInState(d,f).
    attInState(c,a,f).
    attInState(d,c,f).
    argInState(e,g1).
    attInState(e,d,g1).
    argInState(h,g3).
    "#;

    fn read_model(instance: &str) -> ArgumentationModel<String> {
        FactsReader::default()
            .read(&mut instance.as_bytes())
            .unwrap()
    }

    fn arg<'a>(model: &'a ArgumentationModel<String>, label: &str) -> &'a Argument<String> {
        model
            .framework()
            .argument_set()
            .get_label(&label.to_string())
            .unwrap()
    }

    #[test]
    fn test_reference_explanation() {
        let model = read_model(INSTANCE);
        let solver = AbductiveDialogueSolver::new(&model);
        let explanations = solver
            .abductive_explanations(arg(&model, "b"))
            .collect::<Vec<_>>();
        assert_eq!(1, explanations.len());
        assert_eq!(&["g1".to_string()], explanations[0].states());
        assert_eq!(
            vec![
                "opp a b",
                "pro(assert) c a",
                "opp d c",
                "pro(assert) e d",
                "opp ok",
                "opp ok",
                "opp ok",
                "pro win"
            ],
            explanations[0].dialogue().trace()
        );
    }

    #[test]
    fn test_explanations_are_nonempty_subsets() {
        let model = read_model(INSTANCE);
        let solver = AbductiveDialogueSolver::new(&model);
        let declared = model
            .states()
            .iter_states()
            .map(|s| s.label().clone())
            .collect::<Vec<_>>();
        for a in model.framework().argument_set().iter() {
            for explanation in solver.abductive_explanations(a) {
                assert!(!explanation.states().is_empty());
                assert!(explanation.states().iter().all(|s| declared.contains(s)));
                assert!(explanation.dialogue().is_terminal());
            }
        }
    }

    #[test]
    fn test_assertions_come_before_denials() {
        let model = read_model(INSTANCE);
        let solver = AbductiveDialogueSolver::new(&model);
        let explanations = solver
            .abductive_explanations(arg(&model, "a"))
            .collect::<Vec<_>>();
        assert_eq!(2, explanations.len());
        assert_eq!(&["f".to_string()], explanations[0].states());
        assert_eq!(
            vec![
                "opp c a",
                "pro(assert) d c",
                "opp e d",
                "pro(deny) e d",
                "opp ok",
                "opp ok",
                "pro win"
            ],
            explanations[0].dialogue().trace()
        );
        assert_eq!(
            &["g2".to_string(), "g3".to_string()],
            explanations[1].states()
        );
        assert_eq!(
            vec!["opp c a", "pro(deny) c a", "opp ok", "pro win"],
            explanations[1].dialogue().trace()
        );
    }

    #[test]
    fn test_assertion_shared_by_two_lines() {
        let model = read_model(
            r#"
            afstate(s). afstate(t).
            argInState(x,s). argInState(p,s). argInState(q,s).
            argInState(a,s). argInState(b,s). argInState(y,s). argInState(z,s).
            attInState(p,x,s). attInState(q,x,s).
            attInState(a,p,s). attInState(b,q,s).
            attInState(y,a,s). attInState(y,b,s).
            attInState(z,y,s).
            argInState(x,t).
            "#,
        );
        let solver = AbductiveDialogueSolver::new(&model);
        let explanations = solver
            .abductive_explanations(arg(&model, "x"))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![vec!["s"], vec!["t"], vec!["s"], vec!["t"]],
            explanations
                .iter()
                .map(|e| e.states().to_vec())
                .collect::<Vec<_>>()
        );
        assert_eq!(
            vec![
                "opp p x",
                "pro(assert) a p",
                "opp y a",
                "pro(assert) z y",
                "opp ok",
                "opp ok",
                "opp q x",
                "pro(assert) b q",
                "opp y b",
                "pro(assert) z y",
                "opp ok",
                "opp ok",
                "opp ok",
                "pro win"
            ],
            explanations[0].dialogue().trace()
        );
        assert_eq!(
            vec![
                "opp p x",
                "pro(deny) p x",
                "opp q x",
                "pro(deny) q x",
                "opp ok",
                "pro win"
            ],
            explanations[1].dialogue().trace()
        );
    }

    #[test]
    fn test_unattacked_claim_keeps_all_states() {
        let model = read_model(INSTANCE);
        let solver = AbductiveDialogueSolver::new(&model);
        let explanations = solver
            .abductive_explanations(arg(&model, "h"))
            .collect::<Vec<_>>();
        assert_eq!(1, explanations.len());
        assert_eq!(4, explanations[0].states().len());
        assert_eq!(
            vec!["opp ok", "pro win"],
            explanations[0].dialogue().trace()
        );
    }

    #[test]
    fn test_no_state() {
        let model = read_model("arg(a).\n");
        let solver = AbductiveDialogueSolver::new(&model);
        assert_eq!(0, solver.abductive_explanations(arg(&model, "a")).count());
    }

    #[test]
    fn test_self_attack_in_every_state() {
        let model = read_model("afstate(s).\nargInState(x,s).\nattInState(x,x,s).\n");
        let solver = AbductiveDialogueSolver::new(&model);
        assert_eq!(0, solver.abductive_explanations(arg(&model, "x")).count());
    }
}
