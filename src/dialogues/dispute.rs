use super::Move;
use indexmap::IndexSet;
use std::iter;

/// A lazy sequence of branches of a dispute, given by their states once resolved.
pub(crate) type Branches<'a, S> = Box<dyn Iterator<Item = S> + 'a>;

/// The state a branch of a dispute carries from move to move.
///
/// States are cloned when the dispute forks; a state never goes back to a previous branch.
pub(crate) trait DisputeState: Clone {
    /// Appends a move to the dialogue of this branch.
    fn push_move(&mut self, m: Move<usize>);

    /// Returns the counter-attacks the proponent played on the current line of the dispute.
    fn line_attacks(&mut self) -> &mut IndexSet<(usize, usize)>;
}

/// The rules of a game, given by the way the proponent may answer a challenge.
///
/// The opponent behaves the same way in every game (see [`opponent_turn`]).
pub(crate) trait ProponentStrategy {
    type State: DisputeState + 'static;

    /// Returns the ids of the arguments attacking the argument with the given id.
    fn attacker_ids(&self, arg_id: usize) -> &[usize];

    /// Enumerates the ways the proponent may answer the challenge of `challenged` by `challenger`.
    ///
    /// Each returned state is the one reached once the answer (and the sub-dispute it may open) is fully resolved.
    fn answer<'a>(
        &'a self,
        state: Self::State,
        challenger: usize,
        challenged: usize,
    ) -> Branches<'a, Self::State>;
}

/// Runs a whole dispute about a claim and appends the final win.
///
/// Each item of the returned iterator is the state of a branch the proponent wins.
pub(crate) fn dispute<'a, P>(
    proponent: &'a P,
    claim: usize,
    initial: P::State,
) -> Branches<'a, P::State>
where
    P: ProponentStrategy + 'a,
{
    Box::new(
        opponent_turn(proponent, claim, IndexSet::new(), initial).map(|mut state| {
            state.push_move(Move::Win);
            state
        }),
    )
}

/// Opens the sub-dispute about `defender`, the proponent having answered the challenge of `challenger` with it.
///
/// The counter-attack `(defender, challenger)` is recorded for the current line only:
/// once the sub-dispute is resolved, the line attacks of the caller are restored,
/// so that a later challenge on another line may be answered by the same counter-attack.
pub(crate) fn sub_dispute<'a, P>(
    proponent: &'a P,
    defender: usize,
    challenger: usize,
    mut state: P::State,
) -> Branches<'a, P::State>
where
    P: ProponentStrategy + 'a,
{
    let line = state.line_attacks().clone();
    state.line_attacks().insert((defender, challenger));
    Box::new(
        opponent_turn(proponent, defender, IndexSet::new(), state).map(move |mut resolved| {
            *resolved.line_attacks() = line.clone();
            resolved
        }),
    )
}

/// The opponent challenges `claim` with each of its attackers, one at a time.
///
/// Each attacker not in `used` is chosen in turn as the next challenge; once the proponent answered it,
/// the opponent plays again against the same claim, with the challenge marked as used.
/// When no challenge is left, the opponent concedes.
/// Each order in which the challenges are played is a distinct branch.
fn opponent_turn<'a, P>(
    proponent: &'a P,
    claim: usize,
    used: IndexSet<(usize, usize)>,
    state: P::State,
) -> Branches<'a, P::State>
where
    P: ProponentStrategy + 'a,
{
    let challengers = proponent
        .attacker_ids(claim)
        .iter()
        .copied()
        .filter(|y| !used.contains(&(*y, claim)))
        .collect::<Vec<usize>>();
    if challengers.is_empty() {
        let mut conceded = state;
        conceded.push_move(Move::Concede);
        return Box::new(iter::once(conceded));
    }
    Box::new(challengers.into_iter().flat_map(move |challenger| {
        let mut used_after = used.clone();
        used_after.insert((challenger, claim));
        let mut challenged = state.clone();
        challenged.push_move(Move::Challenge {
            attacker: challenger,
            attacked: claim,
        });
        proponent
            .answer(challenged, challenger, claim)
            .flat_map(move |answered| opponent_turn(proponent, claim, used_after.clone(), answered))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Trace(Vec<Move<usize>>, IndexSet<(usize, usize)>);

    impl DisputeState for Trace {
        fn push_move(&mut self, m: Move<usize>) {
            self.0.push(m)
        }

        fn line_attacks(&mut self) -> &mut IndexSet<(usize, usize)> {
            &mut self.1
        }
    }

    /// A proponent that never answers a challenge.
    struct Mute {
        attackers: Vec<Vec<usize>>,
    }

    impl ProponentStrategy for Mute {
        type State = Trace;

        fn attacker_ids(&self, arg_id: usize) -> &[usize] {
            &self.attackers[arg_id]
        }

        fn answer<'a>(&'a self, _: Trace, _: usize, _: usize) -> Branches<'a, Trace> {
            Box::new(iter::empty())
        }
    }

    /// A proponent that answers each challenge with a leaf move.
    struct Echo {
        attackers: Vec<Vec<usize>>,
    }

    impl ProponentStrategy for Echo {
        type State = Trace;

        fn attacker_ids(&self, arg_id: usize) -> &[usize] {
            &self.attackers[arg_id]
        }

        fn answer<'a>(
            &'a self,
            mut state: Trace,
            challenger: usize,
            challenged: usize,
        ) -> Branches<'a, Trace> {
            state.push_move(Move::HypotheticalDeny {
                attacker: challenger,
                attacked: challenged,
            });
            Box::new(iter::once(state))
        }
    }

    /// A proponent that answers each challenge with each attacker of the challenger not used on the current line.
    struct Defender {
        attackers: Vec<Vec<usize>>,
    }

    impl ProponentStrategy for Defender {
        type State = Trace;

        fn attacker_ids(&self, arg_id: usize) -> &[usize] {
            &self.attackers[arg_id]
        }

        fn answer<'a>(
            &'a self,
            state: Trace,
            challenger: usize,
            _: usize,
        ) -> Branches<'a, Trace> {
            let defenders = self.attackers[challenger]
                .iter()
                .copied()
                .filter(|z| !state.1.contains(&(*z, challenger)))
                .collect::<Vec<usize>>();
            Box::new(defenders.into_iter().flat_map(move |defender| {
                let mut defended = state.clone();
                defended.push_move(Move::Defend {
                    attacker: defender,
                    attacked: challenger,
                });
                sub_dispute(self, defender, challenger, defended)
            }))
        }
    }

    #[test]
    fn test_unattacked_claim() {
        let p = Mute {
            attackers: vec![vec![]],
        };
        let branches = dispute(&p, 0, Trace::default()).collect::<Vec<_>>();
        assert_eq!(1, branches.len());
        assert_eq!(vec![Move::Concede, Move::Win], branches[0].0);
    }

    #[test]
    fn test_unanswered_challenge() {
        let p = Mute {
            attackers: vec![vec![1], vec![]],
        };
        assert_eq!(0, dispute(&p, 0, Trace::default()).count());
    }

    #[test]
    fn test_every_challenge_order_is_a_branch() {
        let p = Echo {
            attackers: vec![vec![1, 2], vec![], vec![]],
        };
        let branches = dispute(&p, 0, Trace::default()).collect::<Vec<_>>();
        assert_eq!(2, branches.len());
        assert_eq!(
            Move::Challenge {
                attacker: 1,
                attacked: 0
            },
            branches[0].0[0]
        );
        assert_eq!(
            Move::Challenge {
                attacker: 2,
                attacked: 0
            },
            branches[1].0[0]
        );
        branches.iter().for_each(|b| {
            assert_eq!(6, b.0.len());
            assert_eq!(Move::Concede, b.0[4]);
        });
    }

    #[test]
    fn test_self_attack_is_challenged_once() {
        let p = Echo {
            attackers: vec![vec![0]],
        };
        let branches = dispute(&p, 0, Trace::default()).collect::<Vec<_>>();
        assert_eq!(1, branches.len());
        assert_eq!(4, branches[0].0.len());
    }

    #[test]
    fn test_counter_attack_is_reusable_on_another_line() {
        // 1 and 2 attack 0, 3 attacks 1, 4 attacks 2, 5 attacks 3 and 4, 6 attacks 5
        let p = Defender {
            attackers: vec![vec![1, 2], vec![3], vec![4], vec![5], vec![5], vec![6], vec![]],
        };
        let branches = dispute(&p, 0, Trace::default()).collect::<Vec<_>>();
        assert_eq!(2, branches.len());
        branches.iter().for_each(|b| {
            assert_eq!(14, b.0.len());
            assert_eq!(
                2,
                b.0.iter()
                    .filter(|m| **m
                        == Move::Defend {
                            attacker: 6,
                            attacked: 5
                        })
                    .count()
            );
            assert!(b.1.is_empty());
        });
    }

    #[test]
    fn test_line_attacks_forbid_loops() {
        let p = Defender {
            attackers: vec![vec![1], vec![0]],
        };
        assert_eq!(0, dispute(&p, 0, Trace::default()).count());
    }
}
