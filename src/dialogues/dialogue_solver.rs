use super::{
    dispute::{dispute, sub_dispute, Branches, DisputeState, ProponentStrategy},
    CredulousAcceptanceComputer, Dialogue, Move, SkepticalAcceptanceComputer,
};
use crate::{
    aa::{AAFramework, Argument, ArgumentationModel},
    utils::LabelType,
};
use indexmap::IndexSet;
use log::debug;
use std::iter;

/// A solver building dialogues for the skeptical and credulous acceptance of arguments.
///
/// In both games, the opponent challenges the claim with each of its attackers, and the proponent must answer each challenge.
///
/// In the skeptical game (grounded semantics), the proponent answers a challenge with a counter-attack it has not used so far on the current line of the dispute,
/// and the counter-attacking argument becomes the claim of a sub-dispute.
/// A counter-attack played on a line may be played again on another one.
/// A winning dialogue exists iff the claim belongs to the grounded extension.
///
/// In the credulous game (preferred semantics), the proponent maintains a set of accepted arguments (initially the claim) and a set of rejected ones
/// (the challengers it answered); these sets must remain disjoint.
/// The proponent answers a challenge either by pointing an already accepted argument attacking the challenger,
/// or by accepting a new counter-attacking argument, which becomes the claim of a sub-dispute.
/// A winning dialogue exists iff the claim belongs to a preferred extension.
///
/// Dialogues are computed lazily: the returned iterators explore the next branch only when the next dialogue is requested.
/// An empty iterator means the claim is not accepted.
pub struct DialogueSolver<'a, T>
where
    T: LabelType,
{
    model: &'a ArgumentationModel<T>,
    skeptical_game: SkepticalGame<'a, T>,
    credulous_game: CredulousGame<'a, T>,
}

impl<'a, T> DialogueSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new dialogue solver for the attack graph of a model.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::ArgumentationModel;
    /// # use dialabri::dialogues::DialogueSolver;
    /// # use dialabri::utils::LabelType;
    /// fn print_first_dialogue<T: LabelType>(model: &ArgumentationModel<T>, claim: &T) {
    ///     let solver = DialogueSolver::new(model);
    ///     let arg = model.framework().argument_set().get_label(claim).unwrap();
    ///     match solver.skeptical_dialogues(arg).next() {
    ///         Some(d) => println!("{} is skeptically accepted:\n{}", claim, d),
    ///         None => println!("{} is not skeptically accepted", claim),
    ///     };
    /// }
    /// ```
    pub fn new(model: &'a ArgumentationModel<T>) -> Self {
        let af = model.framework();
        Self {
            model,
            skeptical_game: SkepticalGame { af },
            credulous_game: CredulousGame { af },
        }
    }

    /// Enumerates the dialogues proving the skeptical acceptance of the claim.
    pub fn skeptical_dialogues(
        &self,
        claim: &Argument<T>,
    ) -> impl Iterator<Item = Dialogue<T>> + '_ {
        debug!("looking for skeptical dialogues about {}", claim);
        dispute(&self.skeptical_game, claim.id(), SkepticalState::default())
            .map(move |state| Dialogue::from_id_moves(state.moves, self.model))
    }

    /// Enumerates the dialogues proving the credulous acceptance of the claim.
    pub fn credulous_dialogues(
        &self,
        claim: &Argument<T>,
    ) -> impl Iterator<Item = Dialogue<T>> + '_ {
        debug!("looking for credulous dialogues about {}", claim);
        let initial = CredulousState {
            accepted: IndexSet::from([claim.id()]),
            ..Default::default()
        };
        dispute(&self.credulous_game, claim.id(), initial)
            .map(move |state| Dialogue::from_id_moves(state.moves, self.model))
    }
}

impl<T> SkepticalAcceptanceComputer<T> for DialogueSolver<'_, T>
where
    T: LabelType,
{
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> bool {
        self.skeptical_dialogues(arg).next().is_some()
    }

    fn is_skeptically_accepted_with_certificate(
        &mut self,
        arg: &Argument<T>,
    ) -> (bool, Option<Dialogue<T>>) {
        let certificate = self.skeptical_dialogues(arg).next();
        (certificate.is_some(), certificate)
    }
}

impl<T> CredulousAcceptanceComputer<T> for DialogueSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> bool {
        self.credulous_dialogues(arg).next().is_some()
    }

    fn is_credulously_accepted_with_certificate(
        &mut self,
        arg: &Argument<T>,
    ) -> (bool, Option<Dialogue<T>>) {
        let certificate = self.credulous_dialogues(arg).next();
        (certificate.is_some(), certificate)
    }
}

#[derive(Clone, Default)]
struct SkepticalState {
    moves: Vec<Move<usize>>,
    used_by_proponent: IndexSet<(usize, usize)>,
}

impl DisputeState for SkepticalState {
    fn push_move(&mut self, m: Move<usize>) {
        self.moves.push(m)
    }

    fn line_attacks(&mut self) -> &mut IndexSet<(usize, usize)> {
        &mut self.used_by_proponent
    }
}

struct SkepticalGame<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
}

impl<T> ProponentStrategy for SkepticalGame<'_, T>
where
    T: LabelType,
{
    type State = SkepticalState;

    fn attacker_ids(&self, arg_id: usize) -> &[usize] {
        self.af.attacker_ids(arg_id)
    }

    fn answer<'b>(
        &'b self,
        state: SkepticalState,
        challenger: usize,
        _challenged: usize,
    ) -> Branches<'b, SkepticalState> {
        let defenders = self
            .af
            .attacker_ids(challenger)
            .iter()
            .copied()
            .filter(|z| !state.used_by_proponent.contains(&(*z, challenger)))
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

#[derive(Clone, Default)]
struct CredulousState {
    moves: Vec<Move<usize>>,
    used_by_proponent: IndexSet<(usize, usize)>,
    accepted: IndexSet<usize>,
    rejected: IndexSet<usize>,
}

impl CredulousState {
    fn is_consistent(&self) -> bool {
        self.accepted.is_disjoint(&self.rejected)
    }
}

impl DisputeState for CredulousState {
    fn push_move(&mut self, m: Move<usize>) {
        self.moves.push(m)
    }

    fn line_attacks(&mut self) -> &mut IndexSet<(usize, usize)> {
        &mut self.used_by_proponent
    }
}

struct CredulousGame<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
}

impl<T> ProponentStrategy for CredulousGame<'_, T>
where
    T: LabelType,
{
    type State = CredulousState;

    fn attacker_ids(&self, arg_id: usize) -> &[usize] {
        self.af.attacker_ids(arg_id)
    }

    fn answer<'b>(
        &'b self,
        state: CredulousState,
        challenger: usize,
        _challenged: usize,
    ) -> Branches<'b, CredulousState> {
        let mut rejecting = state;
        rejecting.rejected.insert(challenger);
        if !rejecting.is_consistent() {
            return Box::new(iter::empty());
        }
        let (accepted_defenders, new_defenders): (Vec<usize>, Vec<usize>) = self
            .af
            .attacker_ids(challenger)
            .iter()
            .copied()
            .partition(|z| rejecting.accepted.contains(z));
        let already_accepted = accepted_defenders
            .into_iter()
            .map(|defender| {
                let mut answered = rejecting.clone();
                answered.push_move(Move::AlreadyAccepted {
                    attacker: defender,
                    attacked: challenger,
                });
                answered
            })
            .collect::<Vec<CredulousState>>();
        let defences = new_defenders
            .into_iter()
            .filter(|z| !rejecting.used_by_proponent.contains(&(*z, challenger)))
            .collect::<Vec<usize>>();
        Box::new(
            already_accepted
                .into_iter()
                .chain(defences.into_iter().flat_map(move |defender| {
                    let mut defended = rejecting.clone();
                    defended.accepted.insert(defender);
                    if !defended.is_consistent() {
                        return Box::new(iter::empty()) as Branches<'b, CredulousState>;
                    }
                    defended.push_move(Move::Defend {
                        attacker: defender,
                        attacked: challenger,
                    });
                    sub_dispute(self, defender, challenger, defended)
                })),
        )
    }
}
