use crate::aa::ArgumentationModel;
use crate::utils::LabelType;
use std::fmt::Display;

/// The participants of a dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The participant defending the claim.
    Proponent,
    /// The participant challenging the claim.
    Opponent,
}

/// A step of a dialogue.
///
/// Attacks are given as (attacker, attacked) couples.
/// The speaker of a move is determined by its kind (see [`Move::speaker`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move<T> {
    /// The opponent attacks the current claim.
    Challenge {
        /// the challenging argument
        attacker: T,
        /// the challenged argument
        attacked: T,
    },
    /// The opponent has no challenge left against the current claim.
    Concede,
    /// The proponent answers a challenge with a counter-attack.
    Defend {
        /// the defending argument
        attacker: T,
        /// the challenging argument
        attacked: T,
    },
    /// The proponent answers a challenge with an argument it has already put forward.
    AlreadyAccepted {
        /// the defending argument
        attacker: T,
        /// the challenging argument
        attacked: T,
    },
    /// The proponent answers a challenge with a counter-attack that only holds in some framework states.
    HypotheticalAssert {
        /// the defending argument
        attacker: T,
        /// the challenging argument
        attacked: T,
    },
    /// The proponent answers a challenge by denying it holds in some framework states.
    HypotheticalDeny {
        /// the challenging argument
        attacker: T,
        /// the challenged argument
        attacked: T,
    },
    /// The proponent extends the motivational state to enable its next counter-attack.
    EnableProperty(Vec<T>),
    /// The proponent answers a challenge by extending the motivational state so that it disables the challenge.
    DefendWithProperty(Vec<T>),
    /// The proponent wins the dialogue.
    Win,
}

impl<T> Move<T> {
    /// Returns the participant making this move.
    pub fn speaker(&self) -> Speaker {
        match self {
            Move::Challenge { .. } | Move::Concede => Speaker::Opponent,
            _ => Speaker::Proponent,
        }
    }

    pub(crate) fn map_labels<U, FA, FP>(self, arg: FA, prop: FP) -> Move<U>
    where
        FA: Fn(T) -> U,
        FP: Fn(T) -> U,
    {
        match self {
            Move::Challenge { attacker, attacked } => Move::Challenge {
                attacker: arg(attacker),
                attacked: arg(attacked),
            },
            Move::Concede => Move::Concede,
            Move::Defend { attacker, attacked } => Move::Defend {
                attacker: arg(attacker),
                attacked: arg(attacked),
            },
            Move::AlreadyAccepted { attacker, attacked } => Move::AlreadyAccepted {
                attacker: arg(attacker),
                attacked: arg(attacked),
            },
            Move::HypotheticalAssert { attacker, attacked } => Move::HypotheticalAssert {
                attacker: arg(attacker),
                attacked: arg(attacked),
            },
            Move::HypotheticalDeny { attacker, attacked } => Move::HypotheticalDeny {
                attacker: arg(attacker),
                attacked: arg(attacked),
            },
            Move::EnableProperty(props) => Move::EnableProperty(props.into_iter().map(prop).collect()),
            Move::DefendWithProperty(props) => {
                Move::DefendWithProperty(props.into_iter().map(prop).collect())
            }
            Move::Win => Move::Win,
        }
    }
}

fn fmt_list<T: Display>(list: &[T]) -> String {
    list.iter()
        .map(|t| t.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

impl<T> Display for Move<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Challenge { attacker, attacked } => write!(f, "opp {} {}", attacker, attacked),
            Move::Concede => write!(f, "opp ok"),
            Move::Defend { attacker, attacked } => write!(f, "pro {} {}", attacker, attacked),
            Move::AlreadyAccepted { attacker, attacked } => {
                write!(f, "pro(alreadyAccepted) {} {}", attacker, attacked)
            }
            Move::HypotheticalAssert { attacker, attacked } => {
                write!(f, "pro(assert) {} {}", attacker, attacked)
            }
            Move::HypotheticalDeny { attacker, attacked } => {
                write!(f, "pro(deny) {} {}", attacker, attacked)
            }
            Move::EnableProperty(props) => write!(f, "pro(enable) [{}]", fmt_list(props)),
            Move::DefendWithProperty(props) => write!(f, "pro(property) [{}]", fmt_list(props)),
            Move::Win => write!(f, "pro win"),
        }
    }
}

/// A sequence of moves between the proponent and the opponent.
///
/// Dialogues produced by the solvers of this crate are terminal, i.e. they end with [`Move::Win`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialogue<T> {
    moves: Vec<Move<T>>,
}

impl<T> Dialogue<T>
where
    T: LabelType,
{
    pub(crate) fn from_id_moves(moves: Vec<Move<usize>>, model: &ArgumentationModel<T>) -> Self {
        let arguments = model.framework().argument_set();
        let properties = model.properties().property_set();
        Dialogue {
            moves: moves
                .into_iter()
                .map(|m| {
                    m.map_labels(
                        |a| arguments.get_label_by_id(a).label().clone(),
                        |p| properties.get_label_by_id(p).label().clone(),
                    )
                })
                .collect(),
        }
    }

    /// Returns the moves of the dialogue.
    pub fn moves(&self) -> &[Move<T>] {
        &self.moves
    }

    /// Returns `true` iff the last move of the dialogue is a win.
    pub fn is_terminal(&self) -> bool {
        matches!(self.moves.last(), Some(Move::Win))
    }

    /// Returns the moves as strings, as displayed by [`Move`].
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::{AAFramework, ArgumentSet, ArgumentationModel};
    /// # use dialabri::dialogues::DialogueSolver;
    /// let model = ArgumentationModel::from(AAFramework::new(ArgumentSet::new_with_labels(&["a"])));
    /// let solver = DialogueSolver::new(&model);
    /// let a = model.framework().argument_set().get_label(&"a").unwrap();
    /// let dialogue = solver.skeptical_dialogues(a).next().unwrap();
    /// assert_eq!(vec!["opp ok", "pro win"], dialogue.trace());
    /// ```
    pub fn trace(&self) -> Vec<String> {
        self.moves.iter().map(|m| m.to_string()).collect()
    }
}

impl<T> Display for Dialogue<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, m) in self.moves.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// A winning dialogue of the abductive game, along with the framework states it holds in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbductiveExplanation<T> {
    pub(crate) states: Vec<T>,
    pub(crate) dialogue: Dialogue<T>,
}

impl<T> AbductiveExplanation<T> {
    /// Returns the labels of the framework states that remain active at the end of the dialogue.
    pub fn states(&self) -> &[T] {
        &self.states
    }

    /// Returns the dialogue.
    pub fn dialogue(&self) -> &Dialogue<T> {
        &self.dialogue
    }
}

/// A winning dialogue of the property-based game, along with the commitments it relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeakAcceptanceDialogue<T> {
    pub(crate) dialogue: Dialogue<T>,
    pub(crate) motivational_state: Vec<T>,
    pub(crate) disabled_attacks: Vec<(T, T)>,
    pub(crate) enabled_attacks: Vec<(T, T)>,
}

impl<T> WeakAcceptanceDialogue<T> {
    /// Returns the dialogue.
    pub fn dialogue(&self) -> &Dialogue<T> {
        &self.dialogue
    }

    /// Returns the final motivational state, in the order the properties were added.
    pub fn motivational_state(&self) -> &[T] {
        &self.motivational_state
    }

    /// Returns the attacks that are disabled under the final motivational state.
    pub fn disabled_attacks(&self) -> &[(T, T)] {
        &self.disabled_attacks
    }

    /// Returns the attacks that are enabled under the final motivational state.
    pub fn enabled_attacks(&self) -> &[(T, T)] {
        &self.enabled_attacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speakers() {
        assert_eq!(Speaker::Opponent, Move::<&str>::Concede.speaker());
        assert_eq!(
            Speaker::Opponent,
            Move::Challenge {
                attacker: "a",
                attacked: "b"
            }
            .speaker()
        );
        assert_eq!(Speaker::Proponent, Move::<&str>::Win.speaker());
        assert_eq!(
            Speaker::Proponent,
            Move::DefendWithProperty(vec!["rr"]).speaker()
        );
    }

    #[test]
    fn test_display() {
        let moves = vec![
            Move::Challenge {
                attacker: "c",
                attacked: "d",
            },
            Move::AlreadyAccepted {
                attacker: "a",
                attacked: "b",
            },
            Move::HypotheticalDeny {
                attacker: "a",
                attacked: "b",
            },
            Move::EnableProperty(vec!["rr", "gg"]),
            Move::DefendWithProperty(vec![]),
            Move::Concede,
            Move::Win,
        ];
        let dialogue = Dialogue { moves };
        assert_eq!(
            "opp c d\npro(alreadyAccepted) a b\npro(deny) a b\npro(enable) [rr,gg]\npro(property) []\nopp ok\npro win",
            dialogue.to_string()
        );
        assert!(dialogue.is_terminal());
    }

    #[test]
    fn test_map_labels() {
        let names = ["a", "b"];
        let props = ["rr"];
        let m = Move::Defend {
            attacker: 1,
            attacked: 0,
        }
        .map_labels(|a| names[a], |p| props[p]);
        assert_eq!(
            Move::Defend {
                attacker: "b",
                attacked: "a"
            },
            m
        );
        let m = Move::EnableProperty(vec![0]).map_labels(|a| names[a], |p| props[p]);
        assert_eq!(Move::EnableProperty(vec!["rr"]), m);
    }
}
