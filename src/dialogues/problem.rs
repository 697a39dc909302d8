use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// The problems the dialogue games are able to decide.
///
/// Problem strings follow the `QUERY-SEMANTICS` pattern used by ICCMA competitions;
/// `EX-GR` stands for the abductive explanations of a skeptical acceptance, and `WA-MS` for the weak acceptance under motivational states.
///
/// # Example
///
/// ```
/// # use dialabri::dialogues::Problem;
/// # use std::str::FromStr;
/// assert_eq!(Problem::SkepticalGrounded, Problem::from_str("DS-GR").unwrap());
/// assert_eq!("WA-MS", Problem::WeakAcceptance.as_ref());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr, IntoStaticStr)]
pub enum Problem {
    /// Skeptical acceptance under the grounded semantics.
    #[strum(serialize = "DS-GR")]
    SkepticalGrounded,
    /// Credulous acceptance under the complete semantics.
    #[strum(serialize = "DC-CO")]
    CredulousComplete,
    /// Credulous acceptance under the preferred semantics.
    #[strum(serialize = "DC-PR")]
    CredulousPreferred,
    /// Abductive explanations of the skeptical acceptance under the grounded semantics.
    #[strum(serialize = "EX-GR")]
    AbductiveGrounded,
    /// Weak acceptance under the legal motivational states.
    #[strum(serialize = "WA-MS")]
    WeakAcceptance,
}

/// Iterates over the strings of the supported problems.
pub fn iter_problem_strings() -> impl Iterator<Item = &'static str> {
    Problem::iter().map(|p| p.into())
}
