use super::specs::write_blocks;
use crate::{
    dialogues::{AbductiveExplanation, Dialogue, WeakAcceptanceDialogue},
    utils::LabelType,
};
use anyhow::Result;
use std::{fmt::Display, io::Write};

/// A writer for the dialogues produced by the solvers.
///
/// If no dialogue is given, the writer outputs `NO`.
/// Otherwise, it outputs `YES`, followed by the dialogues separated by empty lines.
/// Each dialogue is written one move per line.
/// Abductive explanations end with the line `states: [..]` giving the states of the explanation,
/// while weak acceptance dialogues end with the final motivational state (`ms: [..]`) and the attacks it disables and enables.
///
/// ```text
/// YES
/// opp a b
/// pro(property) [rr]
/// opp d b
/// pro f d
/// opp ok
/// opp ok
/// pro win
/// ms: [rr]
/// disabled: [(a,b)]
/// enabled: [(f,d)]
/// ```
#[derive(Default)]
pub struct DialogueWriter;

fn list<T: Display>(items: &[T]) -> String {
    format!(
        "[{}]",
        items
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<String>>()
            .join(",")
    )
}

fn attack_list<T: Display>(attacks: &[(T, T)]) -> String {
    list(
        &attacks
            .iter()
            .map(|(a, b)| format!("({},{})", a, b))
            .collect::<Vec<String>>(),
    )
}

impl DialogueWriter {
    /// Writes a set of dialogues.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::{AAFramework, ArgumentSet, ArgumentationModel};
    /// # use dialabri::dialogues::DialogueSolver;
    /// # use dialabri::io::DialogueWriter;
    /// let model = ArgumentationModel::from(AAFramework::new(ArgumentSet::new_with_labels(&["a"])));
    /// let solver = DialogueSolver::new(&model);
    /// let a = model.framework().argument_set().get_label(&"a").unwrap();
    /// let dialogues = solver.skeptical_dialogues(a).collect::<Vec<_>>();
    /// let mut out = Vec::new();
    /// DialogueWriter::default().write_dialogues(&mut out, &dialogues).unwrap();
    /// assert_eq!("YES\nopp ok\npro win\n", String::from_utf8(out).unwrap());
    /// ```
    pub fn write_dialogues<T>(&self, writer: &mut dyn Write, dialogues: &[Dialogue<T>]) -> Result<()>
    where
        T: LabelType,
    {
        write_blocks(
            writer,
            &dialogues.iter().map(|d| d.to_string()).collect::<Vec<String>>(),
        )
    }

    /// Writes a set of abductive explanations.
    pub fn write_explanations<T>(
        &self,
        writer: &mut dyn Write,
        explanations: &[AbductiveExplanation<T>],
    ) -> Result<()>
    where
        T: LabelType,
    {
        write_blocks(
            writer,
            &explanations
                .iter()
                .map(|e| format!("{}\nstates: {}", e.dialogue(), list(e.states())))
                .collect::<Vec<String>>(),
        )
    }

    /// Writes a set of weak acceptance dialogues.
    pub fn write_weak_acceptance_dialogues<T>(
        &self,
        writer: &mut dyn Write,
        dialogues: &[WeakAcceptanceDialogue<T>],
    ) -> Result<()>
    where
        T: LabelType,
    {
        write_blocks(
            writer,
            &dialogues
                .iter()
                .map(|d| {
                    format!(
                        "{}\nms: {}\ndisabled: {}\nenabled: {}",
                        d.dialogue(),
                        list(d.motivational_state()),
                        attack_list(d.disabled_attacks()),
                        attack_list(d.enabled_attacks())
                    )
                })
                .collect::<Vec<String>>(),
        )
    }
}
