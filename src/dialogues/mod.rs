//! Dialogue games deciding the acceptance of arguments.
//!
//! Each solver enumerates lazily the dialogues won by the proponent of a claim;
//! an empty enumeration means the claim is not accepted.

mod abductive_dialogue_solver;
pub use abductive_dialogue_solver::AbductiveDialogueSolver;

mod dialogue;
pub use dialogue::AbductiveExplanation;
pub use dialogue::Dialogue;
pub use dialogue::Move;
pub use dialogue::Speaker;
pub use dialogue::WeakAcceptanceDialogue;

mod dialogue_solver;
pub use dialogue_solver::DialogueSolver;

mod dispute;

mod problem;
pub use problem::iter_problem_strings;
pub use problem::Problem;

mod property_dialogue_solver;
pub use property_dialogue_solver::PropertyDialogueSolver;

mod specs;
pub use specs::CredulousAcceptanceComputer;
pub use specs::SkepticalAcceptanceComputer;
