//! Objects used to read argumentation models and write dialogues.

mod dialogue_writer;
pub use dialogue_writer::DialogueWriter;

mod facts_reader;
pub use facts_reader::FactsReader;

mod specs;
pub use specs::InstanceReader;
pub use specs::WarningHandler;

mod warned;
