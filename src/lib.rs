//! Dialabri is a DIAlogue-based Abstract argumentation Reasoner Implementation.
//!
//! Acceptance problems are decided by building dialogues between a proponent defending a claim and an opponent challenging it.
//! A dialogue won by the proponent is a proof of acceptance.

#![warn(missing_docs)]

pub mod aa;

pub mod dialogues;

pub mod io;

pub mod utils;
