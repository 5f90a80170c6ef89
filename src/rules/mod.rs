//! The rules engine.
//!
//! `GameEngine` owns one game's state and is the only way to change it.
//! Operations are grouped by concern:
//!
//! - `lobby`: seating, readiness, dealing, setup reveals
//! - `turns`: draw, resolve, column elimination, final-round countdown
//! - `scoring`: round scoring, finisher doubling, new round / game over
//! - `action`: `Action` enumeration and dispatch
//!
//! Every mutating call either commits completely and returns its events in
//! an `Outcome`, or fails with an `EngineError` and changes nothing.

mod action;
mod engine;
mod lobby;
mod scoring;
mod turns;

pub use action::Action;
pub use engine::GameEngine;
pub use scoring::finisher_adjusted_scores;
