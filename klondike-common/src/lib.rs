//! Rules, state and transitions of single-deck Klondike Solitaire.
//!
//! Every transition is pure: [`engine::execute_draw`] and [`engine::execute_move`]
//! take a [`Board`] by reference and hand back a fresh one, so the interactive
//! game and the solver share exactly the same notion of a legal move.
pub mod action;
pub mod board;
pub mod card;
pub mod engine;
pub mod rules;

pub use crate::action::{Action, PileKind, Source};
pub use crate::board::{Board, Difficulty, init_game};
pub use crate::card::{Card, Color, Suit};
