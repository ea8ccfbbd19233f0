use crate::board::{FOUNDATION_SIZE, Foundation, TOTAL_FOUNDATIONS};
use crate::card::Card;

/// Whether `card` may be placed on a tableau column whose top is `target_top`.
///
/// An empty column takes only a King; otherwise the card must be of the other
/// color and exactly one rank lower.
pub fn is_valid_tableau_move(card: &Card, target_top: Option<&Card>) -> bool {
    match target_top {
        None => card.is_king(),
        Some(top) => card.color() != top.color() && card.rank() + 1 == top.rank(),
    }
}

/// Whether `card` may be placed on a foundation whose top is `target_top`.
///
/// An empty foundation takes only an Ace; otherwise the card must follow the top
/// in the same suit.
pub fn is_valid_foundation_move(card: &Card, target_top: Option<&Card>) -> bool {
    match target_top {
        None => card.is_ace(),
        Some(top) => card.suit() == top.suit() && card.rank() == top.rank() + 1,
    }
}

pub fn check_win(foundations: &[Foundation; TOTAL_FOUNDATIONS]) -> bool {
    foundations.iter().all(|pile| pile.len() == FOUNDATION_SIZE)
}
