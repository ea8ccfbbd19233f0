//! The two transitions of the game. Both clone the incoming board, mutate the
//! private copy and hand it back; the caller's board is never touched.
use crate::action::{Action, PileKind, Source};
use crate::board::Board;
use crate::card::Card;
use crate::rules::{is_valid_foundation_move, is_valid_tableau_move};

use tracing::trace;

/// Draws up to `draw_count` cards onto the waste, or turns the waste back into
/// the stock once the stock is exhausted. Counts as a move even when both piles
/// are empty.
pub fn execute_draw(board: &Board) -> Board {
    let mut next = board.clone();
    if next.stock.is_empty() {
        if !next.waste.is_empty() {
            next.stock
                .extend(next.waste.drain(..).rev().map(Card::turned_down));
        }
    } else {
        let num = next.draw_count().min(next.stock.len());
        let start = next.stock.len() - num;
        let drawn = next.stock.drain(start..).rev().map(Card::turned_up);
        next.waste.extend(drawn);
    }
    next.moves += 1;
    next
}

/// Moves the cards at `source` onto the `target` pile numbered `index`.
///
/// Returns `None` when the move is illegal or does not describe a real position
/// on the board; the caller should keep its current state.
pub fn execute_move(
    board: &Board,
    source: Source,
    target: PileKind,
    index: usize,
) -> Option<Board> {
    match try_move(board, source, target, index) {
        Ok(next) => Some(next),
        Err(reason) => {
            trace!(?source, ?target, index, reason, "move rejected");
            None
        }
    }
}

/// Runs an action produced by a move generator.
pub fn apply_action(board: &Board, action: &Action) -> Option<Board> {
    match *action {
        Action::Draw => Some(execute_draw(board)),
        Action::Move {
            source,
            target,
            index,
        } => execute_move(board, source, target, index),
    }
}

fn try_move(
    board: &Board,
    source: Source,
    target: PileKind,
    index: usize,
) -> Result<Board, &'static str> {
    let group: &[Card] = match source {
        Source::Waste => board
            .waste
            .last()
            .map(std::slice::from_ref)
            .ok_or("waste is empty")?,
        Source::Foundation(idx) => board
            .foundations
            .get(idx)
            .ok_or("no such foundation")?
            .last()
            .map(std::slice::from_ref)
            .ok_or("foundation is empty")?,
        Source::Tableau(col, depth) => {
            let tableau = board.tableaus.get(col).ok_or("no such tableau")?;
            let cards = tableau
                .cards
                .get(depth..)
                .filter(|cards| !cards.is_empty())
                .ok_or("depth is past the top of the column")?;
            if !cards[0].face_up {
                return Err("card at depth is face down");
            }
            cards
        }
    };
    let lead = &group[0];

    match target {
        PileKind::Foundation => {
            let pile = board.foundations.get(index).ok_or("no such foundation")?;
            if group.len() != 1 {
                return Err("only single cards go to a foundation");
            }
            if !is_valid_foundation_move(lead, pile.last()) {
                return Err("foundation does not accept the card");
            }
        }
        PileKind::Tableau => {
            let tableau = board.tableaus.get(index).ok_or("no such tableau")?;
            if matches!(source, Source::Tableau(col, _) if col == index) {
                return Err("a column cannot move onto itself");
            }
            if !is_valid_tableau_move(lead, tableau.peek_top()) {
                return Err("tableau does not accept the card");
            }
        }
        PileKind::Stock | PileKind::Waste => return Err("stock and waste do not accept moves"),
    }

    let mut next = board.clone();
    match source {
        Source::Waste => {
            next.waste.pop();
        }
        Source::Foundation(idx) => {
            next.foundations[idx].pop();
        }
        Source::Tableau(col, depth) => {
            let cards = &mut next.tableaus[col].cards;
            cards.truncate(depth);
            if let Some(top) = cards.last_mut() {
                top.face_up = true;
            }
        }
    }
    if target == PileKind::Foundation {
        next.foundations[index].extend(group.iter().copied());
    } else {
        next.tableaus[index].cards.extend(group.iter().copied());
    }
    next.moves += 1;
    next.won = next.is_won();

    Ok(next)
}
