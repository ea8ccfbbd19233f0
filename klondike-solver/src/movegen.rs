use klondike_common::action::{Action, PileKind, Source};
use klondike_common::board::Board;
use klondike_common::rules::{is_valid_foundation_move, is_valid_tableau_move};

use smallvec::SmallVec;

pub const PRIORITY_TABLEAU_TO_FOUNDATION: i16 = 100;
pub const PRIORITY_WASTE_TO_FOUNDATION: i16 = 90;
pub const PRIORITY_REVEAL: i16 = 50;
pub const PRIORITY_WASTE_TO_TABLEAU: i16 = 40;
/// A tableau-to-tableau move that neither reveals a card nor puts a King into
/// an empty column. Those three kinds cover every tableau-to-tableau move, so
/// no move is ever ranked at a plain baseline of 10.
pub const PRIORITY_TABLEAU_SHIFT: i16 = 15;
pub const PRIORITY_KING_TO_EMPTY: i16 = 5;
pub const PRIORITY_DRAW: i16 = 1;

/// A legal action together with how eagerly the solver should try it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub action: Action,
    pub priority: i16,
}

pub type Candidates = SmallVec<[Candidate; 64]>;

/// Lists every action that is legal on `board`, in a fixed order: tableau
/// sources column by column (shallow depths first), then the waste, then the
/// draw.
pub fn generate_moves(board: &Board) -> Candidates {
    let mut moves = Candidates::new();
    let mut push = |source, target, index, priority| {
        moves.push(Candidate {
            action: Action::Move {
                source,
                target,
                index,
            },
            priority,
        })
    };

    for (col, tableau) in board.tableaus.iter().enumerate() {
        let cards = &tableau.cards;
        for (depth, card) in cards.iter().enumerate() {
            if !card.face_up {
                continue;
            }
            let source = Source::Tableau(col, depth);

            if depth + 1 == cards.len() {
                for (index, pile) in board.foundations.iter().enumerate() {
                    if is_valid_foundation_move(card, pile.last()) {
                        push(
                            source,
                            PileKind::Foundation,
                            index,
                            PRIORITY_TABLEAU_TO_FOUNDATION,
                        );
                    }
                }
            }

            let reveals = depth > 0 && !cards[depth - 1].face_up;
            for (index, target) in board.tableaus.iter().enumerate() {
                if index == col || !is_valid_tableau_move(card, target.peek_top()) {
                    continue;
                }
                let king_to_empty = card.is_king() && target.is_empty();
                let priority = match (reveals, king_to_empty) {
                    (true, _) => PRIORITY_REVEAL,
                    (false, true) => PRIORITY_KING_TO_EMPTY,
                    (false, false) => PRIORITY_TABLEAU_SHIFT,
                };
                push(source, PileKind::Tableau, index, priority);
            }
        }
    }

    if let Some(card) = board.waste.last() {
        for (index, pile) in board.foundations.iter().enumerate() {
            if is_valid_foundation_move(card, pile.last()) {
                push(
                    Source::Waste,
                    PileKind::Foundation,
                    index,
                    PRIORITY_WASTE_TO_FOUNDATION,
                );
            }
        }
        for (index, target) in board.tableaus.iter().enumerate() {
            if is_valid_tableau_move(card, target.peek_top()) {
                push(
                    Source::Waste,
                    PileKind::Tableau,
                    index,
                    PRIORITY_WASTE_TO_TABLEAU,
                );
            }
        }
    }

    if !board.stock.is_empty() || !board.waste.is_empty() {
        moves.push(Candidate {
            action: Action::Draw,
            priority: PRIORITY_DRAW,
        });
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_common::board::Difficulty;
    use klondike_common::engine::apply_action;

    use pretty_assertions::assert_eq;

    fn mov(source: Source, target: PileKind, index: usize, priority: i16) -> Candidate {
        Candidate {
            action: Action::Move {
                source,
                target,
                index,
            },
            priority,
        }
    }

    #[test]
    fn test_generate_moves() {
        let board = Board::parse(
            r#"Waste: 5♥
Tableau1: 4♦|A♠
Tableau2: 3♦|6♣
Tableau3: |7♥
Tableau4: |K♠
Tableau5: |Q♥
DrawCount: 1"#,
        )
        .unwrap();

        let expected = vec![
            mov(Source::Tableau(0, 1), PileKind::Foundation, 0, 100),
            mov(Source::Tableau(0, 1), PileKind::Foundation, 1, 100),
            mov(Source::Tableau(0, 1), PileKind::Foundation, 2, 100),
            mov(Source::Tableau(0, 1), PileKind::Foundation, 3, 100),
            mov(Source::Tableau(1, 1), PileKind::Tableau, 2, 50),
            mov(Source::Tableau(3, 0), PileKind::Tableau, 5, 5),
            mov(Source::Tableau(3, 0), PileKind::Tableau, 6, 5),
            mov(Source::Tableau(4, 0), PileKind::Tableau, 3, 15),
            mov(Source::Waste, PileKind::Tableau, 1, 40),
            Candidate {
                action: Action::Draw,
                priority: 1,
            },
        ];
        assert_eq!(generate_moves(&board).into_vec(), expected);
    }

    #[test]
    fn test_group_moves() {
        let board = Board::parse(
            r#"Tableau1: 2♣|9♠8♥7♣
Tableau2: |T♦
Tableau3: |9♣
DrawCount: 1"#,
        )
        .unwrap();

        let moves = generate_moves(&board);
        assert_eq!(
            moves.as_slice(),
            &[
                mov(Source::Tableau(0, 1), PileKind::Tableau, 1, 50),
                mov(Source::Tableau(0, 2), PileKind::Tableau, 2, 15),
                mov(Source::Tableau(2, 0), PileKind::Tableau, 1, 15),
            ]
        );
    }

    #[test]
    fn test_no_draw_when_talon_empty() {
        let board = Board::parse("Tableau1: |5♣\nDrawCount: 3").unwrap();
        assert!(generate_moves(&board).is_empty());
    }

    #[test]
    fn test_generated_moves_apply() {
        for seed in 0..16 {
            let board = Board::new_from_seed(seed, Difficulty::Hard);
            let moves = generate_moves(&board);
            let (last, rest) = moves.split_last().unwrap();
            assert_eq!(
                *last,
                Candidate {
                    action: Action::Draw,
                    priority: PRIORITY_DRAW,
                }
            );

            for candidate in rest {
                if let Action::Move {
                    source: Source::Tableau(col, _),
                    target: PileKind::Tableau,
                    index,
                } = candidate.action
                {
                    assert_ne!(col, index);
                }
                assert!(
                    [
                        PRIORITY_TABLEAU_TO_FOUNDATION,
                        PRIORITY_WASTE_TO_FOUNDATION,
                        PRIORITY_REVEAL,
                        PRIORITY_WASTE_TO_TABLEAU,
                        PRIORITY_TABLEAU_SHIFT,
                        PRIORITY_KING_TO_EMPTY,
                    ]
                    .contains(&candidate.priority),
                    "{candidate:?}"
                );
                let next = apply_action(&board, &candidate.action)
                    .unwrap_or_else(|| panic!("seed {seed}: {} rejected", candidate.action));
                next.validate().unwrap();
            }
        }
    }
}
