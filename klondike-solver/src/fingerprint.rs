use klondike_common::board::{Board, TALON_SIZE, TOTAL_FOUNDATIONS, TOTAL_TABLEAUS};
use klondike_common::card::Card;

use smallvec::SmallVec;

/// How much of the stock goes into a [`Fingerprint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockKeying {
    /// Only the number of cards left in the stock. Two positions that differ
    /// only in stock order are treated as the same position.
    #[default]
    Length,
    /// The full ordered stock.
    Contents,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum StockKey {
    Length(u8),
    Contents(SmallVec<[u8; TALON_SIZE]>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
struct ColumnKey {
    face_down: u8,
    face_up: SmallVec<[u8; 13]>,
}

/// Canonical key of a position, used to skip positions already explored.
///
/// Captures the stock (per [`StockKeying`]), the waste top, each foundation
/// top and, per column, the number of face-down cards followed by the face-up
/// run. Counters and the won flag are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    stock: StockKey,
    waste_top: Option<u8>,
    foundation_tops: [Option<u8>; TOTAL_FOUNDATIONS],
    tableaus: [ColumnKey; TOTAL_TABLEAUS],
}

impl Fingerprint {
    pub fn of(board: &Board, keying: StockKeying) -> Self {
        let stock = match keying {
            StockKeying::Length => StockKey::Length(board.stock.len() as u8),
            StockKeying::Contents => StockKey::Contents(board.stock.iter().map(Card::id).collect()),
        };
        let tableaus = std::array::from_fn(|i| {
            let cards = &board.tableaus[i].cards;
            ColumnKey {
                face_down: cards.iter().filter(|card| !card.face_up).count() as u8,
                face_up: cards
                    .iter()
                    .filter(|card| card.face_up)
                    .map(Card::id)
                    .collect(),
            }
        });

        Self {
            stock,
            waste_top: board.waste.last().map(Card::id),
            foundation_tops: std::array::from_fn(|i| board.foundations[i].last().map(Card::id)),
            tableaus,
        }
    }
}
