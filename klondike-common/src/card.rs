use anyhow::{Context, Result};
use std::fmt;

pub const MAX_RANK: u8 = 13;
pub const MAX_SUIT: u8 = 4;
pub const MAX_CARD: u8 = MAX_SUIT * MAX_RANK;

const SUITS: [char; MAX_SUIT as usize] = ['♥', '♦', '♣', '♠'];
const ASCII_SUITS: [char; MAX_SUIT as usize] = ['H', 'D', 'C', 'S'];
const RANKS: [char; MAX_RANK as usize] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; MAX_SUIT as usize] =
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn symbol(self) -> char {
        SUITS[self as usize]
    }

    fn from_index(index: u8) -> Self {
        Self::ALL[(index % MAX_SUIT) as usize]
    }

    fn from_char(c: char) -> Option<Self> {
        SUITS
            .iter()
            .position(|&s| s == c)
            .or_else(|| ASCII_SUITS.iter().position(|&s| s == c))
            .map(|idx| Self::ALL[idx])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// A playing card. The identity is `suit * 13 + (rank - 1)`; orientation is the
/// only part of a card that ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    id: u8,
    pub face_up: bool,
}

impl Card {
    /// Builds a face-down card. `rank` runs from 1 (Ace) to 13 (King).
    pub fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!((1..=MAX_RANK).contains(&rank), "rank out of range: {rank}");
        Self {
            id: suit as u8 * MAX_RANK + (rank - 1),
            face_up: false,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        (id < MAX_CARD).then_some(Self { id, face_up: false })
    }

    pub fn parse(rank: char, suit: char) -> Result<Self> {
        let rank_idx = RANKS
            .iter()
            .position(|&r| r == rank)
            .with_context(|| format!("Invalid rank at card {rank}{suit}"))?;
        let suit =
            Suit::from_char(suit).with_context(|| format!("Invalid suit at card {rank}{suit}"))?;
        Ok(Card::new(rank_idx as u8 + 1, suit))
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn rank(&self) -> u8 {
        self.id % MAX_RANK + 1
    }

    pub fn suit(&self) -> Suit {
        Suit::from_index(self.id / MAX_RANK)
    }

    pub fn color(&self) -> Color {
        self.suit().color()
    }

    pub fn is_ace(&self) -> bool {
        self.rank() == 1
    }

    pub fn is_king(&self) -> bool {
        self.rank() == MAX_RANK
    }

    pub fn turned_up(self) -> Self {
        Self {
            face_up: true,
            ..self
        }
    }

    pub fn turned_down(self) -> Self {
        Self {
            face_up: false,
            ..self
        }
    }

    pub fn pretty_print(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANKS[(self.rank() - 1) as usize],
            self.suit().symbol()
        )
    }
}
