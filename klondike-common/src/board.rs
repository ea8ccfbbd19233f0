use crate::card::{Card, MAX_CARD, MAX_RANK};
use crate::rules::{check_win, is_valid_tableau_move};

use anyhow::{Context, Result, bail, ensure};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use smallvec::SmallVec;

pub const TOTAL_FOUNDATIONS: usize = 4;
pub const TOTAL_TABLEAUS: usize = 7;
pub const TALON_SIZE: usize = 24;
pub const FOUNDATION_SIZE: usize = MAX_RANK as usize;
const TABLEAU_SIZE: usize = 19;

pub type Talon = SmallVec<[Card; TALON_SIZE]>;
pub type Foundation = SmallVec<[Card; FOUNDATION_SIZE]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// One card per draw.
    #[default]
    Easy,
    /// Three cards per draw.
    Hard,
}

impl Difficulty {
    pub fn draw_count(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Hard => 3,
        }
    }

    pub fn from_draw_count(value: usize) -> Option<Self> {
        match value {
            1 => Some(Difficulty::Easy),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Deals a freshly shuffled game.
pub fn init_game(difficulty: Difficulty) -> Board {
    Board::new_from_seed(rand::random(), difficulty)
}

/// The whole game state. Boards are plain values: transitions in
/// [`crate::engine`] clone and return a new one instead of patching in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    pub stock: Talon,
    pub waste: Talon,
    pub foundations: [Foundation; TOTAL_FOUNDATIONS],
    pub tableaus: [Tableau; TOTAL_TABLEAUS],
    pub moves: u32,
    pub score: i32,
    pub won: bool,
    pub difficulty: Difficulty,
}

impl Board {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    pub fn new_from_seed(seed: u64, difficulty: Difficulty) -> Self {
        let mut deck: Vec<Card> = (0..MAX_CARD).filter_map(Card::from_id).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);

        let mut board = Board::new(difficulty);
        for (i, tableau) in board.tableaus.iter_mut().enumerate() {
            for j in 0..=i {
                let Some(mut card) = deck.pop() else {
                    break;
                };
                card.face_up = j == i;
                tableau.cards.push(card);
            }
        }
        board.stock.extend(deck);

        board
    }

    pub fn draw_count(&self) -> usize {
        self.difficulty.draw_count()
    }

    pub fn is_won(&self) -> bool {
        check_win(&self.foundations)
    }

    /// Checks the structural invariants of a position and reports the first one
    /// that does not hold.
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; MAX_CARD as usize];
        let mut count = 0;
        let mut check_cards = |pile: &str, cards: &[Card]| -> Result<()> {
            for card in cards {
                let id = card.id() as usize;
                ensure!(!seen[id], "{pile}: card {card} appears more than once");
                seen[id] = true;
                count += 1;
            }
            Ok(())
        };

        check_cards("Stock", self.stock.as_slice())?;
        check_cards("Waste", self.waste.as_slice())?;
        for (i, pile) in self.foundations.iter().enumerate() {
            check_cards(&format!("Foundation{}", i + 1), pile.as_slice())?;
        }
        for (i, tableau) in self.tableaus.iter().enumerate() {
            check_cards(&format!("Tableau{}", i + 1), tableau.cards.as_slice())?;
        }
        ensure!(
            count == MAX_CARD as usize,
            "Expected {MAX_CARD} cards, found {count}"
        );

        if let Some(card) = self.stock.iter().find(|card| card.face_up) {
            bail!("Stock: card {card} is face up");
        }
        if let Some(card) = self.waste.iter().find(|card| !card.face_up) {
            bail!("Waste: card {card} is face down");
        }

        for (i, pile) in self.foundations.iter().enumerate() {
            let Some(base) = pile.first() else {
                continue;
            };
            for (pos, card) in pile.iter().enumerate() {
                ensure!(
                    card.face_up && card.suit() == base.suit() && card.rank() as usize == pos + 1,
                    "Foundation{}: card {card} breaks the run from Ace",
                    i + 1
                );
            }
        }

        for (i, tableau) in self.tableaus.iter().enumerate() {
            let face_up = tableau.face_up_cards();
            ensure!(
                tableau.is_empty() || !face_up.is_empty(),
                "Tableau{}: top card is face down",
                i + 1
            );
            if let Some(card) = face_up.iter().find(|card| !card.face_up) {
                bail!("Tableau{}: face-down card {card} above a face-up card", i + 1);
            }
            for pair in face_up.windows(2) {
                ensure!(
                    is_valid_tableau_move(&pair[1], Some(&pair[0])),
                    "Tableau{}: {} cannot rest on {}",
                    i + 1,
                    pair[1],
                    pair[0]
                );
            }
        }

        ensure!(
            self.won == self.is_won(),
            "Won flag is {} but the foundations say otherwise",
            self.won
        );
        Ok(())
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut board: Self = Default::default();

        for line in content
            .split('\n')
            .map(|v| v.trim())
            .filter(|l| !l.is_empty())
        {
            let line_context = || format!("Failed to parse at '{line}'");
            if let Some(rest) = line.strip_prefix("Stock:") {
                let cards = Self::parse_cards(rest.trim()).with_context(line_context)?;
                board.stock = cards.into_iter().map(Card::turned_down).collect();
            } else if let Some(rest) = line.strip_prefix("Waste:") {
                let cards = Self::parse_cards(rest.trim()).with_context(line_context)?;
                board.waste = cards.into_iter().map(Card::turned_up).collect();
            } else if let Some(rest) = line.strip_prefix("Foundation") {
                let (idx, rest) =
                    Self::parse_index(rest, TOTAL_FOUNDATIONS).with_context(line_context)?;
                let cards = Self::parse_cards(rest).with_context(line_context)?;
                board.foundations[idx] = match cards.last() {
                    Some(top) => (1..=top.rank())
                        .map(|rank| Card::new(rank, top.suit()).turned_up())
                        .collect(),
                    None => Foundation::new(),
                };
            } else if let Some(rest) = line.strip_prefix("Tableau") {
                let (idx, cards_str) =
                    Self::parse_index(rest, TOTAL_TABLEAUS).with_context(line_context)?;
                let (before, after) = cards_str.split_once('|').unwrap_or((cards_str, ""));
                let face_down = Self::parse_cards(before.trim()).with_context(line_context)?;
                let face_up = Self::parse_cards(after.trim()).with_context(line_context)?;
                board.tableaus[idx].cards = face_down
                    .into_iter()
                    .map(Card::turned_down)
                    .chain(face_up.into_iter().map(Card::turned_up))
                    .collect();
            } else if let Some(rest) = line.strip_prefix("DrawCount:") {
                let value = rest
                    .trim()
                    .parse::<usize>()
                    .context("Invalid DrawCount")
                    .with_context(line_context)?;
                board.difficulty = Difficulty::from_draw_count(value)
                    .context("DrawCount must be 1 or 3")
                    .with_context(line_context)?;
            } else if let Some(rest) = line.strip_prefix("Moves:") {
                board.moves = rest
                    .trim()
                    .parse()
                    .context("Invalid Moves")
                    .with_context(line_context)?;
            } else if let Some(rest) = line.strip_prefix("Score:") {
                board.score = rest
                    .trim()
                    .parse()
                    .context("Invalid Score")
                    .with_context(line_context)?;
            }
        }

        board.won = board.is_won();
        Ok(board)
    }

    fn parse_index(rest: &str, total: usize) -> Result<(usize, &str)> {
        let (idx, cards) = rest.split_once(':').context("Missing ':'")?;
        let idx = idx.trim().parse::<usize>().context("Invalid pile index")?;
        ensure!((1..=total).contains(&idx), "Pile index must be in 1..={total}");
        Ok((idx - 1, cards.trim()))
    }

    fn parse_cards(s: &str) -> Result<Vec<Card>> {
        let mut cards = Vec::new();
        let mut chars = s.chars().peekable();
        while let Some(&c1) = chars.peek() {
            if c1.is_whitespace() || c1 == '|' {
                chars.next();
                continue;
            }
            let rank = c1;
            chars.next();
            let suit = match chars.next() {
                Some(s) => s,
                None => bail!("Missing suit after rank {rank}"),
            };
            cards.push(Card::parse(rank, suit)?);
        }
        Ok(cards)
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();

        if !self.stock.is_empty() {
            output.push_str("Stock: ");
            for card in &self.stock {
                output.push_str(&card.pretty_print());
            }
            output.push('\n');
        }

        if !self.waste.is_empty() {
            output.push_str("Waste: ");
            for card in &self.waste {
                output.push_str(&card.pretty_print());
            }
            output.push('\n');
        }

        for (i, pile) in self.foundations.iter().enumerate() {
            if let Some(card) = pile.last() {
                output.push_str(&format!("Foundation{}: {}\n", i + 1, card.pretty_print()));
            }
        }

        for (i, tableau) in self.tableaus.iter().enumerate() {
            if tableau.is_empty() {
                continue;
            }
            output.push_str(&format!("Tableau{}: ", i + 1));
            let sep = tableau.face_down_count();
            for (j, card) in tableau.cards.iter().enumerate() {
                if j == sep {
                    output.push('|');
                }
                output.push_str(&card.pretty_print());
            }
            output.push('\n');
        }

        output.push_str(&format!("DrawCount: {}", self.draw_count()));
        if self.moves > 0 {
            output.push_str(&format!("\nMoves: {}", self.moves));
        }
        if self.score != 0 {
            output.push_str(&format!("\nScore: {}", self.score));
        }

        output
    }
}

/// One of the seven working columns: a face-down prefix under a face-up run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tableau {
    pub cards: SmallVec<[Card; TABLEAU_SIZE]>,
}

impl Tableau {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn face_down_count(&self) -> usize {
        self.cards
            .iter()
            .position(|card| card.face_up)
            .unwrap_or(self.cards.len())
    }

    pub fn face_up_cards(&self) -> &[Card] {
        &self.cards[self.face_down_count()..]
    }
}
