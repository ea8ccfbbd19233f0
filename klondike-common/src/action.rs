use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PileKind {
    Stock,
    Waste,
    Foundation,
    Tableau,
}

/// Where the moving cards come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Waste,
    Foundation(usize),
    /// `(column, depth)`: every card from `depth` to the top of the column.
    Tableau(usize, usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw from the stock, or recycle the waste when the stock is empty.
    Draw,
    Move {
        source: Source,
        target: PileKind,
        index: usize,
    },
}

impl Action {
    pub fn is_draw(&self) -> bool {
        matches!(self, Action::Draw)
    }
}

/// Compact notation: `D` draws, `W:F2` sends the waste top to the second
/// foundation, `T3@1:T5` moves the third column's run starting at depth 1.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Action::Move {
            source,
            target,
            index,
        } = self
        else {
            return write!(f, "D");
        };
        match source {
            Source::Waste => write!(f, "W")?,
            Source::Foundation(idx) => write!(f, "F{}", idx + 1)?,
            Source::Tableau(col, depth) => write!(f, "T{}@{depth}", col + 1)?,
        }
        match target {
            PileKind::Stock => write!(f, ":S"),
            PileKind::Waste => write!(f, ":W"),
            PileKind::Foundation => write!(f, ":F{}", index + 1),
            PileKind::Tableau => write!(f, ":T{}", index + 1),
        }
    }
}

pub fn format_actions(actions: &[Action]) -> String {
    let mut list = vec![];
    let mut i = 0;
    while i < actions.len() {
        if actions[i].is_draw() {
            let mut count = 1;
            while i + count < actions.len() && actions[i + count].is_draw() {
                count += 1;
            }
            let str = if count == 1 {
                "D".into()
            } else {
                format!("{count}D")
            };
            list.push(str);
            i += count;
            continue;
        }
        list.push(actions[i].to_string());
        i += 1;
    }

    let mut output = String::new();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;
    for chunk in list.chunks(10) {
        for cmd in chunk {
            output.push_str(&format!("{cmd:<width$}", width = max_width));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mov = |source, target, index| Action::Move {
            source,
            target,
            index,
        };
        assert_eq!(Action::Draw.to_string(), "D");
        assert_eq!(mov(Source::Waste, PileKind::Foundation, 1).to_string(), "W:F2");
        assert_eq!(
            mov(Source::Tableau(2, 1), PileKind::Tableau, 4).to_string(),
            "T3@1:T5"
        );
        assert_eq!(
            mov(Source::Foundation(0), PileKind::Tableau, 6).to_string(),
            "F1:T7"
        );
    }

    #[test]
    fn test_format_actions() {
        let actions = [
            Action::Draw,
            Action::Draw,
            Action::Draw,
            Action::Move {
                source: Source::Waste,
                target: PileKind::Tableau,
                index: 0,
            },
            Action::Draw,
        ];
        assert_eq!(format_actions(&actions), "3D   W:T1 D    \n");
    }
}
