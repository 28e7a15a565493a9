use serde::{Deserialize, Serialize};
use std::fmt;
use tsify::Tsify;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Tsify)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }

}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    /// Text shown inside a rendered cell; empty cells have no label.
    pub fn label(self) -> &'static str {
        self.mark().map(Mark::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_label_matches_mark() {
        assert_eq!(Cell::Empty.label(), "");
        assert_eq!(Cell::Marked(Mark::X).label(), "X");
        assert_eq!(Cell::Marked(Mark::O).label(), "O");
        assert_eq!(Cell::Marked(Mark::O).mark(), Some(Mark::O));
        assert!(Cell::Empty.is_empty());
        assert_eq!(Mark::X.to_string(), "X");
    }
}
