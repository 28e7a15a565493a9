use serde::{Deserialize, Serialize};
use std::fmt;
use tsify::Tsify;

/// How the move list is presented; never affects the history itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum DisplayOrder {
    #[default]
    Ascending,
    Descending,
}

impl DisplayOrder {
    pub fn toggled(self) -> Self {
        match self {
            DisplayOrder::Ascending => DisplayOrder::Descending,
            DisplayOrder::Descending => DisplayOrder::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        self == DisplayOrder::Descending
    }

    pub fn arrange<T>(self, mut items: Vec<T>) -> Vec<T> {
        if self.is_descending() {
            items.reverse();
        }
        items
    }
}

impl fmt::Display for DisplayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayOrder::Ascending => f.write_str("ascending"),
            DisplayOrder::Descending => f.write_str("descending"),
        }
    }
}
