use std::fmt;

use crate::piece::Color;

/// One side of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub color: Color,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// The fixed seating: White moves first.
    pub fn pair() -> [Player; 2] {
        [Player::new("White", Color::White), Player::new("Black", Color::Black)]
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
