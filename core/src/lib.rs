//! Rules engine for a single-player mine-clearing puzzle on a square grid.
//!
//! A [`Board`] owns the mine layout and the player-visible grid of [`DisplayCode`]s. A view layer feeds it
//! coordinate-based moves ([`Board::uncover`], [`Board::mark`]) and renders [`Board::visible_grid`] and
//! [`Board::status`].
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod generator;
mod layout;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
