use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
///
/// Serialises to the legacy integer codes: `-1` hidden, `-2` marked, `-3` triggered mine, `0..=8` neighbour count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum DisplayCode {
    Hidden,
    Marked,
    TriggeredMine,
    Revealed(u8),
}

impl DisplayCode {
    const HIDDEN: i8 = -1;
    const MARKED: i8 = -2;
    const TRIGGERED_MINE: i8 = -3;

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Marked)
    }

    pub const fn revealed_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for DisplayCode {
    fn default() -> Self {
        Self::Hidden
    }
}

impl From<DisplayCode> for i8 {
    fn from(code: DisplayCode) -> Self {
        use DisplayCode::*;
        match code {
            Hidden => DisplayCode::HIDDEN,
            Marked => DisplayCode::MARKED,
            TriggeredMine => DisplayCode::TRIGGERED_MINE,
            Revealed(count) => count as i8,
        }
    }
}

impl TryFrom<i8> for DisplayCode {
    type Error = GameError;

    fn try_from(code: i8) -> Result<Self> {
        match code {
            Self::HIDDEN => Ok(Self::Hidden),
            Self::MARKED => Ok(Self::Marked),
            Self::TRIGGERED_MINE => Ok(Self::TriggeredMine),
            0..=8 => Ok(Self::Revealed(code as u8)),
            _ => Err(GameError::InvalidDisplayCode(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes() {
        assert_eq!(i8::from(DisplayCode::Hidden), -1);
        assert_eq!(i8::from(DisplayCode::Marked), -2);
        assert_eq!(i8::from(DisplayCode::TriggeredMine), -3);
        assert_eq!(i8::from(DisplayCode::Revealed(7)), 7);
        assert_eq!(DisplayCode::try_from(0), Ok(DisplayCode::Revealed(0)));
        assert_eq!(DisplayCode::try_from(-2), Ok(DisplayCode::Marked));
    }

    #[test]
    fn classifies_codes() {
        assert!(DisplayCode::default().is_hidden());
        assert!(DisplayCode::Marked.is_marked());
        assert!(!DisplayCode::Marked.is_hidden());
        assert_eq!(DisplayCode::Revealed(2).revealed_count(), Some(2));
        assert_eq!(DisplayCode::TriggeredMine.revealed_count(), None);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(DisplayCode::try_from(9), Err(GameError::InvalidDisplayCode(9)));
        assert_eq!(DisplayCode::try_from(-4), Err(GameError::InvalidDisplayCode(-4)));
    }

    #[test]
    fn serializes_as_integers() {
        let json = serde_json::to_string(&[DisplayCode::Hidden, DisplayCode::Revealed(3)]).unwrap();
        assert_eq!(json, "[-1,3]");

        let codes: [DisplayCode; 2] = serde_json::from_str("[-3,-2]").unwrap();
        assert_eq!(codes, [DisplayCode::TriggeredMine, DisplayCode::Marked]);
        assert!(serde_json::from_str::<DisplayCode>("12").is_err());
    }
}
