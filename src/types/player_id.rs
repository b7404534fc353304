use std::fmt::Display;

/// Identifies one of the two players. `PlayerFirst` moves on even plies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[default]
    PlayerFirst = 0,
    PlayerSecond = 1,
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::PlayerFirst => f.write_fmt(format_args!("P1")),
            PlayerId::PlayerSecond => f.write_fmt(format_args!("P2")),
        }
    }
}

impl PlayerId {
    pub const VALUES: [PlayerId; 2] = [PlayerId::PlayerFirst, PlayerId::PlayerSecond];

    #[inline]
    pub fn opposite(self) -> PlayerId {
        match self {
            PlayerId::PlayerFirst => PlayerId::PlayerSecond,
            PlayerId::PlayerSecond => PlayerId::PlayerFirst,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The player to move after `ply` moves have been played.
    #[inline]
    pub fn from_ply(ply: u32) -> PlayerId {
        if ply % 2 == 0 {
            PlayerId::PlayerFirst
        } else {
            PlayerId::PlayerSecond
        }
    }
}
