use crate::lcd::{DisplayCell, Row};

/// Countdown length of the phases where one road has green.
pub const GO_TICKS: u8 = 20;
/// Countdown length of the all-yellow phases.
pub const YELLOW_TICKS: u8 = 4;

/// One lamp colour. Each port drives two signal heads, three lines each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    Red = 0,
    Yellow = 1,
    Green = 2,
}

impl Lamp {
    /// Bits lighting this colour on both heads of a port.
    pub const fn pair_mask(self) -> u8 {
        let bit = self as u8;
        (1 << bit) | (1 << (bit + 3))
    }
}

/// Port values for both road groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalPattern {
    /// Lights 1 and 2, road AB.
    pub ab: u8,
    /// Lights 3 and 4, road CD.
    pub cd: u8,
}

impl SignalPattern {
    pub const DARK: Self = Self { ab: 0, cd: 0 };

    pub const fn new(ab: Lamp, cd: Lamp) -> Self {
        Self {
            ab: ab.pair_mask(),
            cd: cd.pair_mask(),
        }
    }
}

/// Text drawn at a fixed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caption {
    pub cell: DisplayCell,
    pub text: &'static str,
}

impl Caption {
    const fn first(text: &'static str) -> Self {
        Self {
            cell: DisplayCell::new(0, Row::First),
            text,
        }
    }

    const fn second(text: &'static str) -> Self {
        Self {
            cell: DisplayCell::new(0, Row::Second),
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    GreenAbRedCd,
    YellowAbToCd,
    RedAbGreenCd,
    YellowCdToAb,
}

impl Phase {
    pub const fn next(self) -> Self {
        match self {
            Self::GreenAbRedCd => Self::YellowAbToCd,
            Self::YellowAbToCd => Self::RedAbGreenCd,
            Self::RedAbGreenCd => Self::YellowCdToAb,
            Self::YellowCdToAb => Self::GreenAbRedCd,
        }
    }

    pub fn rotate(&mut self) {
        *self = self.next();
    }

    /// Ticks spent in this phase.
    pub const fn countdown(self) -> u8 {
        match self {
            Self::GreenAbRedCd | Self::RedAbGreenCd => GO_TICKS,
            Self::YellowAbToCd | Self::YellowCdToAb => YELLOW_TICKS,
        }
    }

    pub const fn pattern(self) -> SignalPattern {
        match self {
            Self::GreenAbRedCd => SignalPattern::new(Lamp::Green, Lamp::Red),
            Self::YellowAbToCd | Self::YellowCdToAb => {
                SignalPattern::new(Lamp::Yellow, Lamp::Yellow)
            }
            Self::RedAbGreenCd => SignalPattern::new(Lamp::Red, Lamp::Green),
        }
    }

    /// Instructions for road users. Rows not listed keep whatever they show.
    pub const fn captions(self) -> &'static [Caption] {
        match self {
            Self::GreenAbRedCd => GO_AB_CAPTIONS,
            Self::YellowAbToCd => YELLOW_AB_CAPTIONS,
            Self::RedAbGreenCd => GO_CD_CAPTIONS,
            Self::YellowCdToAb => YELLOW_CD_CAPTIONS,
        }
    }
}

const GO_AB_CAPTIONS: &[Caption] = &[Caption::first("MOVE AB STOP CD   ")];
const YELLOW_AB_CAPTIONS: &[Caption] = &[
    Caption::first("DON'T MOVE AB"),
    Caption::second("READY CD "),
];
const GO_CD_CAPTIONS: &[Caption] = &[Caption::second("STOP AB MOVE CD   ")];
const YELLOW_CD_CAPTIONS: &[Caption] = &[
    Caption::first("READY AB"),
    Caption::second("DON'T MOVE CD "),
];

impl Default for Phase {
    fn default() -> Self {
        Self::GreenAbRedCd
    }
}
