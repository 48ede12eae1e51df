//! Per-cell lattice type labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a lattice cell.
///
/// The numeric codes are part of the contract with the time-stepping
/// solver and are stable. Codes 5 and 6 are reserved and have no variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum LatticeType {
    /// Wall or solid site (code 0).
    Boundary = 0,
    /// Ordinary fluid site taking part in this grid's collision (code 1).
    #[default]
    Fluid = 1,
    /// Covered entirely by a finer grid; skipped by this grid's collision (code 2).
    Refined = 2,
    /// Child-side interface site receiving values from the coarser grid (code 3).
    TransferToCoarser = 3,
    /// Parent-side interface site exchanging values with the finer grid (code 4).
    TransferToFiner = 4,
    /// Inlet face site (code 7).
    Inlet = 7,
    /// Outlet face site (code 8).
    Outlet = 8,
}

impl LatticeType {
    /// The numeric label code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric label. Returns `None` for reserved or unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Boundary),
            1 => Some(Self::Fluid),
            2 => Some(Self::Refined),
            3 => Some(Self::TransferToCoarser),
            4 => Some(Self::TransferToFiner),
            7 => Some(Self::Inlet),
            8 => Some(Self::Outlet),
            _ => None,
        }
    }

    /// Whether the site sits on a coarse/fine transfer layer.
    pub fn is_transfer(self) -> bool {
        matches!(self, Self::TransferToCoarser | Self::TransferToFiner)
    }
}

impl fmt::Display for LatticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boundary => "boundary",
            Self::Fluid => "fluid",
            Self::Refined => "refined",
            Self::TransferToCoarser => "tl-coarser",
            Self::TransferToFiner => "tl-finer",
            Self::Inlet => "inlet",
            Self::Outlet => "outlet",
        };
        write!(f, "{name}({})", self.code())
    }
}
