//! Match operating mode.

use core::fmt;

/// Operating mode reported by match control.  Transitions are external;
/// the scheduler only reacts to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Disabled,
    Autonomous,
    Teleop,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "Disabled",
            Self::Autonomous => "Autonomous",
            Self::Teleop => "Teleop",
        })
    }
}
