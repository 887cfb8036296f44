//! Per-tick operator input snapshot.
//!
//! An [`InputSnapshot`] is the immutable value the teleop mapper reads
//! each tick: held buttons, the d-pad quadrant and the two drive axes.
//! Construction sanitises raw platform readings so the mapper never sees
//! an out-of-range axis or an unmapped d-pad angle.

/// Highest button index a [`ButtonSet`] can hold (indices are 1-based).
pub const MAX_BUTTONS: u8 = 32;

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// Bitset of held digital buttons, indexed `1..=MAX_BUTTONS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSet(u32);

impl ButtonSet {
    /// No buttons held.
    pub const EMPTY: Self = Self(0);

    fn mask(index: u8) -> Option<u32> {
        (1..=MAX_BUTTONS)
            .contains(&index)
            .then(|| 1u32 << (index - 1))
    }

    /// Returns a copy with `index` held.  Out-of-range indices are ignored.
    #[must_use]
    pub fn with(mut self, index: u8) -> Self {
        self.set(index, true);
        self
    }

    /// Set or clear a single button.  Out-of-range indices are ignored.
    pub fn set(&mut self, index: u8, held: bool) {
        if let Some(mask) = Self::mask(index) {
            if held {
                self.0 |= mask;
            } else {
                self.0 &= !mask;
            }
        }
    }

    /// Whether button `index` is held.  Out-of-range indices read as released.
    pub fn is_held(self, index: u8) -> bool {
        Self::mask(index).is_some_and(|mask| self.0 & mask != 0)
    }

    /// True when nothing is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask (bit 0 = button 1).
    pub fn bits(self) -> u32 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// D-pad
// ---------------------------------------------------------------------------

/// Directional-pad quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DpadQuadrant {
    North,
    East,
    South,
    West,
    #[default]
    None,
}

impl DpadQuadrant {
    /// Map a raw POV angle.  `0/90/180/270` select a quadrant; `-1` and
    /// every other angle (diagonals included) read as [`DpadQuadrant::None`].
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees {
            0 => Self::North,
            90 => Self::East,
            180 => Self::South,
            270 => Self::West,
            _ => Self::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every operator control the core reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Manipulator buttons.
    pub buttons: ButtonSet,
    /// Manipulator d-pad.
    pub dpad: DpadQuadrant,
    /// Raw forward/back axis in `[-1, 1]` (stick-up is negative on most pads).
    pub drive_forward: f64,
    /// Raw turn axis in `[-1, 1]`.
    pub drive_turn: f64,
}

/// Clamp a raw axis reading into `[-1, 1]`; NaN reads as centred.
pub fn sanitize_axis(raw: f64) -> f64 {
    if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) }
}

impl InputSnapshot {
    /// All controls released and centred.
    pub const IDLE: Self = Self {
        buttons: ButtonSet::EMPTY,
        dpad: DpadQuadrant::None,
        drive_forward: 0.0,
        drive_turn: 0.0,
    };

    /// Build a snapshot from raw platform readings.
    pub fn new(buttons: ButtonSet, pov_degrees: i32, drive_forward: f64, drive_turn: f64) -> Self {
        Self {
            buttons,
            dpad: DpadQuadrant::from_degrees(pov_degrees),
            drive_forward: sanitize_axis(drive_forward),
            drive_turn: sanitize_axis(drive_turn),
        }
    }

    #[must_use]
    pub fn with_button(mut self, index: u8) -> Self {
        self.buttons.set(index, true);
        self
    }

    #[must_use]
    pub fn with_dpad(mut self, dpad: DpadQuadrant) -> Self {
        self.dpad = dpad;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, drive_forward: f64, drive_turn: f64) -> Self {
        self.drive_forward = sanitize_axis(drive_forward);
        self.drive_turn = sanitize_axis(drive_turn);
        self
    }
}
