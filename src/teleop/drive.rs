//! Arcade drive mixing.

use crate::input::InputSnapshot;
use crate::output::DrivePower;

/// Mix a forward speed and a rotation into left/right power.
///
/// `left = x - z`, `right = x + z`, then scaled down along the stick
/// direction so neither side exceeds 1.  No deadband, no squaring.
pub fn arcade(x_speed: f64, z_rotation: f64) -> DrivePower {
    let x = x_speed.clamp(-1.0, 1.0);
    let z = z_rotation.clamp(-1.0, 1.0);

    let greater = x.abs().max(z.abs());
    if greater == 0.0 || greater.is_nan() {
        return DrivePower::STOPPED;
    }
    let lesser = x.abs().min(z.abs());
    let saturated = (greater + lesser) / greater;

    DrivePower::new((x - z) / saturated, (x + z) / saturated)
}

/// Drive power from the snapshot's axes.  Both axes are sign-inverted
/// (stick-up reads negative on the pad).
pub fn drive_from_axes(snapshot: &InputSnapshot) -> DrivePower {
    arcade(-snapshot.drive_forward, -snapshot.drive_turn)
}
