//! Display geometry helpers for radar_core.

/// Flip a sensor bearing into the display convention (0 deg at the LEFT of
/// the disc): `(angle + 180) mod 360`. Result is in `[0, 360)` for any
/// finite input.
#[inline]
pub fn flip_angle(angle_deg: f32) -> f32 {
    (angle_deg + 180.0).rem_euclid(360.0)
}

/// Project a polar reading onto the display plane, relative to the disc
/// center. `distance` is scaled so that `max_distance` lands on the rim.
#[inline]
pub fn polar_to_screen(
    display_angle_deg: f32,
    distance: f32,
    max_distance: f32,
    radar_radius: f32,
) -> (f32, f32) {
    let r = (distance / max_distance) * radar_radius;
    let rad = display_angle_deg.to_radians();
    (r * rad.cos(), r * rad.sin())
}
