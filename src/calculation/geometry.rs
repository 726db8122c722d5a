use log::debug;

use crate::types::*;

/// Boom angle from horizontal for a boom of `boom_extension` reaching out to
/// `operating_radius`.
///
/// The boom is the hypotenuse and the radius the adjacent leg, so the angle
/// is arccos(radius / extension). The ratio is clamped to [-1, 1] before the
/// arccos so rounding can never push it out of the function's domain.
pub fn boom_angle(operating_radius: Length, boom_extension: Length) -> Angle {
    let ratio = (m(operating_radius) / m(boom_extension)).clamp(-1.0, 1.0);
    let angle = Angle::new::<radian>(ratio.acos());

    debug!(
        "boom angle: radius={:.3} m extension={:.3} m ratio={:.6} angle={:.3}°",
        m(operating_radius),
        m(boom_extension),
        ratio,
        deg(angle),
    );

    angle
}

/// Height gained from the boom pivot to the boom tip, from the same right
/// triangle as [`boom_angle`]. Zero when the boom lies flat.
pub fn boom_tip_rise(operating_radius: Length, boom_extension: Length) -> Length {
    let r = m(operating_radius);
    let e = m(boom_extension);
    Length::new::<meter>((e * e - r * r).max(0.0).sqrt())
}
