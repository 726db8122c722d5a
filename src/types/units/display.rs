use std::fmt;
use uom::si::{
    angle::degree,
    f64::{Angle, Length, Mass},
    length::meter,
    mass::{kilogram, pound},
};

#[derive(Debug, Clone, Copy)]
pub struct DisplayMass(pub Mass);
#[derive(Debug, Clone, Copy)]
pub struct DisplayAngle(pub Angle);
#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);

impl fmt::Display for DisplayMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kg = self.0.get::<kilogram>();
        let lbs = self.0.get::<pound>();
        write!(f, "{:.2} kg ({:.0} lbs)", kg, lbs)
    }
}

impl fmt::Display for DisplayAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0.get::<degree>())
    }
}

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0.get::<meter>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let mass = DisplayMass(Mass::new::<kilogram>(1133.0));
        assert_eq!(mass.to_string(), "1133.00 kg (2498 lbs)");

        let angle = DisplayAngle(Angle::new::<degree>(60.0));
        assert_eq!(angle.to_string(), "60.0°");

        let length = DisplayLength(Length::new::<meter>(8.0));
        assert_eq!(length.to_string(), "8.00 m");
    }
}
