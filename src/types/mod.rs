pub mod units;

pub use uom::si::f64::{Angle, Length, Mass};
pub use uom::si::{
    angle::{degree, radian},
    length::{centimeter, foot, meter, millimeter},
    mass::{gram, kilogram, pound, ton},
};

pub use units::{
    AngleValue, DisplayAngle, DisplayLength, DisplayMass, LengthValue, MassValue, UnitError,
    WithUnit,
};

// Type aliases for domain clarity (zero cost)
pub type Weight = Mass;
pub type Distance = Length;
pub type BoomAngle = Angle;

/// Raw kilogram value of a mass
#[inline]
pub fn kg(mass: Mass) -> f64 {
    mass.get::<kilogram>()
}

/// Raw meter value of a length
#[inline]
pub fn m(length: Length) -> f64 {
    length.get::<meter>()
}

/// Raw degree value of an angle
#[inline]
pub fn deg(angle: Angle) -> f64 {
    angle.get::<degree>()
}
