mod display;
mod explicit_unit_values;

pub use uom::si::{
    angle::{degree, radian},
    length::{centimeter, foot, inch, meter, millimeter},
    mass::{gram, kilogram, megagram as metric_ton, pound, ton_short},
};

pub use display::{DisplayAngle, DisplayLength, DisplayMass};
pub use explicit_unit_values::{AngleValue, LengthValue, MassValue, UnitError, WithUnit};
