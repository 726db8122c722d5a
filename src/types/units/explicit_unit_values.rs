use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Length, Mass},
    length::{centimeter, foot, meter, millimeter},
    mass::{gram, kilogram, megagram, pound},
};

/// A raw value tagged with the unit string it was entered in.
///
/// Form payloads and stored rows carry these; they become `uom` quantities
/// once the unit is recognised.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type MassValue = WithUnit<Mass>;
pub type AngleValue = WithUnit<Angle>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }

    fn normalized_unit(&self) -> String {
        self.unit.trim().to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown mass unit: {0}")]
    UnknownMassUnit(String),

    #[error("Unknown angle unit: {0}")]
    UnknownAngleUnit(String),
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        match self.normalized_unit().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Length::new::<meter>(self.value)),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(Length::new::<centimeter>(self.value))
            }
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Length::new::<millimeter>(self.value))
            }
            "ft" | "foot" | "feet" => Ok(Length::new::<foot>(self.value)),
            _ => Err(UnitError::UnknownLengthUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Mass> {
    pub fn to_mass(&self) -> Result<Mass, UnitError> {
        match self.normalized_unit().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(Mass::new::<kilogram>(self.value)),
            "t" | "tonne" | "tonnes" | "metric ton" | "metric tons" => {
                Ok(Mass::new::<megagram>(self.value))
            }
            "g" | "gram" | "grams" => Ok(Mass::new::<gram>(self.value)),
            "lb" | "lbs" | "pound" | "pounds" => Ok(Mass::new::<pound>(self.value)),
            _ => Err(UnitError::UnknownMassUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Angle> {
    pub fn to_angle(&self) -> Result<Angle, UnitError> {
        match self.normalized_unit().as_str() {
            "deg" | "degree" | "degrees" | "°" => Ok(Angle::new::<degree>(self.value)),
            "rad" | "radian" | "radians" => Ok(Angle::new::<radian>(self.value)),
            _ => Err(UnitError::UnknownAngleUnit(self.unit.clone())),
        }
    }
}
