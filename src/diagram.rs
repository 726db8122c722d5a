//! Side-view geometry of a lift, ready to hand to a plotting front end
//!
//! Coordinates are meters in the vertical plane through the boom: x is the
//! horizontal distance from the slewing centre, y the height above ground.
//! The boom pivots at the top of a fixed-height tower.

use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::calculation::{boom_angle, boom_tip_rise, require_positive};
use crate::types::*;

/// Height of the boom pivot above ground
pub const TOWER_HEIGHT_M: f64 = 2.0;

/// How far the risk zone reaches past the boom tip
pub const RISK_ZONE_CLEARANCE_M: f64 = 2.0;

/// Angle indicator radius as a fraction of boom length
pub const ANGLE_ARC_FRACTION: f64 = 0.2;

/// Points per sampled arc
pub const ARC_SAMPLES: usize = 50;

/// Convert a length to a diagram coordinate (meters)
#[inline]
pub fn to_coord(length: Length) -> f64 {
    length.get::<meter>()
}

/// Convert a diagram coordinate (meters) back to a length
#[inline]
pub fn from_coord(value: f64) -> Length {
    Length::new::<meter>(value)
}

pub fn point_from_lengths(x: Length, y: Length) -> na::Point2<f64> {
    na::Point2::new(to_coord(x), to_coord(y))
}

pub fn x_length(point: &na::Point2<f64>) -> Length {
    from_coord(point.x)
}

pub fn y_length(point: &na::Point2<f64>) -> Length {
    from_coord(point.y)
}

/// Axis-aligned plot window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftDiagram {
    pub pivot: na::Point2<f64>,
    pub boom_tip: na::Point2<f64>,
    pub boom_length: Length,
    pub boom_angle: Angle,
    pub minimum_boom_angle: Angle,

    /// Closed polygon: pivot, arc from 0° to the minimum angle, pivot
    pub risk_zone: Vec<na::Point2<f64>>,

    /// Arc from 0° to the boom angle, drawn near the pivot
    pub angle_arc: Vec<na::Point2<f64>>,

    /// Boom angle is below the manufacturer minimum
    pub boom_in_risk_zone: bool,

    pub total_load: Weight,
    pub capacity_at_radius: Weight,

    /// `None` when no usable capacity was given
    pub utilization_at_radius_pct: Option<f64>,
}

/// Points on a circle of `radius` around `center`, from 0 to `end` radians
fn sample_arc(center: na::Point2<f64>, radius: f64, end: f64) -> Vec<na::Point2<f64>> {
    let last = (ARC_SAMPLES - 1) as f64;
    (0..ARC_SAMPLES)
        .map(|i| {
            let theta = end * i as f64 / last;
            center + na::Vector2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

impl LiftDiagram {
    /// Returns `None` unless both radius and boom extension are positive.
    pub fn new(
        operating_radius: Distance,
        boom_extension: Distance,
        total_load: Weight,
        capacity_at_radius: Weight,
        minimum_boom_angle: BoomAngle,
    ) -> Option<Self> {
        require_positive("operating_radius", m(operating_radius)).ok()?;
        let length = require_positive("boom_extension", m(boom_extension)).ok()?;

        let angle = boom_angle(operating_radius, boom_extension);
        let theta = angle.get::<radian>();

        let pivot = point_from_lengths(from_coord(0.0), from_coord(TOWER_HEIGHT_M));
        let rise = to_coord(boom_tip_rise(operating_radius, boom_extension));
        let boom_tip = pivot + na::Vector2::new(length * theta.cos(), rise);

        let minimum = minimum_boom_angle.get::<radian>().clamp(0.0, PI / 2.0);
        let mut risk_zone = Vec::with_capacity(ARC_SAMPLES + 2);
        risk_zone.push(pivot);
        risk_zone.extend(sample_arc(pivot, length + RISK_ZONE_CLEARANCE_M, minimum));
        risk_zone.push(pivot);

        let angle_arc = sample_arc(pivot, length * ANGLE_ARC_FRACTION, theta);

        let utilization_at_radius_pct = require_positive("capacity_at_radius", kg(capacity_at_radius))
            .ok()
            .map(|capacity| kg(total_load) / capacity * 100.0);

        Some(Self {
            pivot,
            boom_tip,
            boom_length: boom_extension,
            boom_angle: angle,
            minimum_boom_angle,
            risk_zone,
            angle_arc,
            boom_in_risk_zone: angle < minimum_boom_angle,
            total_load,
            capacity_at_radius,
            utilization_at_radius_pct,
        })
    }

    pub fn hook_radius(&self) -> Length {
        x_length(&self.boom_tip)
    }

    /// Height of the boom tip above ground
    pub fn tip_height(&self) -> Length {
        y_length(&self.boom_tip)
    }

    /// Plot window with room for the base and labels, at least 10 m square
    pub fn view_bounds(&self) -> ViewBounds {
        ViewBounds {
            x_min: -5.0,
            x_max: self.boom_tip.x.max(10.0) * 1.1,
            y_min: -2.0,
            y_max: self.boom_tip.y.max(10.0) * 1.1,
        }
    }
}
