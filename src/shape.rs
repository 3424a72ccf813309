use std::f64::consts::PI;
use std::str::FromStr;

use derive_more::Display;
use join_lazy_fmt::Join;
use thiserror::Error;

use crate::outcome::{make_failure, make_success, Outcome};

/// Closed set of shapes. Every consumer which dispatches on the case must handle all of them:
/// there's no wildcard arm anywhere in this crate, so a new case breaks the build until each
/// dispatcher (and each [ShapeVisitor]) handles it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Shape {
    Circle { radius: f64 },
    Square { side: f64 },
    Triangle { base: f64, height: f64 },
}

/// The case tag of a [Shape]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ShapeKind {
    #[display(fmt = "circle")]
    Circle,
    #[display(fmt = "square")]
    Square,
    #[display(fmt = "triangle")]
    Triangle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown shape kind: {given}. Valid ones are: [{valid}]")]
pub struct UnknownShapeKind {
    given: String,
    valid: String,
}

/// Dispatch over every case of [Shape], one method per case.
///
/// Implementors don't get a default, so adding a case to [Shape] means adding a method here and
/// every visitor stops compiling until it handles the new case.
pub trait ShapeVisitor {
    type Output;

    fn circle(&mut self, radius: f64) -> Self::Output;
    fn square(&mut self, side: f64) -> Self::Output;
    fn triangle(&mut self, base: f64, height: f64) -> Self::Output;
}

/// Computes the area of each case
struct Area;

/// Computes the tag of each case
struct Kind;

impl ShapeKind {
    /// Every tag, each exactly once
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];
}

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.trim().to_ascii_lowercase();
        match ShapeKind::ALL.iter().find(|kind| kind.to_string() == lowercase) {
            Some(kind) => Ok(*kind),
            None => Err(UnknownShapeKind {
                given: s.to_string(),
                valid: ", ".join(ShapeKind::ALL.iter()).to_string(),
            })
        }
    }
}

impl Shape {
    /// Circle, failing if `radius` isn't a finite non-negative number
    pub fn circle(radius: f64) -> Outcome<Shape> {
        dimension("radius", radius).map(|radius| Shape::Circle { radius })
    }

    /// Square, failing if `side` isn't a finite non-negative number
    pub fn square(side: f64) -> Outcome<Shape> {
        dimension("side", side).map(|side| Shape::Square { side })
    }

    /// Triangle, failing if `base` or `height` isn't a finite non-negative number
    pub fn triangle(base: f64, height: f64) -> Outcome<Shape> {
        dimension("base", base).and_then(|base| {
            dimension("height", height).map(|height| Shape::Triangle { base, height })
        })
    }

    pub fn visit<V: ShapeVisitor>(&self, visitor: &mut V) -> V::Output {
        match *self {
            Shape::Circle { radius } => visitor.circle(radius),
            Shape::Square { side } => visitor.square(side),
            Shape::Triangle { base, height } => visitor.triangle(base, height)
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.visit(&mut Kind)
    }

    pub fn area(&self) -> f64 {
        area(self)
    }
}

/// Area of `shape`: `π·r²`, `side²`, or `base·height/2`
pub fn area(shape: &Shape) -> f64 {
    let area = shape.visit(&mut Area);
    log::debug!("area of {} {:?} = {}", shape.kind(), shape, area);
    area
}

fn dimension(name: &str, value: f64) -> Outcome<f64> {
    if value.is_finite() && value >= 0.0 {
        make_success(value)
    } else {
        make_failure(format!("{} must be a finite, non-negative number, got {}", name, value))
    }
}

impl ShapeVisitor for Area {
    type Output = f64;

    fn circle(&mut self, radius: f64) -> f64 {
        PI * radius.powi(2)
    }

    fn square(&mut self, side: f64) -> f64 {
        side.powi(2)
    }

    fn triangle(&mut self, base: f64, height: f64) -> f64 {
        (base * height) / 2.0
    }
}

impl ShapeVisitor for Kind {
    type Output = ShapeKind;

    fn circle(&mut self, _radius: f64) -> ShapeKind {
        ShapeKind::Circle
    }

    fn square(&mut self, _side: f64) -> ShapeKind {
        ShapeKind::Square
    }

    fn triangle(&mut self, _base: f64, _height: f64) -> ShapeKind {
        ShapeKind::Triangle
    }
}
