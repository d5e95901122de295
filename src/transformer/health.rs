use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

use super::{Results, TransformError, Transformer, expect_args};
use crate::value::Value;

const HEALTHY_MIN: f64 = 18.5;
const HEALTHY_MAX: f64 = 24.9;

/// `bmi(weight, height)` → `(bmi, is_healthy)`
///
/// Weight in kilograms, height in meters. The index is rounded half away
/// from zero to one decimal before the healthy range check.
pub struct Bmi;

impl Transformer for Bmi {
    fn usage(&self) -> &'static str {
        "bmi(weight, height) - body mass index rounded to one decimal, and whether it is healthy"
    }

    fn transform(&self, args: &[Value], _document: &Value) -> Result<Results, TransformError> {
        expect_args("bmi", args, 2)?;

        let (Some(weight), Some(height)) = (args[0].as_float(), args[1].as_float()) else {
            return Err(TransformError::Type(format!(
                "bmi requires numeric weight and height, got {} and {}",
                args[0].type_name(),
                args[1].type_name()
            )));
        };

        if height == 0.0 {
            return Err(TransformError::Type("bmi requires a non-zero height".to_string()));
        }

        let bmi = round_one_decimal(weight / (height * height))?;
        let is_healthy = (HEALTHY_MIN..=HEALTHY_MAX).contains(&bmi);

        Ok(vec![Value::Float(bmi), Value::Boolean(is_healthy)])
    }
}

fn round_one_decimal(n: f64) -> Result<f64, TransformError> {
    Decimal::from_f64(n)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .ok_or_else(|| TransformError::Type(format!("bmi result {} is out of range", n)))
}
