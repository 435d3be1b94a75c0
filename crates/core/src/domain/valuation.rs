use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiamondShape {
    Round,
    Princess,
    Emerald,
    Cushion,
    Radiant,
    Asscher,
    Heart,
    Trilliant,
    Oval,
    Pear,
    Marquise,
    Baguette,
}

/// The grading report a valuation staff member submits for one request.
/// Field names follow the backend wire contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub proportions: String,
    pub diamond_origin: String,
    pub carat_weight: Decimal,
    pub measurements: String,
    pub polish: String,
    #[serde(rename = "flourescence")]
    pub fluorescence: String,
    pub color: String,
    pub cut: String,
    pub clarity: String,
    pub symmetry: String,
    pub shape: DiamondShape,
    pub price: Decimal,
}

/// Partially filled grading form. All fields are required before submission;
/// `complete` is the single gate that turns a draft into a submittable result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValuationDraft {
    pub proportions: Option<String>,
    pub diamond_origin: Option<String>,
    pub carat_weight: Option<Decimal>,
    pub measurements: Option<String>,
    pub polish: Option<String>,
    pub fluorescence: Option<String>,
    pub color: Option<String>,
    pub cut: Option<String>,
    pub clarity: Option<String>,
    pub symmetry: Option<String>,
    pub shape: Option<DiamondShape>,
    pub price: Option<Decimal>,
}

impl ValuationDraft {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let text_fields = [
            ("proportions", &self.proportions),
            ("diamond_origin", &self.diamond_origin),
            ("measurements", &self.measurements),
            ("polish", &self.polish),
            ("fluorescence", &self.fluorescence),
            ("color", &self.color),
            ("cut", &self.cut),
            ("clarity", &self.clarity),
            ("symmetry", &self.symmetry),
        ];
        for (name, value) in text_fields {
            if value.as_deref().map(str::trim).map_or(true, str::is_empty) {
                missing.push(name);
            }
        }
        if self.carat_weight.is_none() {
            missing.push("carat_weight");
        }
        if self.shape.is_none() {
            missing.push("shape");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        missing
    }

    pub fn complete(self) -> Result<ValuationResult, DomainError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::MissingRequiredFields(missing));
        }

        let (Some(carat_weight), Some(shape), Some(price)) =
            (self.carat_weight, self.shape, self.price)
        else {
            return Err(DomainError::MissingRequiredFields(vec!["carat_weight", "shape", "price"]));
        };
        if carat_weight <= Decimal::ZERO {
            return Err(DomainError::InvariantViolation(
                "carat_weight must be positive".to_string(),
            ));
        }
        if price <= Decimal::ZERO {
            return Err(DomainError::InvariantViolation("price must be positive".to_string()));
        }

        Ok(ValuationResult {
            proportions: self.proportions.unwrap_or_default(),
            diamond_origin: self.diamond_origin.unwrap_or_default(),
            carat_weight,
            measurements: self.measurements.unwrap_or_default(),
            polish: self.polish.unwrap_or_default(),
            fluorescence: self.fluorescence.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            cut: self.cut.unwrap_or_default(),
            clarity: self.clarity.unwrap_or_default(),
            symmetry: self.symmetry.unwrap_or_default(),
            shape,
            price,
        })
    }
}
