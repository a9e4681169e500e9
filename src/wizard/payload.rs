// ABOUTME: Typed per-step payloads built from validated raw field values

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::step::{FieldId, StepKind};
use super::validation::{FieldError, FormValues, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    OwnHouse,
    Commercial,
    Industrial,
    RawLand,
}

impl PropertyType {
    fn from_value(value: &str) -> Option<Self> {
        match value {
            "ownHouse" => Some(Self::OwnHouse),
            "commercial" => Some(Self::Commercial),
            "industrial" => Some(Self::Industrial),
            "rawLand" => Some(Self::RawLand),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Chennai,
    Bangalore,
    Mumbai,
    Hyderabad,
}

impl City {
    fn from_value(value: &str) -> Option<Self> {
        match value {
            "chennai" => Some(Self::Chennai),
            "bangalore" => Some(Self::Bangalore),
            "mumbai" => Some(Self::Mumbai),
            "hyderabad" => Some(Self::Hyderabad),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerInfo {
    pub property_name: String,
    pub property_type: PropertyType,
    pub unit_count: u32,
    pub property_address: String,
    pub file_attachment: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorInfo {
    pub email: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInfo {
    pub address: String,
    pub city: City,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub phone: String,
}

/// Data collected by one successfully submitted step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "lowercase")]
pub enum StepPayload {
    Borrower(BorrowerInfo),
    Director(DirectorInfo),
    Financial(FinancialInfo),
    Document(DocumentInfo),
}

impl StepPayload {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Borrower(_) => StepKind::Borrower,
            Self::Director(_) => StepKind::Director,
            Self::Financial(_) => StepKind::Financial,
            Self::Document(_) => StepKind::Document,
        }
    }

    /// Validate `values` against the step's rule set and build the typed payload
    pub fn build(kind: StepKind, values: &FormValues) -> Result<Self, ValidationErrors> {
        kind.schema().validate(values)?;

        let reader = Reader { values };
        let payload = match kind {
            StepKind::Borrower => Self::Borrower(BorrowerInfo {
                property_name: reader.text(FieldId::PropertyName),
                property_type: reader.parse(FieldId::PropertyType, PropertyType::from_value)?,
                unit_count: reader.parse(FieldId::UnitCount, whole_number)?,
                property_address: reader.text(FieldId::PropertyAddress),
                file_attachment: PathBuf::from(reader.text(FieldId::FileAttachment)),
            }),
            StepKind::Director => Self::Director(DirectorInfo {
                email: reader.text(FieldId::Email),
                age: reader.parse(FieldId::Age, whole_number)?,
            }),
            StepKind::Financial => Self::Financial(FinancialInfo {
                address: reader.text(FieldId::Address),
                city: reader.parse(FieldId::City, City::from_value)?,
                postal_code: reader.text(FieldId::PostalCode),
            }),
            StepKind::Document => Self::Document(DocumentInfo {
                phone: reader.text(FieldId::Phone),
            }),
        };
        Ok(payload)
    }
}

struct Reader<'a> {
    values: &'a FormValues,
}

impl Reader<'_> {
    fn raw(&self, field: FieldId) -> &str {
        self.values.get(&field).map(|v| v.trim()).unwrap_or("")
    }

    fn text(&self, field: FieldId) -> String {
        self.raw(field).to_string()
    }

    /// Values passed the schema already, so a conversion failure is not expected
    fn parse<T>(&self, field: FieldId, f: impl FnOnce(&str) -> Option<T>) -> Result<T, ValidationErrors> {
        f(self.raw(field))
            .ok_or_else(|| FieldError::new(field, format!("{} is out of range", field.name())).into())
    }
}

/// Whole number in any float notation the rules accept ("30", "30.0", "1e1")
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: &str) -> Option<u32> {
    let n = value.parse::<f64>().ok()?;
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}
