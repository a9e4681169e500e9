// ABOUTME: Step kinds, field identifiers and per-step field layouts
// Each step carries its own fixed field list, choice options and rule set

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{Check, FieldRule, Schema};

/// Steps in the loan application wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Borrower,
    Director,
    Financial,
    Document,
}

impl StepKind {
    /// Get all steps in order
    pub fn all() -> &'static [StepKind] {
        &[Self::Borrower, Self::Director, Self::Financial, Self::Document]
    }

    /// Zero-based position in the wizard
    pub fn index(&self) -> usize {
        match self {
            Self::Borrower => 0,
            Self::Director => 1,
            Self::Financial => 2,
            Self::Document => 3,
        }
    }

    /// Get the step number (1-indexed for display)
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    /// Label shown on the progress track
    pub fn label(&self) -> &'static str {
        match self {
            Self::Borrower => "Borrower Info",
            Self::Director => "Director Info",
            Self::Financial => "Financial Info",
            Self::Document => "Document Upload",
        }
    }

    /// Heading shown above the form body
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Borrower => "Borrower Company Info",
            Self::Director => "Director Info",
            Self::Financial => "Financial Info",
            Self::Document => "Document Upload",
        }
    }

    /// Caption of the submit button
    pub fn submit_caption(&self) -> &'static str {
        match self {
            Self::Document => "Finish",
            _ => "Continue",
        }
    }

    /// The first step has no Back button
    pub fn has_back(&self) -> bool {
        *self != Self::Borrower
    }

    /// Fields rendered by this step, in display order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Borrower => BORROWER_FIELDS,
            Self::Director => DIRECTOR_FIELDS,
            Self::Financial => FINANCIAL_FIELDS,
            Self::Document => DOCUMENT_FIELDS,
        }
    }

    /// Field rule set evaluated on submit
    pub fn schema(&self) -> Schema {
        match self {
            Self::Borrower => Schema::new(vec![
                FieldRule::new(FieldId::PropertyName)
                    .check(Check::Required("Property Name is required")),
                FieldRule::new(FieldId::PropertyType)
                    .check(Check::Required("Property Type is required"))
                    .check(Check::OneOf(PROPERTY_TYPES, "Select a valid Property Type")),
                FieldRule::new(FieldId::UnitCount)
                    .check(Check::Required("No of units is required"))
                    .check(Check::Number("No of units must be a number"))
                    .check(Check::OneOf(UNIT_COUNTS, "Select a valid No of units")),
                FieldRule::new(FieldId::PropertyAddress)
                    .check(Check::Required("Property Address is required")),
                FieldRule::new(FieldId::FileAttachment)
                    .check(Check::Required("File attachment is required")),
            ]),
            Self::Director => Schema::new(vec![
                FieldRule::new(FieldId::Email)
                    .check(Check::Required("Email is required"))
                    .check(Check::Email("Invalid email")),
                FieldRule::new(FieldId::Age)
                    .check(Check::Required("Age is required"))
                    .check(Check::Number("Age must be a number"))
                    .check(Check::Positive("Age must be positive"))
                    .check(Check::Integer("Age must be an integer"))
                    .check(Check::AtMost(u32::MAX, "Age is too large")),
            ]),
            Self::Financial => Schema::new(vec![
                FieldRule::new(FieldId::Address).check(Check::Required("Address is required")),
                FieldRule::new(FieldId::City)
                    .check(Check::Required("City is required"))
                    .check(Check::OneOf(CITIES, "Select a valid City")),
                FieldRule::new(FieldId::PostalCode)
                    .check(Check::Required("Postal code is required")),
            ]),
            Self::Document => Schema::new(vec![
                FieldRule::new(FieldId::Phone).check(Check::Required("Phone number is required")),
            ]),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every field the wizard collects, across all steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    PropertyName,
    PropertyType,
    UnitCount,
    PropertyAddress,
    FileAttachment,
    Email,
    Age,
    Address,
    City,
    PostalCode,
    Phone,
}

impl FieldId {
    /// Key used in value files and log records
    pub fn key(&self) -> &'static str {
        match self {
            Self::PropertyName => "propertyName",
            Self::PropertyType => "propertyType",
            Self::UnitCount => "unitCount",
            Self::PropertyAddress => "propertyAddress",
            Self::FileAttachment => "fileAttachment",
            Self::Email => "email",
            Self::Age => "age",
            Self::Address => "address",
            Self::City => "city",
            Self::PostalCode => "postalCode",
            Self::Phone => "phone",
        }
    }
}

impl FieldId {
    /// Name used in messages shown to the user
    pub fn name(&self) -> &'static str {
        match self {
            Self::PropertyName => "Property Name",
            Self::PropertyType => "Property Type",
            Self::UnitCount => "No of units",
            Self::PropertyAddress => "Property Address",
            Self::FileAttachment => "File attachment",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::Address => "Address",
            Self::City => "City",
            Self::PostalCode => "Postal code",
            Self::Phone => "Phone number",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One selectable entry of a choice field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a field takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Multi-line text, newlines entered with Alt-Enter
    TextArea,
    Email,
    Number,
    Phone,
    /// Searchable dropdown; `clearable` mirrors whether the selection can be removed
    Choice {
        options: &'static [ChoiceOption],
        clearable: bool,
    },
    File,
}

/// Static description of one input on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(id: FieldId, label: &'static str, kind: FieldKind) -> Self {
        Self { id, label, kind }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }
}

pub const PROPERTY_TYPES: &[ChoiceOption] = &[
    ChoiceOption { value: "ownHouse", label: "Own House" },
    ChoiceOption { value: "commercial", label: "Commercial" },
    ChoiceOption { value: "industrial", label: "Industrial" },
    ChoiceOption { value: "rawLand", label: "Raw Land" },
];

pub const UNIT_COUNTS: &[ChoiceOption] = &[
    ChoiceOption { value: "1", label: "1" },
    ChoiceOption { value: "2", label: "2" },
    ChoiceOption { value: "3", label: "3" },
    ChoiceOption { value: "4", label: "4" },
    ChoiceOption { value: "5", label: "5" },
    ChoiceOption { value: "6", label: "6" },
    ChoiceOption { value: "7", label: "7" },
    ChoiceOption { value: "8", label: "8" },
    ChoiceOption { value: "9", label: "9" },
    ChoiceOption { value: "10", label: "10" },
];

pub const CITIES: &[ChoiceOption] = &[
    ChoiceOption { value: "chennai", label: "Chennai" },
    ChoiceOption { value: "bangalore", label: "Bangalore" },
    ChoiceOption { value: "mumbai", label: "Mumbai" },
    ChoiceOption { value: "hyderabad", label: "Hyderabad" },
];

const BORROWER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(FieldId::PropertyName, "Property Name", FieldKind::Text),
    FieldSpec::new(
        FieldId::PropertyType,
        "Property Type",
        FieldKind::Choice { options: PROPERTY_TYPES, clearable: true },
    ),
    FieldSpec::new(
        FieldId::UnitCount,
        "Number of Units",
        FieldKind::Choice { options: UNIT_COUNTS, clearable: false },
    ),
    FieldSpec::new(FieldId::PropertyAddress, "Property Address", FieldKind::TextArea),
    FieldSpec::new(FieldId::FileAttachment, "File Attachment", FieldKind::File),
];

const DIRECTOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(FieldId::Email, "Enter your email", FieldKind::Email),
    FieldSpec::new(FieldId::Age, "Enter your age", FieldKind::Number),
];

const FINANCIAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(FieldId::Address, "Enter your address", FieldKind::Text),
    FieldSpec::new(
        FieldId::City,
        "Enter your city",
        FieldKind::Choice { options: CITIES, clearable: true },
    ),
    FieldSpec::new(FieldId::PostalCode, "Enter your postal code", FieldKind::Text),
];

const DOCUMENT_FIELDS: &[FieldSpec] = &[FieldSpec::new(
    FieldId::Phone,
    "Enter your phone number",
    FieldKind::Phone,
)];
