use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::ExtractionError;

/// Document layouts the engine knows how to read.
///
/// Declaration order matters: the classifier breaks score ties in favour of
/// the variant declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    ResidenceCard,
    NationalIdCard,
    DrivingLicense,
    Unknown,
}

pub const RESIDENCE_CARD_FIELDS: &[&str] = &[
    "full_name",
    "full_name_native",
    "date_of_birth",
    "nationality",
    "region",
    "gender",
    "status_of_residence",
    "period_of_stay",
    "work_restriction",
    "card_number",
    "issue_date",
    "expiry_date",
    "address",
];

pub const NATIONAL_ID_FIELDS: &[&str] = &[
    "full_name",
    "full_name_romaji",
    "date_of_birth",
    "gender",
    "address",
    "my_number",
    "issue_date",
    "expiry_date",
    "digital_cert_expiry",
];

pub const DRIVING_LICENSE_FIELDS: &[&str] = &[
    "full_name",
    "date_of_birth",
    "address",
    "license_number",
    "issue_date",
    "expiry_date",
    "license_categories",
    "conditions",
    "issuing_authority",
];

impl DocumentType {
    /// The layouts that carry a field schema, in declaration order.
    pub const KNOWN: [DocumentType; 3] = [
        DocumentType::ResidenceCard,
        DocumentType::NationalIdCard,
        DocumentType::DrivingLicense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ResidenceCard => "RESIDENCE_CARD",
            DocumentType::NationalIdCard => "NATIONAL_ID_CARD",
            DocumentType::DrivingLicense => "DRIVING_LICENSE",
            DocumentType::Unknown => "UNKNOWN",
        }
    }

    /// Ordered field schema. `Unknown` has none.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            DocumentType::ResidenceCard => RESIDENCE_CARD_FIELDS,
            DocumentType::NationalIdCard => NATIONAL_ID_FIELDS,
            DocumentType::DrivingLicense => DRIVING_LICENSE_FIELDS,
            DocumentType::Unknown => &[],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase().replace(|c: char| c == '-' || c == ' ', "_");
        match key.as_str() {
            "RESIDENCE_CARD" => Ok(DocumentType::ResidenceCard),
            "NATIONAL_ID_CARD" | "MYNUMBER_CARD" | "MY_NUMBER_CARD" => Ok(DocumentType::NationalIdCard),
            "DRIVING_LICENSE" => Ok(DocumentType::DrivingLicense),
            "UNKNOWN" => Ok(DocumentType::Unknown),
            _ => Err(ExtractionError::UnknownDocumentType(s.to_string())),
        }
    }
}

/// Borrowed view of one present field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

fn text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(FieldValue::Text)
}

/// Residence Card (在留カード) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResidenceCardFields {
    pub full_name: Option<String>,
    pub full_name_native: Option<String>,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub region: Option<String>,
    pub gender: Option<String>,
    pub status_of_residence: Option<String>,
    pub period_of_stay: Option<String>,
    pub work_restriction: Option<String>,
    pub card_number: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub address: Option<String>,
}

impl ResidenceCardFields {
    pub fn values(&self) -> Vec<(&'static str, Option<FieldValue<'_>>)> {
        vec![
            ("full_name", text(&self.full_name)),
            ("full_name_native", text(&self.full_name_native)),
            ("date_of_birth", text(&self.date_of_birth)),
            ("nationality", text(&self.nationality)),
            ("region", text(&self.region)),
            ("gender", text(&self.gender)),
            ("status_of_residence", text(&self.status_of_residence)),
            ("period_of_stay", text(&self.period_of_stay)),
            ("work_restriction", text(&self.work_restriction)),
            ("card_number", text(&self.card_number)),
            ("issue_date", text(&self.issue_date)),
            ("expiry_date", text(&self.expiry_date)),
            ("address", text(&self.address)),
        ]
    }
}

/// National ID (マイナンバーカード) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalIdFields {
    pub full_name: Option<String>,
    pub full_name_romaji: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub my_number: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub digital_cert_expiry: Option<String>,
}

impl NationalIdFields {
    pub fn values(&self) -> Vec<(&'static str, Option<FieldValue<'_>>)> {
        vec![
            ("full_name", text(&self.full_name)),
            ("full_name_romaji", text(&self.full_name_romaji)),
            ("date_of_birth", text(&self.date_of_birth)),
            ("gender", text(&self.gender)),
            ("address", text(&self.address)),
            ("my_number", text(&self.my_number)),
            ("issue_date", text(&self.issue_date)),
            ("expiry_date", text(&self.expiry_date)),
            ("digital_cert_expiry", text(&self.digital_cert_expiry)),
        ]
    }
}

/// Driving License (運転免許証) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrivingLicenseFields {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub license_categories: Option<Vec<String>>,
    pub conditions: Option<String>,
    pub issuing_authority: Option<String>,
}

impl DrivingLicenseFields {
    pub fn values(&self) -> Vec<(&'static str, Option<FieldValue<'_>>)> {
        vec![
            ("full_name", text(&self.full_name)),
            ("date_of_birth", text(&self.date_of_birth)),
            ("address", text(&self.address)),
            ("license_number", text(&self.license_number)),
            ("issue_date", text(&self.issue_date)),
            ("expiry_date", text(&self.expiry_date)),
            (
                "license_categories",
                self.license_categories.as_deref().map(FieldValue::List),
            ),
            ("conditions", text(&self.conditions)),
            ("issuing_authority", text(&self.issuing_authority)),
        ]
    }
}

/// One extraction, tagged by the layout it was read as.
///
/// Serializes as a flat record: `document_type` followed by every schema
/// field, absent ones as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionResult {
    ResidenceCard(ResidenceCardFields),
    NationalIdCard(NationalIdFields),
    DrivingLicense(DrivingLicenseFields),
    Unknown,
}

impl ExtractionResult {
    /// A record for `document_type` with every field absent.
    pub fn empty(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::ResidenceCard => ExtractionResult::ResidenceCard(ResidenceCardFields::default()),
            DocumentType::NationalIdCard => ExtractionResult::NationalIdCard(NationalIdFields::default()),
            DocumentType::DrivingLicense => ExtractionResult::DrivingLicense(DrivingLicenseFields::default()),
            DocumentType::Unknown => ExtractionResult::Unknown,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        match self {
            ExtractionResult::ResidenceCard(_) => DocumentType::ResidenceCard,
            ExtractionResult::NationalIdCard(_) => DocumentType::NationalIdCard,
            ExtractionResult::DrivingLicense(_) => DocumentType::DrivingLicense,
            ExtractionResult::Unknown => DocumentType::Unknown,
        }
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        self.document_type().field_names()
    }

    /// Every schema field in order, with `None` for absent ones.
    pub fn values(&self) -> Vec<(&'static str, Option<FieldValue<'_>>)> {
        match self {
            ExtractionResult::ResidenceCard(fields) => fields.values(),
            ExtractionResult::NationalIdCard(fields) => fields.values(),
            ExtractionResult::DrivingLicense(fields) => fields.values(),
            ExtractionResult::Unknown => Vec::new(),
        }
    }

    pub fn present_field_count(&self) -> usize {
        self.values().iter().filter(|(_, value)| value.is_some()).count()
    }
}

/// A recognized text line as emitted by the OCR collaborator. Only `text` is
/// read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    pub text: String,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub bbox: Option<[[f32; 2]; 4]>,
}
