pub mod classifier;
pub mod driving_license;
pub mod era_date;
pub mod extractors;
pub mod national_id;
pub mod normalize;
pub mod patterns;
pub mod residence_card;

pub use classifier::{ClassificationScore, DocumentClassifier};
pub use driving_license::DrivingLicenseExtractor;
pub use era_date::{find_date, Calendar};
pub use national_id::NationalIdExtractor;
pub use normalize::{normalize, normalize_lines};
pub use residence_card::ResidenceCardExtractor;
