pub mod analyzer;
pub mod correlation;
pub mod external;
pub mod inference;
pub mod insights;
pub mod patterns;
pub mod profile;
pub mod progress;
pub mod random;
pub mod rules;
pub mod standard;

pub use analyzer::CsvAnalyzer;
pub use random::RandomSource;
