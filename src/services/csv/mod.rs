pub mod parser;
pub mod validate;

pub use parser::parse_document;
pub use validate::validate_upload;
