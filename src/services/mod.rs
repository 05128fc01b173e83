pub mod analysis;
pub mod csv;
pub mod store;
