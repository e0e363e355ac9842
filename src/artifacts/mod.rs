pub mod branch;
pub mod checkout;
pub mod errors;
pub mod graph;
pub mod merge;
pub mod objects;
pub mod staging;
