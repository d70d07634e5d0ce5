pub mod report;
pub mod tree;
