//! Domain layer for the burner list tooling
//!
//! Architecture: Domain Model - list invariants, their violations and the list file itself
//! - Violations and reports carry no formatting or network concerns
//! - The list file format is a plain newline-delimited text file

pub mod list;
pub mod violations;

// Re-export main domain types for convenience
pub use list::*;
pub use violations::*;
