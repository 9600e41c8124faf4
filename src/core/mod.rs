//! Core business logic - framework-agnostic operations over the school's collections.
//!
//! Every operation takes the database connection by reference and recomputes derived
//! values (balances, totals, the schedule grid) from current state on each call.

/// Dashboard statistics derived from all collections
pub mod dashboard;
/// Payments, expenses and financial aggregation
pub mod finance;
/// Id assignment shared by every collection
pub mod ids;
/// Instructor management
pub mod instructor;
/// Lesson management and the practical/theoretical variant
pub mod lesson;
/// Printable receipts and student files
pub mod print;
/// Weekly schedule grid
pub mod schedule;
/// Loading the fixed sample data
pub mod seed;
/// Language and school identity settings
pub mod settings;
/// Student and document management
pub mod student;
/// Shared input validation
pub mod validate;
/// Vehicle management
pub mod vehicle;
