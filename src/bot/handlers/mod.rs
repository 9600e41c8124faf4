//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete,
//! button clicks, and other non-command interactions.

/// Autocomplete handlers for students, instructors, vehicles, lessons and money records
pub mod autocomplete;
/// Confirm/cancel buttons shown before a deletion
pub mod confirm;
