//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard statistics command
pub mod dashboard;

/// Payment, expense and finance summary commands
pub mod finance;

/// General utility commands
pub mod general;

/// Instructor management commands
pub mod instructor;

/// Lesson management and the weekly schedule
pub mod lesson;

/// Language and school identity commands
pub mod settings;

/// Student and document management commands
pub mod student;

/// Vehicle management commands
pub mod vehicle;

// Export commands
pub use dashboard::*;
pub use finance::*;
pub use general::*;
pub use instructor::*;
pub use lesson::*;
pub use settings::*;
pub use student::*;
pub use vehicle::*;

use crate::{bot::BotData, errors::Error};

/// Every top-level command registered with Discord.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        dashboard(),
        student(),
        instructor(),
        vehicle(),
        lesson(),
        schedule(),
        payment(),
        expense(),
        finance(),
        settings(),
    ]
}
