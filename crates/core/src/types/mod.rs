//! Core types for ClubHub.
//!
//! This module provides type-safe IDs and the document record shapes.

pub mod application;
pub mod calendar;
pub mod club;
pub mod id;
pub mod pending_club;
pub mod position;
pub mod post;
pub mod status;
pub mod timestamp;
pub mod user;

pub use application::SubmittedApplication;
pub use calendar::CalendarEvent;
pub use club::Club;
pub use id::*;
pub use pending_club::PendingClub;
pub use position::{ClosedPosition, OpenPosition, Position, PositionQuestion};
pub use post::Post;
pub use status::*;
pub use timestamp::parse_timestamp;
pub use user::User;
