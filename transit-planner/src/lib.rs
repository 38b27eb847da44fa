//! Arrive-by transit journey planner.
//!
//! Answers: "what is the latest I can leave this stop and still reach that
//! one by a given time?" over an in-memory timetable, with a small HTTP
//! service in front.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod planner;
pub mod timetable;
pub mod web;
