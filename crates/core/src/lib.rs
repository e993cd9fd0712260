//! # TableBook Core
//!
//! Domain types shared by every TableBook crate: the table and booking
//! models, the order payload, the error taxonomy, and the two seams the
//! rest of the system plugs into.
//!
//! - [`repository::BookingRepository`] is the narrow persistence interface.
//! - [`notify::Notifier`] delivers a subject/body message.
//! - [`allocator::TableAllocator`] picks a table for a party and records the booking.

pub mod allocator;
pub mod errors;
pub mod models;
pub mod notify;
pub mod repository;
