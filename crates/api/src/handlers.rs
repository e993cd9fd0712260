pub mod booking;
pub mod order;
