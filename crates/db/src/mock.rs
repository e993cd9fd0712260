pub mod memory;
pub mod repositories;

pub use memory::InMemoryBookingRepository;
pub use repositories::MockBookingRepo;
