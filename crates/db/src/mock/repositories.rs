use std::collections::HashSet;

use async_trait::async_trait;
use mockall::mock;
use tablebook_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, NewBooking, Slot},
        table::Table,
    },
    repository::BookingRepository,
};

// Mock repositories for testing
mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn list_tables(&self) -> BookingResult<Vec<Table>>;

        async fn find_booked_tables(&self, slot: &Slot) -> BookingResult<HashSet<i32>>;

        async fn insert_booking(
            &self,
            booking: &NewBooking,
            table_id: i32,
        ) -> BookingResult<Booking>;
    }
}
