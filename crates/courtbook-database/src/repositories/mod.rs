//! Repository implementations for all CourtBook entities.

pub mod booking;
pub mod court;
pub mod payment;
pub mod venue;

pub use booking::BookingRepository;
pub use court::CourtRepository;
pub use payment::PaymentRepository;
pub use venue::VenueRepository;
