//! Scheduled background tasks for CourtBook.
//!
//! One periodic job: the completion sweep, which moves confirmed
//! bookings whose interval has elapsed to completed. The sweep is
//! idempotent, so the in-process cron may run alongside an external
//! scheduler hitting the admin sweep endpoint.

pub mod scheduler;

pub use scheduler::CronScheduler;
