pub mod copy;
pub mod error;
pub mod job;
pub mod notify;
pub mod window;
