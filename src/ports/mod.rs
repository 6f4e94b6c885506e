//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters: storage
//! for the value table and observation of training runs.

pub mod observer;
pub mod repository;

pub use observer::Observer;
pub use repository::TableRepository;
