mod error;
mod format;
mod handlers;
mod router;

pub use router::router;
