//! Alert delivery.

pub mod line;

pub use line::LineNotifier;
