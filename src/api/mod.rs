pub mod health;
pub mod invoice;

pub use health::health_check;
pub use invoice::get_invoice;
