pub mod forecast;
pub use self::forecast::forecast;

pub mod health;
pub use self::health::health;
