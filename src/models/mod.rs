pub mod currency;
pub mod offer;
pub mod progress;

pub use currency::*;
pub use offer::*;
pub use progress::*;
