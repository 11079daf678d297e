mod booking;
mod feedback;

pub use self::booking::*;
pub use self::feedback::*;
