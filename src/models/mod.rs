pub mod credentials;
pub mod reservation;
pub mod station;
pub mod status;

pub use credentials::*;
pub use reservation::*;
pub use station::*;
pub use status::*;

pub const EMOJI_TRAIN: &str = "🚄";
pub const EMOJI_ROUTE: &str = "🛤️";
pub const EMOJI_DATE: &str = "🗓️";
pub const EMOJI_TIME: &str = "⏰";
pub const EMOJI_ATTEMPTS: &str = "🔁";
pub const EMOJI_CHECK: &str = "✅";
