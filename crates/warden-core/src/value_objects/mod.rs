//! Value objects - immutable types that represent domain concepts

mod day_key;
mod duration;
mod ids;

pub use day_key::DayKey;
pub use duration::{is_zero_duration, parse_duration_ms, MAX_SANCTION_DURATION_MS};
pub use ids::{ChannelId, GuildId, IdParseError, UserId};
