pub mod event;
pub mod match_info;
pub mod team;

pub use event::{Event, EventType, Outcome, Period, PlayerId, TeamId};
pub use match_info::MatchInfo;
pub use team::{Player, Team};
