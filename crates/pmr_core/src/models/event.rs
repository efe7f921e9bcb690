use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::events::qualifiers::Qualifiers;

pub type TeamId = i64;
pub type PlayerId = i64;

/// Event type vocabulary of the event feed.
///
/// Unknown display names are kept verbatim in `Other` so nothing is lost on
/// the way to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Pass,
    OffsidePass,
    TakeOn,
    Carry,
    Foul,
    Card,
    Aerial,
    Tackle,
    Challenge,
    Interception,
    Clearance,
    BlockedPass,
    Block,
    BallRecovery,
    BallTouch,
    Dispossessed,
    Error,
    Save,
    Claim,
    Punch,
    KeeperPickup,
    CornerAwarded,
    OffsideProvoked,
    OffsideGiven,
    /// Literal "Shot" spelling used by some feeds.
    Shot,
    MissedShots,
    SavedShot,
    ShotOnPost,
    Goal,
    SubstitutionOn,
    SubstitutionOff,
    FormationSet,
    FormationChange,
    Start,
    End,
    /// Missing or empty type.
    Unknown,
    Other(String),
}

impl EventType {
    pub fn from_display(name: &str) -> Self {
        match name {
            "Pass" => EventType::Pass,
            "OffsidePass" => EventType::OffsidePass,
            "TakeOn" => EventType::TakeOn,
            "Carry" => EventType::Carry,
            "Foul" => EventType::Foul,
            "Card" => EventType::Card,
            "Aerial" => EventType::Aerial,
            "Tackle" => EventType::Tackle,
            "Challenge" => EventType::Challenge,
            "Interception" => EventType::Interception,
            "Clearance" => EventType::Clearance,
            "BlockedPass" => EventType::BlockedPass,
            "Block" => EventType::Block,
            "BallRecovery" => EventType::BallRecovery,
            "BallTouch" => EventType::BallTouch,
            "Dispossessed" => EventType::Dispossessed,
            "Error" => EventType::Error,
            "Save" => EventType::Save,
            "Claim" => EventType::Claim,
            "Punch" => EventType::Punch,
            "KeeperPickup" => EventType::KeeperPickup,
            "CornerAwarded" => EventType::CornerAwarded,
            "OffsideProvoked" => EventType::OffsideProvoked,
            "OffsideGiven" => EventType::OffsideGiven,
            "Shot" => EventType::Shot,
            "MissedShots" => EventType::MissedShots,
            "SavedShot" => EventType::SavedShot,
            "ShotOnPost" => EventType::ShotOnPost,
            "Goal" => EventType::Goal,
            "SubstitutionOn" => EventType::SubstitutionOn,
            "SubstitutionOff" => EventType::SubstitutionOff,
            "FormationSet" => EventType::FormationSet,
            "FormationChange" => EventType::FormationChange,
            "Start" => EventType::Start,
            "End" => EventType::End,
            "" => EventType::Unknown,
            other => EventType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Pass => "Pass",
            EventType::OffsidePass => "OffsidePass",
            EventType::TakeOn => "TakeOn",
            EventType::Carry => "Carry",
            EventType::Foul => "Foul",
            EventType::Card => "Card",
            EventType::Aerial => "Aerial",
            EventType::Tackle => "Tackle",
            EventType::Challenge => "Challenge",
            EventType::Interception => "Interception",
            EventType::Clearance => "Clearance",
            EventType::BlockedPass => "BlockedPass",
            EventType::Block => "Block",
            EventType::BallRecovery => "BallRecovery",
            EventType::BallTouch => "BallTouch",
            EventType::Dispossessed => "Dispossessed",
            EventType::Error => "Error",
            EventType::Save => "Save",
            EventType::Claim => "Claim",
            EventType::Punch => "Punch",
            EventType::KeeperPickup => "KeeperPickup",
            EventType::CornerAwarded => "CornerAwarded",
            EventType::OffsideProvoked => "OffsideProvoked",
            EventType::OffsideGiven => "OffsideGiven",
            EventType::Shot => "Shot",
            EventType::MissedShots => "MissedShots",
            EventType::SavedShot => "SavedShot",
            EventType::ShotOnPost => "ShotOnPost",
            EventType::Goal => "Goal",
            EventType::SubstitutionOn => "SubstitutionOn",
            EventType::SubstitutionOff => "SubstitutionOff",
            EventType::FormationSet => "FormationSet",
            EventType::FormationChange => "FormationChange",
            EventType::Start => "Start",
            EventType::End => "End",
            EventType::Unknown => "",
            EventType::Other(name) => name,
        }
    }

    /// Shot family: MissedShots, SavedShot, ShotOnPost, Goal, plus the literal "Shot".
    pub fn is_shot(&self) -> bool {
        matches!(
            self,
            EventType::Shot
                | EventType::MissedShots
                | EventType::SavedShot
                | EventType::ShotOnPost
                | EventType::Goal
        )
    }

    pub fn is_shot_on_target(&self) -> bool {
        matches!(self, EventType::SavedShot | EventType::Goal)
    }

    pub fn is_defensive_action(&self) -> bool {
        matches!(
            self,
            EventType::Tackle
                | EventType::Interception
                | EventType::Clearance
                | EventType::BlockedPass
                | EventType::Challenge
        )
    }

    pub fn is_carry(&self) -> bool {
        matches!(self, EventType::Carry | EventType::TakeOn)
    }

    pub fn is_key_moment(&self) -> bool {
        matches!(
            self,
            EventType::Goal | EventType::SubstitutionOn | EventType::SubstitutionOff | EventType::Card
        )
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(EventType::from_display(&name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Successful,
    Unsuccessful,
}

impl Outcome {
    pub fn from_display(name: &str) -> Option<Self> {
        match name {
            "Successful" => Some(Outcome::Successful),
            "Unsuccessful" => Some(Outcome::Unsuccessful),
            _ => None,
        }
    }
}

/// Match period, keyed by the feed's numeric period value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    FirstHalf,
    SecondHalf,
    FirstExtra,
    SecondExtra,
    PenaltyShootout,
    Other(i64),
}

impl Default for Period {
    fn default() -> Self {
        Period::FirstHalf
    }
}

impl Period {
    pub fn from_value(value: i64) -> Self {
        match value {
            1 => Period::FirstHalf,
            2 => Period::SecondHalf,
            3 => Period::FirstExtra,
            4 => Period::SecondExtra,
            5 => Period::PenaltyShootout,
            other => Period::Other(other),
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Period::FirstHalf => 1,
            Period::SecondHalf => 2,
            Period::FirstExtra => 3,
            Period::SecondExtra => 4,
            Period::PenaltyShootout => 5,
            Period::Other(v) => *v,
        }
    }

    /// Match-clock minute at which this period starts.
    ///
    /// Periods outside 1..=5 (pre/post match markers) start at 0.
    pub fn base_minute(&self) -> f64 {
        match self {
            Period::FirstHalf => 0.0,
            Period::SecondHalf => 45.0,
            Period::FirstExtra => 90.0,
            Period::SecondExtra => 105.0,
            Period::PenaltyShootout => 120.0,
            Period::Other(_) => 0.0,
        }
    }
}

/// One normalized on-pitch action. Coordinates are in match-space meters.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Row position in the table; defines adjacency for receiver inference.
    pub index: usize,
    pub event_id: Option<i64>,
    pub team_id: Option<TeamId>,
    pub player_id: Option<PlayerId>,
    pub period: Period,
    /// Display name as delivered by the feed (empty when absent).
    pub period_display: String,
    pub minute: f64,
    pub second: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    pub event_type: EventType,
    pub type_value: i64,
    pub outcome: Option<Outcome>,
    pub qualifiers: Qualifiers,

    pub cumulative_minute: f64,
    /// NaN when either endpoint is missing.
    pub distance: f64,
    /// Radians; NaN when either endpoint is missing.
    pub angle: f64,
    pub is_progressive: bool,
    pub dist_to_goal: f64,
    pub end_dist_to_goal: f64,
    pub is_key_pass: bool,
    pub is_assist: bool,
    pub is_goal: bool,
    pub is_own_goal: bool,
    /// Observed xG from the qualifier bag; 0.0 when the feed has none.
    pub xg: f64,
}

impl Event {
    pub fn is_successful(&self) -> bool {
        self.outcome == Some(Outcome::Successful)
    }

    pub fn is_shot(&self) -> bool {
        self.event_type.is_shot()
    }

    pub fn is_pass(&self) -> bool {
        self.event_type == EventType::Pass
    }

    pub fn belongs_to(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }

    /// Origin when both coordinates are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }

    /// x displacement from origin to end, NaN when undefined.
    pub fn dx(&self) -> f64 {
        match (self.x, self.end_x) {
            (Some(x), Some(end_x)) => end_x - x,
            _ => f64::NAN,
        }
    }

    pub fn x_or_nan(&self) -> f64 {
        self.x.unwrap_or(f64::NAN)
    }

    pub fn y_or_nan(&self) -> f64 {
        self.y.unwrap_or(f64::NAN)
    }
}
