//! Typed selections parsed once at the API boundary.
//!
//! Callers submit a loose JSON bag; each service has a typed selection struct
//! with defaults for every omitted field, serde aliases for the key synonyms
//! seen in the wild, and unknown keys silently ignored. Everything past the
//! boundary works with these types only.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::catalog::ServiceId;
use crate::errors::PricingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanType {
    #[default]
    Standard,
    Deep,
    #[serde(alias = "move-out", alias = "moveout")]
    MoveOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastCleaned {
    #[serde(rename = "30_days")]
    WithinMonth,
    #[serde(rename = "1_6_months")]
    OneToSixMonths,
    #[serde(rename = "6_plus_months")]
    SixPlusMonths,
    Never,
}

impl LastCleaned {
    /// Neglected homes take noticeably longer on a first visit.
    pub fn is_neglected(self) -> bool {
        matches!(self, Self::SixPlusMonths | Self::Never)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSize {
    Minimum,
    Eighth,
    Quarter,
    Half,
    ThreeQuarter,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarpetTier {
    #[default]
    Standard,
    Deep,
    Pet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CarpetPackage {
    #[serde(rename = "3br")]
    ThreeBedroom,
    #[serde(rename = "4_5br")]
    FourFiveBedroom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotSize {
    #[default]
    Quarter,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandscapePlan {
    #[default]
    OneTimeMow,
    Cleanup,
    MowGo,
    FullService,
    Premium,
}

impl LandscapePlan {
    pub fn is_monthly(self) -> bool {
        matches!(self, Self::MowGo | Self::FullService | Self::Premium)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolTier {
    #[default]
    Basic,
    Standard,
    FullService,
    DeepClean,
}

impl PoolTier {
    pub fn is_monthly(self) -> bool {
        !matches!(self, Self::DeepClean)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarageSize {
    #[default]
    Small,
    Medium,
    Large,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationTier {
    #[default]
    Standard,
    Aerial,
}

fn one() -> u32 {
    1
}

/// Caps applied at parse. Counts past these are clamped, which keeps every
/// downstream quantity multiplication and accumulation in range.
const MAX_COUNT: u32 = 999;
const MAX_CREW: u32 = 99;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSelection {
    #[serde(alias = "itemId")]
    pub id: String,
    #[serde(default = "one", alias = "qty", alias = "count")]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskSelection {
    #[serde(alias = "taskId", alias = "id")]
    pub task_id: String,
    #[serde(default = "one", alias = "qty")]
    pub quantity: u32,
    /// Variable-axis choices, e.g. `{"wallType": "brick"}`.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleaningSelections {
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub stories: u8,
    #[serde(alias = "scope", alias = "tier")]
    pub clean_type: CleanType,
    #[serde(alias = "sqft")]
    pub square_footage: Option<u32>,
    pub last_cleaned: Option<LastCleaned>,
    pub has_pets: bool,
    pub same_day: bool,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    #[serde(alias = "rush")]
    pub is_rush: bool,
}

impl Default for CleaningSelections {
    fn default() -> Self {
        Self {
            bedrooms: 3,
            bathrooms: 2,
            stories: 1,
            clean_type: CleanType::Standard,
            square_footage: None,
            last_cleaned: None,
            has_pets: false,
            same_day: false,
            is_recurring: false,
            frequency: None,
            is_rush: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarpetSelections {
    #[serde(alias = "cleanType", alias = "method")]
    pub tier: CarpetTier,
    pub rooms: u32,
    pub hallways: u32,
    #[serde(alias = "stairs")]
    pub stair_flights: u32,
    #[serde(alias = "scotchgard")]
    pub scotchgard_rooms: u32,
    pub package: Option<CarpetPackage>,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    #[serde(alias = "rush")]
    pub is_rush: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JunkSelections {
    pub items: Vec<ItemSelection>,
    #[serde(alias = "size", alias = "load")]
    pub load_size: Option<LoadSize>,
    #[serde(alias = "rush")]
    pub is_rush: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandymanSelections {
    pub tasks: Vec<TaskSelection>,
    /// Hourly fallback when no cataloged task fits.
    pub hours: Option<u32>,
    #[serde(alias = "rush")]
    pub is_rush: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GutterSelections {
    #[serde(alias = "storyCount")]
    pub stories: u8,
    #[serde(alias = "feet")]
    pub linear_feet: u32,
}

impl Default for GutterSelections {
    fn default() -> Self {
        Self { stories: 1, linear_feet: 150 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandscapingSelections {
    pub lot_size: LotSize,
    #[serde(alias = "plan", alias = "tier")]
    pub plan_type: LandscapePlan,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolSelections {
    #[serde(alias = "plan")]
    pub tier: PoolTier,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PressureSelections {
    #[serde(alias = "sqft")]
    pub square_footage: u32,
}

impl Default for PressureSelections {
    fn default() -> Self {
        Self { square_footage: 480 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovingSelections {
    pub hours: u32,
    #[serde(alias = "numPros", alias = "pros")]
    pub crew_size: u32,
    #[serde(alias = "rush")]
    pub is_rush: bool,
}

impl Default for MovingSelections {
    fn default() -> Self {
        Self { hours: 2, crew_size: 2, is_rush: false }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GarageSelections {
    pub size: GarageSize,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DemolitionSelections {}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsultationSelections {
    #[serde(alias = "type", alias = "scanType")]
    pub tier: ConsultationTier,
}

/// Tagged union of per-service selections, keyed by service id.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceSelections {
    Cleaning(CleaningSelections),
    Carpet(CarpetSelections),
    Junk(JunkSelections),
    Handyman(HandymanSelections),
    Gutter(GutterSelections),
    Landscaping(LandscapingSelections),
    Pool(PoolSelections),
    Pressure(PressureSelections),
    Moving(MovingSelections),
    Garage(GarageSelections),
    Demolition(DemolitionSelections),
    Consultation(ConsultationSelections),
}

impl ServiceSelections {
    /// Parse the loose bag for a known service. Missing fields take documented
    /// defaults; a bag that is not an object (other than `null`) is rejected.
    /// Count fields are clamped to their caps.
    pub fn parse(service: &ServiceId, raw: &serde_json::Value) -> Result<Self, PricingError> {
        let parsed = match service.as_str() {
            "home_cleaning" => Self::Cleaning(parse_bag(service, raw)?),
            "carpet_cleaning" => Self::Carpet(parse_bag(service, raw)?),
            "junk_removal" => Self::Junk(parse_bag(service, raw)?),
            "handyman" => Self::Handyman(parse_bag(service, raw)?),
            "gutter_cleaning" => Self::Gutter(parse_bag(service, raw)?),
            "landscaping" => Self::Landscaping(parse_bag(service, raw)?),
            "pool_cleaning" => Self::Pool(parse_bag(service, raw)?),
            "pressure_washing" => Self::Pressure(parse_bag(service, raw)?),
            "moving_labor" => Self::Moving(parse_bag(service, raw)?),
            "garage_cleanout" => Self::Garage(parse_bag(service, raw)?),
            "light_demolition" => Self::Demolition(parse_bag(service, raw)?),
            "home_consultation" => Self::Consultation(parse_bag(service, raw)?),
            other => return Err(PricingError::UnknownService(other.to_string())),
        };
        Ok(parsed.clamped())
    }

    fn clamped(mut self) -> Self {
        match &mut self {
            Self::Carpet(sel) => {
                sel.rooms = sel.rooms.min(MAX_COUNT);
                sel.hallways = sel.hallways.min(MAX_COUNT);
                sel.stair_flights = sel.stair_flights.min(MAX_COUNT);
                sel.scotchgard_rooms = sel.scotchgard_rooms.min(MAX_COUNT);
            }
            Self::Junk(sel) => {
                for item in &mut sel.items {
                    item.quantity = item.quantity.min(MAX_COUNT);
                }
            }
            Self::Handyman(sel) => {
                for task in &mut sel.tasks {
                    task.quantity = task.quantity.min(MAX_COUNT);
                }
                sel.hours = sel.hours.map(|h| h.min(MAX_COUNT));
            }
            Self::Moving(sel) => {
                sel.hours = sel.hours.min(MAX_COUNT);
                sel.crew_size = sel.crew_size.min(MAX_CREW);
            }
            _ => {}
        }
        self
    }
}

fn parse_bag<T>(service: &ServiceId, raw: &serde_json::Value) -> Result<T, PricingError>
where
    T: DeserializeOwned + Default,
{
    if raw.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(raw.clone()).map_err(|err| PricingError::InvalidSelections {
        service: service.to_string(),
        reason: err.to_string(),
    })
}
