use serde::{Deserialize, Serialize};

use crate::error::TerraPulseError;

// --- Geo Types ---

/// A `[longitude, latitude]` pair, in GeoJSON axis order.
pub type LngLat = [f64; 2];

/// Default map view for the Northern Virginia study area.
pub const HOME_CENTER: LngLat = [-77.44, 38.92];

/// Boundary of a detected construction footprint. Serializes as a GeoJSON
/// geometry object (`{"type": ..., "coordinates": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(LngLat),
    Polygon(Vec<Vec<LngLat>>),
    MultiPolygon(Vec<Vec<Vec<LngLat>>>),
}

impl Geometry {
    /// Midpoint of the bounding box over every vertex of the geometry.
    /// `None` when the geometry has no vertices.
    pub fn bbox_center(&self) -> Option<LngLat> {
        let points: Vec<LngLat> = match self {
            Geometry::Point(p) => vec![*p],
            Geometry::Polygon(rings) => rings.iter().flatten().copied().collect(),
            Geometry::MultiPolygon(polys) => polys.iter().flatten().flatten().copied().collect(),
        };
        if points.is_empty() {
            return None;
        }

        let (mut min_lng, mut min_lat) = (f64::INFINITY, f64::INFINITY);
        let (mut max_lng, mut max_lat) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for [lng, lat] in points {
            min_lng = min_lng.min(lng);
            max_lng = max_lng.max(lng);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
        }
        Some([(min_lng + max_lng) / 2.0, (min_lat + max_lat) / 2.0])
    }
}

// --- Project ---

/// A detected construction footprint and the site conditions around it.
/// Immutable once fetched; a refetch replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub county: String,
    pub footprint_acres: f64,
    pub change_area_m2: f64,
    /// Construction intensity, 0-100.
    pub intensity_score: u8,
    pub date_range: String,
    /// Site water stress, 0.0-1.0.
    pub water_stress_normalized: f64,
    pub center: LngLat,
    pub geometry: Geometry,
}

impl Project {
    pub fn validate(&self) -> Result<(), TerraPulseError> {
        if self.project_id.is_empty() {
            return Err(TerraPulseError::Validation("project_id is empty".into()));
        }
        if self.intensity_score > 100 {
            return Err(TerraPulseError::Validation(format!(
                "{}: intensity_score {} exceeds 100",
                self.project_id, self.intensity_score
            )));
        }
        if !(0.0..=1.0).contains(&self.water_stress_normalized) {
            return Err(TerraPulseError::Validation(format!(
                "{}: water_stress_normalized {} outside 0.0-1.0",
                self.project_id, self.water_stress_normalized
            )));
        }
        if self.footprint_acres < 0.0 || self.change_area_m2 < 0.0 {
            return Err(TerraPulseError::Validation(format!(
                "{}: negative area",
                self.project_id
            )));
        }
        Ok(())
    }
}

// --- Scenario ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolingType {
    Evaporative,
    Hybrid,
    Air,
}

impl CoolingType {
    /// Display order for comparisons: least to most water-intensive.
    pub const ALL: [CoolingType; 3] = [CoolingType::Air, CoolingType::Hybrid, CoolingType::Evaporative];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoolingType::Evaporative => "evaporative",
            CoolingType::Hybrid => "hybrid",
            CoolingType::Air => "air",
        }
    }
}

impl std::fmt::Display for CoolingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CoolingType {
    type Err = TerraPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evaporative" => Ok(CoolingType::Evaporative),
            "hybrid" => Ok(CoolingType::Hybrid),
            "air" => Ok(CoolingType::Air),
            other => Err(TerraPulseError::Validation(format!(
                "unknown cooling type: {other}"
            ))),
        }
    }
}

/// Supported facility sizes. Serializes as the bare megawatt number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SizeMw {
    Small,
    Medium,
    Hyperscale,
}

impl SizeMw {
    pub const ALL: [SizeMw; 3] = [SizeMw::Small, SizeMw::Medium, SizeMw::Hyperscale];

    pub fn megawatts(&self) -> u32 {
        match self {
            SizeMw::Small => 20,
            SizeMw::Medium => 50,
            SizeMw::Hyperscale => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeMw::Small => "Small (20 MW)",
            SizeMw::Medium => "Medium (50 MW)",
            SizeMw::Hyperscale => "Hyperscale (100 MW)",
        }
    }
}

impl TryFrom<u32> for SizeMw {
    type Error = TerraPulseError;

    fn try_from(mw: u32) -> Result<Self, Self::Error> {
        match mw {
            20 => Ok(SizeMw::Small),
            50 => Ok(SizeMw::Medium),
            100 => Ok(SizeMw::Hyperscale),
            other => Err(TerraPulseError::Validation(format!(
                "unsupported size_mw {other} (expected 20, 50 or 100)"
            ))),
        }
    }
}

impl From<SizeMw> for u32 {
    fn from(size: SizeMw) -> Self {
        size.megawatts()
    }
}

impl std::fmt::Display for SizeMw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} MW", self.megawatts())
    }
}

/// User-controlled what-if inputs. Transient; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioParameters {
    pub size_mw: SizeMw,
    pub cooling_type: CoolingType,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            size_mw: SizeMw::Medium,
            cooling_type: CoolingType::Hybrid,
        }
    }
}

// --- Scores ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Low => write!(f, "Low"),
            Tier::Moderate => write!(f, "Moderate"),
            Tier::High => write!(f, "High"),
        }
    }
}

/// The inputs a score was derived from, kept for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAssumptions {
    pub size_mw: u32,
    pub cooling_type: CoolingType,
    pub wue_l_per_kwh: f64,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub annual_energy_kwh: f64,
    pub annual_water_liters: f64,
    pub olympic_pools: f64,
    pub water_stress_normalized: f64,
    /// 0-100, rounded to two decimals.
    pub impact_score: f64,
    pub tier: Tier,
    pub assumptions: ScoreAssumptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountySummary {
    pub county: String,
    pub project_count: usize,
    pub total_change_area_m2: f64,
    pub avg_stress: f64,
    pub avg_intensity: f64,
    pub projected_annual_water_liters: f64,
    pub projected_impact_score: f64,
    pub projected_tier: Tier,
}

// --- API metadata ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Bundled sample projects.
    Sample,
    /// Projects loaded from a GeoJSON export.
    Geojson,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Sample => write!(f, "sample"),
            DataSource::Geojson => write!(f, "geojson"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMeta {
    pub data_source: DataSource,
    pub project_count: usize,
    pub expects_geojson_at: String,
}
