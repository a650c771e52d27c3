use serde::{Deserialize, Serialize};

/// The two logical collections. Each kind has its own encoder fit, index
/// state and vector index; they are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Animal,
    Group,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Animal => write!(f, "animal"),
            EntityKind::Group => write!(f, "group"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animal" | "animals" => Ok(EntityKind::Animal),
            "group" | "groups" => Ok(EntityKind::Group),
            _ => Err(()),
        }
    }
}

/// A rescue animal as stored by the record store. Attribute fields may be
/// incomplete; missing values render as empty strings for vectorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: i64,
    #[serde(default)]
    pub shelter_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Species/breed description, e.g. "korean short hair"
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub neuter: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub happen_place: Option<String>,
    #[serde(default)]
    pub special_mark: Option<String>,
    /// Generated introduction; unset until the enrichment pipeline commits
    /// the record's batch.
    #[serde(default)]
    pub intro_title: Option<String>,
    #[serde(default)]
    pub intro_body: Option<String>,
    /// Soft-removal marker. Removed records are excluded from
    /// (re)vectorization but may linger in index state until the next full
    /// rebuild.
    #[serde(default)]
    pub removed: bool,
}

impl AnimalRecord {
    /// The text representation fed to the vectorizer. One canonical
    /// attribute order, used at startup and for every incremental batch.
    pub fn feature_text(&self) -> String {
        [
            self.age.as_deref().unwrap_or(""),
            self.color.as_deref().unwrap_or(""),
            self.gender.as_deref().unwrap_or(""),
            self.kind.as_deref().unwrap_or(""),
            self.region.as_deref().unwrap_or(""),
            self.happen_place.as_deref().unwrap_or(""),
            self.special_mark.as_deref().unwrap_or(""),
            self.neuter.as_deref().unwrap_or(""),
        ]
        .join(" ")
    }

    pub fn has_intro(&self) -> bool {
        self.intro_title.is_some()
    }
}

/// A volunteer group. Groups are indexed and recommended like animals but
/// never receive generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub sub_district: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

impl GroupRecord {
    pub fn feature_text(&self) -> String {
        [
            self.name.as_deref().unwrap_or(""),
            self.province.as_deref().unwrap_or(""),
            self.district.as_deref().unwrap_or(""),
            self.sub_district.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
        ]
        .join(" ")
    }
}

/// A record of either kind, as returned by the record store.
#[derive(Debug, Clone)]
pub enum Entity {
    Animal(AnimalRecord),
    Group(GroupRecord),
}

impl Entity {
    pub fn id(&self) -> i64 {
        match self {
            Entity::Animal(a) => a.id,
            Entity::Group(g) => g.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Animal(_) => EntityKind::Animal,
            Entity::Group(_) => EntityKind::Group,
        }
    }

    pub fn feature_text(&self) -> String {
        match self {
            Entity::Animal(a) => a.feature_text(),
            Entity::Group(g) => g.feature_text(),
        }
    }

    pub fn is_removed(&self) -> bool {
        match self {
            Entity::Animal(a) => a.removed,
            Entity::Group(g) => g.removed,
        }
    }
}
