//! Catalog document model
//!
//! The catalog groups tracks into a fixed, ordered set of categories.
//! Serialization preserves that order so that two runs over the same files
//! produce byte-identical output.

use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use suno_common::{json_file, Result};

use crate::classifier::Classification;

/// Catalog format version
pub const CATALOG_VERSION: &str = "1.0.0";

/// Static description of a category bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// Categories in output order
pub const CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        id: "norteno",
        name: "Norteño",
        emoji: "🎸",
        description: "Traditional norteño style with accordion and bajo sexto",
    },
    CategoryInfo {
        id: "banda",
        name: "Banda",
        emoji: "🎺",
        description: "Brass-heavy banda sinaloense style",
    },
    CategoryInfo {
        id: "tumbado",
        name: "Corrido Tumbado",
        emoji: "🔥",
        description: "Modern corrido tumbado with trap influences",
    },
    CategoryInfo {
        id: "trap",
        name: "Trap Corrido",
        emoji: "💀",
        description: "Heavy trap beats with corrido lyrics",
    },
    CategoryInfo {
        id: "rap",
        name: "Rap Mexicano",
        emoji: "🎤",
        description: "Mexican hip-hop and rap",
    },
];

/// A single audio file entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub style: String,
    pub artist: Option<String>,
    pub subgenre: Option<String>,
    pub url: String,
}

impl Track {
    /// Build a track from its classification
    pub fn new(id: String, filename: String, url: String, meta: Classification) -> Self {
        Self {
            id,
            filename,
            title: meta.title,
            style: meta.style,
            artist: meta.artist,
            subgenre: meta.subgenre,
            url,
        }
    }
}

/// One category with its tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    #[serde(skip)]
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub tracks: Vec<Track>,
}

impl From<&CategoryInfo> for CategoryBucket {
    fn from(info: &CategoryInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            emoji: info.emoji,
            description: info.description,
            tracks: Vec::new(),
        }
    }
}

/// Ordered category map, serialized as a JSON object keyed by category id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<CategoryBucket>);

impl Categories {
    pub fn iter(&self) -> impl Iterator<Item = &CategoryBucket> {
        self.0.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CategoryBucket> {
        self.0.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut CategoryBucket> {
        self.0.iter_mut().find(|b| b.id == id)
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for bucket in &self.0 {
            map.serialize_entry(bucket.id, bucket)?;
        }
        map.end()
    }
}

/// Per-category line of the run summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub count: usize,
}

/// The aggregated catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub version: String,
    pub total_tracks: usize,
    pub categories: Categories,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Empty catalog with every category declared
    pub fn new() -> Self {
        Self {
            version: CATALOG_VERSION.to_string(),
            total_tracks: 0,
            categories: Categories(CATEGORIES.iter().map(CategoryBucket::from).collect()),
        }
    }

    /// Append a track to `category`
    ///
    /// Returns `false` and drops the track when the category is not declared.
    /// `total_tracks` counts only accepted tracks.
    pub fn add_track(&mut self, category: &str, track: Track) -> bool {
        match self.categories.get_mut(category) {
            Some(bucket) => {
                bucket.tracks.push(track);
                self.total_tracks += 1;
                true
            }
            None => false,
        }
    }

    /// Track counts per category, in output order
    pub fn summary(&self) -> Vec<CategoryCount> {
        self.categories
            .iter()
            .map(|b| CategoryCount {
                id: b.id,
                name: b.name,
                emoji: b.emoji,
                count: b.tracks.len(),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        json_file::to_pretty_json(self)
    }

    /// Write the catalog to `path`, replacing any previous file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        json_file::write_json_pretty(path, self)
    }
}
