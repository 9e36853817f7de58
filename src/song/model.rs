//! Song data shapes: persisted entity, wire DTO, list-view metadata.
//!
//! All three are immutable values with camelCase wire names. Nullable
//! fields stay `Option`; collections default to empty when absent from a
//! request body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SongType {
    #[default]
    Normal,
    Hymn,
    Chorus,
}

/// External provenance of an imported song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSource {
    pub source_id: Option<String>,
    pub source_system: Option<String>,
}

/// Persisted representation. `id` is `None` for a detached (not yet stored)
/// song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongEntity {
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub song_type: SongType,
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub additional_titles: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    /// Stanza name to ordered lines. Entries of `lyric_order` are expected
    /// to be keys here, but this is not enforced.
    #[serde(default)]
    pub lyrics: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub lyric_order: Vec<String>,
    pub source: Option<SongSource>,
}

impl Entity for SongEntity {
    const KIND: &'static str = "song";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_id(&self, id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..self.clone()
        }
    }
}

/// Wire-facing representation; field-for-field isomorphic to [`SongEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub song_type: SongType,
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub additional_titles: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub lyrics: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub lyric_order: Vec<String>,
    pub source: Option<SongSource>,
}

/// Summary projection for list views: no authors, themes or lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub song_type: SongType,
    pub title: Option<String>,
    pub source: Option<SongSource>,
}
