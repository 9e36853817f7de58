//! Field-for-field conversion between the song shapes.

use crate::entity::EntityConverter;
use crate::song::model::{Song, SongEntity, SongMetadata};

pub struct SongConverter;

impl EntityConverter<SongEntity, Song, SongMetadata> for SongConverter {
    fn entity_to_dto(&self, entity: &SongEntity) -> Song {
        Song {
            id: entity.id.clone(),
            song_type: entity.song_type,
            title: entity.title.clone(),
            authors: entity.authors.clone(),
            additional_titles: entity.additional_titles.clone(),
            themes: entity.themes.clone(),
            lyrics: entity.lyrics.clone(),
            lyric_order: entity.lyric_order.clone(),
            source: entity.source.clone(),
        }
    }

    fn dto_to_entity(&self, dto: &Song) -> SongEntity {
        SongEntity {
            id: dto.id.clone(),
            song_type: dto.song_type,
            title: dto.title.clone(),
            authors: dto.authors.clone(),
            additional_titles: dto.additional_titles.clone(),
            themes: dto.themes.clone(),
            lyrics: dto.lyrics.clone(),
            lyric_order: dto.lyric_order.clone(),
            source: dto.source.clone(),
        }
    }

    fn entity_to_metadata(&self, entity: &SongEntity) -> SongMetadata {
        SongMetadata {
            id: entity.id.clone(),
            song_type: entity.song_type,
            title: entity.title.clone(),
            source: entity.source.clone(),
        }
    }
}
