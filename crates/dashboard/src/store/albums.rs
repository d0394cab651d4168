//! Albums of the active user and their photos, loaded lazily per album

use dashboard_api::{Album, AlbumId, Photo};
use std::collections::HashMap;

use super::slice::{RequestTicket, SliceStatus, is_current};

#[derive(Debug, Clone, Default)]
pub struct AlbumsState {
    pub albums: Vec<Album>,
    pub status: SliceStatus,
    pub error: Option<String>,
    pub latest_ticket: Option<RequestTicket>,
    pub photos: HashMap<AlbumId, Vec<Photo>>,
    pub photo_status: HashMap<AlbumId, SliceStatus>,
    pub photo_tickets: HashMap<AlbumId, RequestTicket>,
    pub selected_album: Option<Album>,
}

impl AlbumsState {
    pub fn photos_for(&self, album_id: AlbumId) -> &[Photo] {
        self.photos
            .get(&album_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn photo_status_for(&self, album_id: AlbumId) -> SliceStatus {
        self.photo_status
            .get(&album_id)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub enum AlbumsAction {
    AlbumsFetchStarted {
        ticket: RequestTicket,
    },
    AlbumsFetchSucceeded {
        ticket: RequestTicket,
        albums: Vec<Album>,
    },
    AlbumsFetchFailed {
        ticket: RequestTicket,
        error: String,
    },
    PhotosFetchStarted {
        ticket: RequestTicket,
        album_id: AlbumId,
    },
    PhotosFetchSucceeded {
        ticket: RequestTicket,
        album_id: AlbumId,
        photos: Vec<Photo>,
    },
    PhotosFetchFailed {
        ticket: RequestTicket,
        album_id: AlbumId,
        error: String,
    },
    SelectAlbum(Album),
    ClearSelectedAlbum,
    Clear,
}

pub fn reduce(state: &mut AlbumsState, action: &AlbumsAction) -> bool {
    match action {
        AlbumsAction::AlbumsFetchStarted { ticket } => {
            state.status = SliceStatus::Loading;
            state.error = None;
            state.latest_ticket = Some(*ticket);
            true
        }
        AlbumsAction::AlbumsFetchSucceeded { ticket, albums } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Succeeded;
            state.albums = albums.clone();
            true
        }
        AlbumsAction::AlbumsFetchFailed { ticket, error } => {
            if !is_current(state.latest_ticket, *ticket) {
                return false;
            }
            state.status = SliceStatus::Failed;
            state.error = Some(error.clone());
            true
        }
        AlbumsAction::PhotosFetchStarted { ticket, album_id } => {
            state.photo_status.insert(*album_id, SliceStatus::Loading);
            state.photo_tickets.insert(*album_id, *ticket);
            state.error = None;
            true
        }
        AlbumsAction::PhotosFetchSucceeded {
            ticket,
            album_id,
            photos,
        } => {
            if !is_current(state.photo_tickets.get(album_id).copied(), *ticket) {
                return false;
            }
            state.photo_status.insert(*album_id, SliceStatus::Succeeded);
            state.photos.insert(*album_id, photos.clone());
            true
        }
        AlbumsAction::PhotosFetchFailed {
            ticket,
            album_id,
            error,
        } => {
            if !is_current(state.photo_tickets.get(album_id).copied(), *ticket) {
                return false;
            }
            state.photo_status.insert(*album_id, SliceStatus::Failed);
            state.error = Some(error.clone());
            true
        }
        AlbumsAction::SelectAlbum(album) => {
            state.selected_album = Some(album.clone());
            true
        }
        AlbumsAction::ClearSelectedAlbum => {
            state.selected_album.take().is_some()
        }
        AlbumsAction::Clear => {
            *state = AlbumsState::default();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(album_id: AlbumId, id: u64) -> Photo {
        Photo {
            album_id,
            id,
            title: format!("p{}", id),
            url: String::new(),
            thumbnail_url: String::new(),
        }
    }

    #[test]
    fn photos_are_tracked_per_album() {
        let mut state = AlbumsState::default();
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchStarted {
                ticket: 1,
                album_id: 1,
            },
        );
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchStarted {
                ticket: 2,
                album_id: 2,
            },
        );
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchSucceeded {
                ticket: 2,
                album_id: 2,
                photos: vec![photo(2, 10)],
            },
        );

        assert!(state.photo_status_for(1).is_loading());
        assert_eq!(state.photo_status_for(2), SliceStatus::Succeeded);
        assert_eq!(state.photos_for(2).len(), 1);
        assert!(state.photos_for(1).is_empty());
        assert_eq!(state.photo_status_for(3), SliceStatus::Idle);
    }

    #[test]
    fn photo_failure_keeps_other_albums() {
        let mut state = AlbumsState::default();
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchStarted {
                ticket: 1,
                album_id: 1,
            },
        );
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchSucceeded {
                ticket: 1,
                album_id: 1,
                photos: vec![photo(1, 1)],
            },
        );
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchStarted {
                ticket: 2,
                album_id: 2,
            },
        );
        reduce(
            &mut state,
            &AlbumsAction::PhotosFetchFailed {
                ticket: 2,
                album_id: 2,
                error: "gone".to_string(),
            },
        );

        assert_eq!(state.photo_status_for(2), SliceStatus::Failed);
        assert_eq!(state.photos_for(1).len(), 1);
        assert_eq!(state.error.as_deref(), Some("gone"));
    }
}
