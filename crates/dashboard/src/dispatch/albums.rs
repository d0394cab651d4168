use dashboard_api::{Album, AlbumId, ApiResult, Photo, UserId};
use tracing::debug;

use super::Dispatcher;
use crate::events::{DomainEvent, Operation};
use crate::store::{AlbumsAction, SliceStatus};

impl Dispatcher {
    #[tracing::instrument(skip(self))]
    pub async fn fetch_albums(&self, user_id: UserId) -> ApiResult<Vec<Album>> {
        let ticket = self.store.next_ticket();
        self.store.dispatch(AlbumsAction::AlbumsFetchStarted { ticket });

        match self.api.list_user_albums(user_id).await {
            Ok(albums) => {
                let count = albums.len();
                if self.store.dispatch(AlbumsAction::AlbumsFetchSucceeded {
                    ticket,
                    albums: albums.clone(),
                }) {
                    self.publish(DomainEvent::AlbumsLoaded { user_id, count });
                } else {
                    self.stale(Operation::LoadAlbums);
                }
                Ok(albums)
            }
            Err(err) => {
                if self.store.dispatch(AlbumsAction::AlbumsFetchFailed {
                    ticket,
                    error: err.to_string(),
                }) {
                    self.report_failure(Operation::LoadAlbums, &err);
                } else {
                    self.stale(Operation::LoadAlbums);
                }
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_album_photos(&self, album_id: AlbumId) -> ApiResult<Vec<Photo>> {
        let ticket = self.store.next_ticket();
        self.store
            .dispatch(AlbumsAction::PhotosFetchStarted { ticket, album_id });

        match self.api.list_album_photos(album_id).await {
            Ok(photos) => {
                let count = photos.len();
                if self.store.dispatch(AlbumsAction::PhotosFetchSucceeded {
                    ticket,
                    album_id,
                    photos: photos.clone(),
                }) {
                    self.publish(DomainEvent::PhotosLoaded { album_id, count });
                } else {
                    self.stale(Operation::LoadPhotos);
                }
                Ok(photos)
            }
            Err(err) => {
                if self.store.dispatch(AlbumsAction::PhotosFetchFailed {
                    ticket,
                    album_id,
                    error: err.to_string(),
                }) {
                    self.report_failure(Operation::LoadPhotos, &err);
                } else {
                    self.stale(Operation::LoadPhotos);
                }
                Err(err)
            }
        }
    }

    /// Select an album, loading its photos unless they are already loaded
    #[tracing::instrument(skip(self, album), fields(album_id = album.id))]
    pub async fn open_album(&self, album: Album) -> ApiResult<Vec<Photo>> {
        let album_id = album.id;
        self.store.dispatch(AlbumsAction::SelectAlbum(album));

        let cached = self.store.select(|state| {
            (state.albums.photo_status_for(album_id) == SliceStatus::Succeeded)
                .then(|| state.albums.photos_for(album_id).to_vec())
        });
        if let Some(photos) = cached {
            debug!("[Dispatcher] Photos of album {} already loaded", album_id);
            return Ok(photos);
        }
        self.fetch_album_photos(album_id).await
    }

    pub fn close_album(&self) {
        self.store.dispatch(AlbumsAction::ClearSelectedAlbum);
    }
}
