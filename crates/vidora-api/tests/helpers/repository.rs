//! In-memory [`VideoRepositoryTrait`] with user, comment and like fixtures.
//!
//! Mirrors the PostgreSQL pipelines closely enough for handler tests: only
//! published videos are listed, owners are inner-joined, comments are ordered
//! by insertion and likes are counted on read.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::cmp::Ordering;
use std::sync::Mutex;
use uuid::Uuid;
use vidora_core::models::{
    Comment, CommentView, Like, NewVideo, OwnerProfile, OwnerSummary, SortDirection, SortField,
    User, Video, VideoDetail, VideoListQuery, VideoSummary,
};
use vidora_core::AppError;
use vidora_db::VideoRepositoryTrait;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    videos: Vec<Video>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
}

#[derive(Default)]
pub struct MockVideoRepository {
    inner: Mutex<Store>,
}

impl MockVideoRepository {
    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.inner.lock().expect("store poisoned")
    }

    pub fn add_user(&self, username: &str) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            avatar: format!("https://cdn.example.com/{}.png", username),
            created_at: Utc::now(),
        };
        let id = user.id;
        self.store().users.push(user);
        id
    }

    /// Insert a video directly, bypassing the HTTP layer.
    pub fn add_video(&self, owner_id: Uuid, title: &str, is_published: bool) -> Video {
        self.add_video_with(owner_id, title, is_published, |_| {})
    }

    pub fn add_video_with(
        &self,
        owner_id: Uuid,
        title: &str,
        is_published: bool,
        customize: impl FnOnce(&mut Video),
    ) -> Video {
        let mut store = self.store();
        // Strictly increasing timestamps keep insertion order observable
        let created_at = Utc::now() + Duration::milliseconds(store.videos.len() as i64);
        let mut video = Video {
            id: Uuid::new_v4(),
            video_file: format!("https://cdn.example.com/videos/{}.mp4", title),
            thumbnail: format!("https://cdn.example.com/thumbnails/{}.png", title),
            title: title.to_string(),
            description: format!("{} description", title),
            duration: 10.0,
            owner_id,
            is_published,
            created_at,
            updated_at: created_at,
        };
        customize(&mut video);
        store.videos.push(video.clone());
        video
    }

    pub fn add_comment(&self, video_id: Uuid, owner_id: Uuid, content: &str) {
        let mut store = self.store();
        let created_at = Utc::now() + Duration::milliseconds(store.comments.len() as i64);
        store.comments.push(Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            video_id,
            owner_id,
            created_at,
        });
    }

    pub fn add_like(&self, video_id: Uuid, owner_id: Uuid) {
        self.store().likes.push(Like {
            id: Uuid::new_v4(),
            video_id,
            owner_id,
            created_at: Utc::now(),
        });
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.store().videos.iter().find(|v| v.id == id).cloned()
    }

    pub fn video_count(&self) -> usize {
        self.store().videos.len()
    }
}

fn matches_search(video: &Video, text: &str) -> bool {
    let haystack = format!("{} {}", video.title, video.description).to_lowercase();
    text.split_whitespace()
        .all(|word| haystack.contains(&word.to_lowercase()))
}

fn compare(a: &Video, b: &Video, field: SortField) -> Ordering {
    let by_field = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Duration => a.duration.total_cmp(&b.duration),
        SortField::Title => a.title.cmp(&b.title),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

fn update<F>(store: &mut Store, id: Uuid, f: F) -> Option<Video>
where
    F: FnOnce(&mut Video),
{
    let video = store.videos.iter_mut().find(|v| v.id == id)?;
    f(video);
    video.updated_at = Utc::now();
    Some(video.clone())
}

#[async_trait]
impl VideoRepositoryTrait for MockVideoRepository {
    async fn list_published(&self, query: &VideoListQuery) -> Result<Vec<VideoSummary>, AppError> {
        let store = self.store();

        let mut matched: Vec<&Video> = store
            .videos
            .iter()
            .filter(|v| v.is_published)
            .filter(|v| {
                query
                    .search_text
                    .as_deref()
                    .map_or(true, |text| matches_search(v, text))
            })
            .filter(|v| query.owner_id.map_or(true, |owner| v.owner_id == owner))
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort.field);
            match query.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let summaries = matched
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .filter_map(|v| {
                let owner = store.users.iter().find(|u| u.id == v.owner_id)?;
                Some(VideoSummary {
                    id: v.id,
                    video_file: v.video_file.clone(),
                    thumbnail: v.thumbnail.clone(),
                    owner: OwnerSummary::from(owner),
                    title: v.title.clone(),
                    duration: v.duration,
                    created_at: v.created_at,
                })
            })
            .collect();

        Ok(summaries)
    }

    async fn find_published_detail(&self, id: Uuid) -> Result<Option<VideoDetail>, AppError> {
        let store = self.store();
        let Some(video) = store.videos.iter().find(|v| v.id == id && v.is_published) else {
            return Ok(None);
        };

        let mut comments: Vec<&Comment> =
            store.comments.iter().filter(|c| c.video_id == id).collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let comments = comments
            .into_iter()
            .filter_map(|c| {
                let owner = store.users.iter().find(|u| u.id == c.owner_id)?;
                Some(CommentView {
                    id: c.id,
                    content: c.content.clone(),
                    created_at: c.created_at,
                    owner: OwnerProfile::from(owner),
                })
            })
            .collect();

        Ok(Some(VideoDetail {
            id: video.id,
            video_file: video.video_file.clone(),
            thumbnail: video.thumbnail.clone(),
            title: video.title.clone(),
            description: video.description.clone(),
            duration: video.duration,
            is_published: video.is_published,
            created_at: video.created_at,
            updated_at: video.updated_at,
            owner: store
                .users
                .iter()
                .find(|u| u.id == video.owner_id)
                .map(OwnerProfile::from),
            comments,
            likes_count: store.likes.iter().filter(|l| l.video_id == id).count() as i64,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.get(id))
    }

    async fn create(&self, video: NewVideo) -> Result<Video, AppError> {
        let now = Utc::now();
        let created = Video {
            id: Uuid::new_v4(),
            video_file: video.video_file,
            thumbnail: video.thumbnail,
            title: video.title,
            description: video.description,
            duration: video.duration,
            owner_id: video.owner_id,
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        self.store().videos.push(created.clone());
        Ok(created)
    }

    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Video>, AppError> {
        Ok(update(&mut self.store(), id, |v| {
            v.title = title.to_string();
            v.description = description.to_string();
        }))
    }

    async fn update_thumbnail(
        &self,
        id: Uuid,
        thumbnail: &str,
    ) -> Result<Option<Video>, AppError> {
        Ok(update(&mut self.store(), id, |v| {
            v.thumbnail = thumbnail.to_string();
        }))
    }

    async fn toggle_published(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(update(&mut self.store(), id, |v| {
            v.is_published = !v.is_published;
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let mut store = self.store();
        let position = store.videos.iter().position(|v| v.id == id);
        Ok(position.map(|index| store.videos.remove(index)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
