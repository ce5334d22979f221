//! Query pipelines assembling denormalized video views.
//!
//! Stages are emitted in a fixed order: match, sort, paginate, join, shape.
//! Pagination runs inside the `page` CTE, before the owner join, so the page
//! is cut from the matched videos and the join only decorates it.

use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;
use vidora_core::models::{
    CommentView, OwnerProfile, OwnerSummary, VideoDetail, VideoListQuery, VideoSort, VideoSummary,
};

/// Columns of `videos` in [`vidora_core::models::Video`] field order.
pub const VIDEO_COLUMNS: &str = "id, video_file, thumbnail, title, description, duration, \
     owner_id, is_published, created_at, updated_at";

/// Full-text expression; must match the GIN index in the migrations.
const SEARCH_VECTOR: &str = "to_tsvector('english', v.title || ' ' || v.description)";

fn push_order_by(builder: &mut QueryBuilder<'static, Postgres>, alias: &str, sort: VideoSort) {
    let direction = sort.direction.as_sql();
    builder
        .push(" ORDER BY ")
        .push(format!(
            "{alias}.{column} {direction}, {alias}.id {direction}",
            alias = alias,
            column = sort.field.column(),
            direction = direction
        ));
}

/// Listing of published videos with owner summaries.
///
/// Videos whose owner row is missing are dropped by the inner join.
pub fn published_list_query(query: &VideoListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "WITH page AS (SELECT v.id, v.video_file, v.thumbnail, v.title, v.duration, \
         v.owner_id, v.created_at, v.updated_at FROM videos v",
    );

    // match
    builder.push(" WHERE v.is_published = TRUE");
    if let Some(ref text) = query.search_text {
        builder
            .push(" AND ")
            .push(SEARCH_VECTOR)
            .push(" @@ plainto_tsquery('english', ")
            .push_bind(text.clone())
            .push(")");
    }
    if let Some(owner_id) = query.owner_id {
        builder.push(" AND v.owner_id = ").push_bind(owner_id);
    }

    // sort
    push_order_by(&mut builder, "v", query.sort);

    // paginate
    builder
        .push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset())
        .push(")");

    // join + shape
    builder.push(
        " SELECT page.id, page.video_file, page.thumbnail, page.title, page.duration, \
         page.created_at, u.id AS owner_id, u.username AS owner_username \
         FROM page INNER JOIN users u ON u.id = page.owner_id",
    );
    push_order_by(&mut builder, "page", query.sort);

    builder
}

/// Detail of one published video with owner, comments and like count.
///
/// Bind the video id as `$1`.
pub const PUBLISHED_DETAIL_QUERY: &str = r#"
SELECT
    v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration,
    v.is_published, v.created_at, v.updated_at,
    u.id AS owner_id, u.username AS owner_username, u.avatar AS owner_avatar,
    COALESCE((
        SELECT json_agg(
            json_build_object(
                'id', c.id,
                'content', c.content,
                'createdAt', c.created_at,
                'owner', json_build_object('id', cu.id, 'username', cu.username, 'avatar', cu.avatar)
            )
            ORDER BY c.created_at, c.id
        )
        FROM comments c
        INNER JOIN users cu ON cu.id = c.owner_id
        WHERE c.video_id = v.id
    ), '[]'::json) AS comments,
    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count
FROM videos v
LEFT JOIN users u ON u.id = v.owner_id
WHERE v.id = $1 AND v.is_published = TRUE
"#;

#[derive(Debug, FromRow)]
pub struct VideoSummaryRow {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub duration: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub owner_id: Uuid,
    pub owner_username: String,
}

impl From<VideoSummaryRow> for VideoSummary {
    fn from(row: VideoSummaryRow) -> Self {
        VideoSummary {
            id: row.id,
            video_file: row.video_file,
            thumbnail: row.thumbnail,
            owner: OwnerSummary {
                id: row.owner_id,
                username: row.owner_username,
            },
            title: row.title,
            duration: row.duration,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct VideoDetailRow {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub owner_id: Option<Uuid>,
    pub owner_username: Option<String>,
    pub owner_avatar: Option<String>,
    pub comments: Json<Vec<CommentView>>,
    pub likes_count: i64,
}

impl From<VideoDetailRow> for VideoDetail {
    fn from(row: VideoDetailRow) -> Self {
        let owner = match (row.owner_id, row.owner_username) {
            (Some(id), Some(username)) => Some(OwnerProfile {
                id,
                username,
                avatar: row.owner_avatar.unwrap_or_default(),
            }),
            _ => None,
        };

        VideoDetail {
            id: row.id,
            video_file: row.video_file,
            thumbnail: row.thumbnail,
            title: row.title,
            description: row.description,
            duration: row.duration,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner,
            comments: row.comments.0,
            likes_count: row.likes_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidora_core::models::{SortDirection, SortField};

    fn position(sql: &str, needle: &str) -> usize {
        sql.find(needle)
            .unwrap_or_else(|| panic!("{:?} not found in {}", needle, sql))
    }

    #[test]
    fn test_default_listing_only_filters_published() {
        let builder = published_list_query(&VideoListQuery::default());
        let sql = builder.sql();

        assert!(sql.contains("WHERE v.is_published = TRUE"));
        assert!(!sql.contains("plainto_tsquery"));
        assert!(!sql.contains("v.owner_id ="));
        assert!(sql.contains("ORDER BY v.created_at ASC, v.id ASC"));
        assert!(sql.contains("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_listing_stages_are_in_order() {
        let query = VideoListQuery {
            search_text: Some("rust".to_string()),
            owner_id: Some(Uuid::new_v4()),
            ..VideoListQuery::default()
        };
        let builder = published_list_query(&query);
        let sql = builder.sql();

        let matched = position(sql, "WHERE v.is_published");
        let sorted = position(sql, "ORDER BY v.");
        let paginated = position(sql, "LIMIT");
        let joined = position(sql, "INNER JOIN users");
        assert!(matched < sorted && sorted < paginated && paginated < joined);
    }

    #[test]
    fn test_search_and_owner_filters_are_bound() {
        let query = VideoListQuery {
            search_text: Some("rust; DROP TABLE videos".to_string()),
            owner_id: Some(Uuid::new_v4()),
            ..VideoListQuery::default()
        };
        let builder = published_list_query(&query);
        let sql = builder.sql();

        assert!(sql.contains(
            "to_tsvector('english', v.title || ' ' || v.description) @@ plainto_tsquery('english', $1)"
        ));
        assert!(sql.contains("AND v.owner_id = $2"));
        assert!(sql.contains("LIMIT $3 OFFSET $4"));
        assert!(!sql.contains("DROP TABLE"));
    }

    #[test]
    fn test_sort_uses_whitelisted_column_and_direction() {
        let query = VideoListQuery {
            sort: VideoSort {
                field: SortField::Duration,
                direction: SortDirection::Descending,
            },
            ..VideoListQuery::default()
        };
        let builder = published_list_query(&query);
        let sql = builder.sql();

        assert!(sql.contains("ORDER BY v.duration DESC, v.id DESC"));
        assert!(sql.ends_with("ORDER BY page.duration DESC, page.id DESC"));
    }

    #[test]
    fn test_detail_query_filters_published_and_counts_likes() {
        assert!(PUBLISHED_DETAIL_QUERY.contains("WHERE v.id = $1 AND v.is_published = TRUE"));
        assert!(PUBLISHED_DETAIL_QUERY.contains("COUNT(*) FROM likes l WHERE l.video_id = v.id"));
        assert!(PUBLISHED_DETAIL_QUERY.contains("ORDER BY c.created_at, c.id"));
        assert!(PUBLISHED_DETAIL_QUERY.contains("LEFT JOIN users u"));
    }

    #[test]
    fn test_detail_row_without_owner_maps_to_none() {
        let now = chrono::Utc::now();
        let row = VideoDetailRow {
            id: Uuid::new_v4(),
            video_file: String::new(),
            thumbnail: String::new(),
            title: "A".to_string(),
            description: "B".to_string(),
            duration: 0.0,
            is_published: true,
            created_at: now,
            updated_at: now,
            owner_id: None,
            owner_username: None,
            owner_avatar: None,
            comments: Json(Vec::new()),
            likes_count: 2,
        };
        let detail = VideoDetail::from(row);
        assert!(detail.owner.is_none());
        assert_eq!(detail.likes_count, 2);
    }
}
