//! Listing parameters: raw query-string DTO and the normalized query built from it

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::AppError;

/// Columns a listing may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Duration,
    Title,
}

impl SortField {
    /// Parse a client supplied field name. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "createdAt" | "created_at" => Some(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Some(SortField::UpdatedAt),
            "duration" => Some(SortField::Duration),
            "title" => Some(SortField::Title),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Duration => "duration",
            SortField::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Accepts exactly `1` or `-1`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<i64>() {
            Ok(1) => Some(SortDirection::Ascending),
            Ok(-1) => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl VideoSort {
    /// Sort used whenever the client does not supply a valid field and direction pair.
    pub const DEFAULT: VideoSort = VideoSort {
        field: SortField::CreatedAt,
        direction: SortDirection::Ascending,
    };

    /// Both halves must be valid, otherwise the default applies.
    pub fn from_params(sort_by: Option<&str>, sort_type: Option<&str>) -> Self {
        match (
            sort_by.and_then(SortField::parse),
            sort_type.and_then(SortDirection::parse),
        ) {
            (Some(field), Some(direction)) => VideoSort { field, direction },
            _ => VideoSort::DEFAULT,
        }
    }
}

impl Default for VideoSort {
    fn default() -> Self {
        VideoSort::DEFAULT
    }
}

/// Query string accepted by the listing endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VideoListParams {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Page size (default 3, at most 100)
    pub limit: Option<String>,
    /// Full-text search over title and description
    pub query: Option<String>,
    /// One of `createdAt`, `updatedAt`, `duration`, `title`
    pub sort_by: Option<String>,
    /// `1` ascending or `-1` descending
    pub sort_type: Option<String>,
    /// Only videos owned by this user
    pub user_id: Option<String>,
}

/// Normalized listing query
#[derive(Debug, Clone, PartialEq)]
pub struct VideoListQuery {
    pub page: i64,
    pub limit: i64,
    pub search_text: Option<String>,
    pub sort: VideoSort,
    pub owner_id: Option<Uuid>,
}

impl Default for VideoListQuery {
    fn default() -> Self {
        VideoListQuery {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
            search_text: None,
            sort: VideoSort::DEFAULT,
            owner_id: None,
        }
    }
}

impl VideoListQuery {
    /// Rows skipped before this page. Saturates so an absurd page number
    /// yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

impl VideoListParams {
    /// Normalize raw parameters. Only a malformed `userId` is an error; other
    /// malformed values fall back to their defaults.
    pub fn into_query(self) -> Result<VideoListQuery, AppError> {
        let page = parse_number(self.page.as_deref())
            .unwrap_or(DEFAULT_PAGE)
            .max(1);
        let limit = parse_number(self.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);

        let search_text = self
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let owner_id = match self.user_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::InvalidInput(format!("Invalid userId: {}", raw)))?,
            ),
            _ => None,
        };

        Ok(VideoListQuery {
            page,
            limit,
            search_text,
            sort: VideoSort::from_params(self.sort_by.as_deref(), self.sort_type.as_deref()),
            owner_id,
        })
    }
}
