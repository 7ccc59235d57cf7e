//! Response and request bodies for the Overseerr v1 API.
//!
//! Every field the server may omit is an `Option`; formatting code goes
//! through the accessor methods, which pick the default for a missing value.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::api::status::{MediaStatus, RequestStatus};

/// GET /status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_behind: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_required: Option<bool>,
}

impl ServerStatus {
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }

    /// Commit tag, if the server reports a non-empty one
    pub fn commit_tag(&self) -> Option<&str> {
        self.commit_tag.as_deref().filter(|t| !t.is_empty())
    }

    pub fn update_available(&self) -> bool {
        self.update_available.unwrap_or(false)
    }

    pub fn commits_behind(&self) -> u32 {
        self.commits_behind.unwrap_or(0)
    }
}

/// Paged TMDB-style listing used by search and discover endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPage<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> ResultsPage<T> {
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(1)
    }

    pub fn total_results(&self) -> u64 {
        self.total_results.unwrap_or(0)
    }
}

/// Local library state attached to a TMDB title
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

impl MediaInfo {
    pub fn tmdb_id(&self) -> u64 {
        self.tmdb_id.unwrap_or(0)
    }

    /// Library status, `None` when the server did not report one
    pub fn status(&self) -> Option<MediaStatus> {
        self.status.map(MediaStatus::from_code)
    }
}

fn library_status(info: &Option<MediaInfo>) -> Option<MediaStatus> {
    info.as_ref().and_then(MediaInfo::status)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_info: Option<MediaInfo>,
}

impl MovieResult {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn release_date(&self) -> &str {
        self.release_date.as_deref().unwrap_or_default()
    }

    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }

    pub fn library_status(&self) -> Option<MediaStatus> {
        library_status(&self.media_info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_info: Option<MediaInfo>,
}

impl TvResult {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn first_air_date(&self) -> &str {
        self.first_air_date.as_deref().unwrap_or_default()
    }

    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }

    pub fn library_status(&self) -> Option<MediaStatus> {
        library_status(&self.media_info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_for_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

impl PersonResult {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Entry of a mixed search or trending listing, tagged by `mediaType`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mediaType", rename_all = "lowercase")]
pub enum SearchResult {
    Movie(MovieResult),
    Tv(TvResult),
    Person(PersonResult),
    /// Collections and anything newer the server may add
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedEntry {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// GET /movie/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<NamedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_info: Option<MediaInfo>,
}

impl MovieDetails {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn release_date(&self) -> &str {
        self.release_date.as_deref().unwrap_or_default()
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    /// Runtime in minutes, if known and non-zero
    pub fn runtime(&self) -> Option<u32> {
        self.runtime.filter(|r| *r > 0)
    }

    pub fn vote_average(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }

    pub fn library_status(&self) -> Option<MediaStatus> {
        library_status(&self.media_info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_date: Option<String>,
}

impl SeasonSummary {
    pub fn season_number(&self) -> u32 {
        self.season_number.unwrap_or(0)
    }

    pub fn episode_count(&self) -> u32 {
        self.episode_count.unwrap_or(0)
    }

    pub fn air_date(&self) -> &str {
        self.air_date.as_deref().unwrap_or_default()
    }
}

/// GET /tv/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<NamedEntry>,
    #[serde(default)]
    pub networks: Vec<NamedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_info: Option<MediaInfo>,
}

impl TvDetails {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn first_air_date(&self) -> &str {
        self.first_air_date.as_deref().unwrap_or_default()
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    pub fn number_of_seasons(&self) -> u32 {
        self.number_of_seasons.unwrap_or(0)
    }

    pub fn number_of_episodes(&self) -> u32 {
        self.number_of_episodes.unwrap_or(0)
    }

    pub fn vote_average(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }

    pub fn library_status(&self) -> Option<MediaStatus> {
        library_status(&self.media_info)
    }

    /// Regular seasons, without the "Specials" season 0
    pub fn regular_seasons(&self) -> impl Iterator<Item = &SeasonSummary> {
        self.seasons.iter().filter(|s| s.season_number() != 0)
    }
}

/// Pagination block of the request and user listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Listing with a `pageInfo` block (GET /request, GET /user)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> ListPage<T> {
    /// Total number of matching entries on the server
    pub fn total(&self) -> u64 {
        self.page_info
            .as_ref()
            .and_then(|p| p.results)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plex_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    /// Username, falling back to the email address
    pub fn name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .unwrap_or_default()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    pub fn plex_username(&self) -> Option<&str> {
        self.plex_username.as_deref().filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is4k: Option<bool>,
}

impl MediaRequest {
    pub fn id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    pub fn status(&self) -> Option<RequestStatus> {
        self.status.map(RequestStatus::from_code)
    }

    pub fn tmdb_id(&self) -> u64 {
        self.media.as_ref().map(MediaInfo::tmdb_id).unwrap_or(0)
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media.as_ref().and_then(|m| m.media_type.as_deref())
    }
}

/// Server-side filter for GET /request
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestFilter {
    All,
    Approved,
    Available,
    Pending,
    Processing,
    Unavailable,
    Failed,
}

impl RequestFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestFilter::All => "all",
            RequestFilter::Approved => "approved",
            RequestFilter::Available => "available",
            RequestFilter::Pending => "pending",
            RequestFilter::Processing => "processing",
            RequestFilter::Unavailable => "unavailable",
            RequestFilter::Failed => "failed",
        }
    }
}

/// Sort order for GET /request
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestSort {
    Added,
    Modified,
}

impl RequestSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestSort::Added => "added",
            RequestSort::Modified => "modified",
        }
    }
}

/// Query for GET /request
#[derive(Debug, Clone, Default)]
pub struct RequestQuery {
    pub take: u32,
    pub skip: u32,
    pub filter: Option<RequestFilter>,
    pub sort: Option<RequestSort>,
}

/// Status transition for POST /request/{id}/{action}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Approve,
    Decline,
}

impl RequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::Approve => "approve",
            RequestAction::Decline => "decline",
        }
    }

    /// Past tense for confirmation messages
    pub fn past_tense(&self) -> &'static str {
        match self {
            RequestAction::Approve => "approved",
            RequestAction::Decline => "declined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

/// Body of POST /request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub media_type: MediaKind,
    pub media_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<u32>>,
}
