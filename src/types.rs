use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Access credential obtained from the token exchange. Lives in memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    pub refresh_token: Option<String>,
    pub obtained_at: u64,
}

impl Token {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let at = self.obtained_at.checked_add(self.expires_in)?;
        Utc.timestamp_opt(i64::try_from(at).ok()?, 0).single()
    }
}

/// Raw body of the token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub artists: Option<ArtistPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistPage {
    pub items: Vec<Artist>,
    pub total: Option<u64>,
}

#[derive(Tabled)]
pub struct ArtistCountRow {
    pub artist: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct FollowTableRow {
    pub artist: String,
    pub tracks: usize,
    pub result: String,
}

/// What happened to a single frequent artist during an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowOutcome {
    /// Already in the followed set, no remote call made.
    AlreadyFollowed,
    /// Followed these catalog entries (or would have, on a dry run).
    Followed(Vec<Artist>),
    /// Search returned candidates but none matched the name.
    Unmatched(Vec<String>),
    /// Search returned nothing.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEntry {
    pub artist: String,
    pub tracks: usize,
    pub outcome: FollowOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct FollowReport {
    pub entries: Vec<FollowEntry>,
}

impl FollowReport {
    pub fn followed_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match &e.outcome {
                FollowOutcome::Followed(artists) => artists.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn rows(&self) -> Vec<FollowTableRow> {
        self.entries
            .iter()
            .map(|e| FollowTableRow {
                artist: e.artist.clone(),
                tracks: e.tracks,
                result: match &e.outcome {
                    FollowOutcome::AlreadyFollowed => "already followed".to_string(),
                    FollowOutcome::Followed(artists) => format!(
                        "followed {}",
                        artists
                            .iter()
                            .map(|a| a.id.as_str())
                            .collect::<Vec<_>>()
                            .join(",")
                    ),
                    FollowOutcome::Unmatched(names) => format!("no match ({})", names.join(", ")),
                    FollowOutcome::NotFound => "not found".to_string(),
                },
            })
            .collect()
    }
}
