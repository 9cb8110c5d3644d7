use reqwest::Client;

use crate::{Res, spotify::artists, types::Artist, types::Token};

/// The remote operations the follow orchestration needs.
#[allow(async_fn_in_trait)]
pub trait ArtistCatalog {
    /// Every artist the user currently follows.
    async fn followed_artists(&self) -> Res<Vec<Artist>>;

    /// Catalog artists matching `name`, possibly none.
    async fn search_artists(&self, name: &str) -> Res<Vec<Artist>>;

    async fn follow_artist(&self, id: &str) -> Res<()>;
}

/// Authenticated Web API client. Owns the access token for the rest of the run.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: Token,
}

impl SpotifyClient {
    pub fn new(token: Token, api_url: impl Into<String>) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}

impl ArtistCatalog for SpotifyClient {
    async fn followed_artists(&self) -> Res<Vec<Artist>> {
        Ok(artists::get_all_followed(&self.http, &self.api_url, &self.token.access_token).await?)
    }

    async fn search_artists(&self, name: &str) -> Res<Vec<Artist>> {
        Ok(artists::search_artists(&self.http, &self.api_url, &self.token.access_token, name).await?)
    }

    async fn follow_artist(&self, id: &str) -> Res<()> {
        Ok(artists::follow_artist(&self.http, &self.api_url, &self.token.access_token, id).await?)
    }
}
