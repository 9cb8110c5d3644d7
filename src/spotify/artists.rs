use reqwest::Client;
use serde_json::json;

use crate::{
    types::{Artist, FollowedArtistsResponse, SearchResponse},
    utils,
};

/// Page size used when listing followed artists. A shorter page is the last one.
pub const PAGE_SIZE: usize = 50;

/// Retrieves one page of the artists the authenticated user follows.
///
/// # Arguments
///
/// * `after` - Id of the last artist of the previous page, `None` for the first page
///
/// # Example
///
/// ```
/// let first = get_followed_page(&client, api_url, token, 50, None).await?;
/// let next = get_followed_page(&client, api_url, token, 50, first.last().map(|a| a.id.as_str())).await?;
/// ```
pub async fn get_followed_page(
    client: &Client,
    api_url: &str,
    token: &str,
    limit: usize,
    after: Option<&str>,
) -> Result<Vec<Artist>, reqwest::Error> {
    let mut request = client
        .get(format!("{api_url}/me/following"))
        .bearer_auth(token)
        .query(&[("type", "artist")])
        .query(&[("limit", limit)]);
    if let Some(after) = after {
        request = request.query(&[("after", after)]);
    }

    let res = request
        .send()
        .await?
        .error_for_status()?
        .json::<FollowedArtistsResponse>()
        .await?;

    Ok(res.artists.items)
}

/// Retrieves every followed artist, paging with the id of the last artist
/// of each page until a page comes back shorter than [`PAGE_SIZE`].
pub async fn get_all_followed(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<Vec<Artist>, reqwest::Error> {
    let pb = utils::spinner("Requesting followed artists...");

    let mut all_artists: Vec<Artist> = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let page = match get_followed_page(client, api_url, token, PAGE_SIZE, after.as_deref()).await
        {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        let page_len = page.len();
        if let Some(last) = page.last() {
            after = Some(last.id.clone());
        }
        all_artists.extend(page);
        pb.set_message(format!("Fetched {} followed artists...", all_artists.len()));

        if page_len < PAGE_SIZE {
            break;
        }
    }

    pb.finish_and_clear();
    Ok(all_artists)
}

/// Searches the catalog for artists matching `name`.
pub async fn search_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    name: &str,
) -> Result<Vec<Artist>, reqwest::Error> {
    let res = client
        .get(format!("{api_url}/search"))
        .bearer_auth(token)
        .query(&[("q", name), ("type", "artist")])
        .send()
        .await?
        .error_for_status()?
        .json::<SearchResponse>()
        .await?;

    Ok(res.artists.map(|page| page.items).unwrap_or_default())
}

/// Follows a single artist. Following an artist twice is not an error.
pub async fn follow_artist(
    client: &Client,
    api_url: &str,
    token: &str,
    id: &str,
) -> Result<(), reqwest::Error> {
    client
        .put(format!("{api_url}/me/following"))
        .bearer_auth(token)
        .query(&[("type", "artist")])
        .json(&json!({ "ids": [id] }))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
