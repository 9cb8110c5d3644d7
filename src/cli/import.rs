use std::{path::Path, time::Duration};

use tabled::Table;
use tokio::time::sleep;

use crate::{
    Res,
    config::{self, Credentials, OAuthConfig},
    info,
    library::{self, FrequencyTable},
    spotify::{self, ArtistCatalog, SpotifyClient},
    success,
    types::{Artist, FollowEntry, FollowOutcome, FollowReport},
    utils, warning,
};

/// Knobs of the follow step.
#[derive(Debug, Clone)]
pub struct FollowOptions {
    /// Minimum number of tracks an artist needs before it is followed.
    pub threshold: usize,
    /// Pause between two follow requests.
    pub delay: Duration,
    /// Search but never follow.
    pub dry_run: bool,
}

/// Scans `dir`, signs in to Spotify and follows every artist that appears in
/// at least `threshold` tracks and is not followed yet.
///
/// # Errors
///
/// A directory walk failure, a failed authorization, or any failed remote
/// call ends the run. Unreadable tags only produce warnings.
pub async fn import(
    credentials: &Credentials,
    dir: &Path,
    threshold: usize,
    dry_run: bool,
) -> Res<()> {
    let scan = library::scan(dir)?;
    info!(
        "Scanned {} audio files, {} with an artist tag.",
        scan.audio_files,
        scan.artists.len()
    );

    let table = FrequencyTable::from_names(scan.artists);
    let Some(eligible) = frequent_artists(&table, threshold) else {
        return Ok(());
    };

    for (artist, count) in &eligible {
        info!("Artist: {} => Count: {}", artist, count);
    }

    let oauth = OAuthConfig::from_env(credentials.clone());
    let token = spotify::auth::authorize(&oauth, &config::server_addr()).await?;
    match token.expires_at() {
        Some(expires_at) => success!(
            "Authentication successful! Token valid until {}.",
            expires_at.format("%H:%M:%S")
        ),
        None => success!("Authentication successful!"),
    }

    let client = SpotifyClient::new(token, config::spotify_api_url());
    let followed = client.followed_artists().await?;
    info!("Already following {} artists.", followed.len());

    let options = FollowOptions {
        threshold,
        delay: config::follow_delay(),
        dry_run,
    };
    let report = follow_missing_artists(&client, &table, &followed, &options).await?;

    println!("{}", Table::new(report.rows()));
    if dry_run {
        success!("Dry run: {} artists would be followed.", report.followed_count());
    } else {
        success!("Followed {} new artists.", report.followed_count());
    }

    Ok(())
}

/// Returns the artists counted at least `threshold` times, or `None` when
/// there are none. In that case no follow can happen, so the Spotify login is
/// skipped and the skip is logged.
pub fn frequent_artists(table: &FrequencyTable, threshold: usize) -> Option<Vec<(&str, usize)>> {
    let eligible = table.eligible(threshold);
    if eligible.is_empty() {
        info!(
            "Skipping Spotify login: no artist appears in {} or more tracks.",
            threshold
        );
        success!("Nothing to do.");
        return None;
    }
    Some(eligible)
}

/// Follows every artist of `table` counted at least `options.threshold` times
/// that is not in `followed`.
///
/// The followed check ignores case while the table itself is case-sensitive,
/// so `"air"` and `"Air"` are counted apart but both match a followed `"AIR"`.
/// Artists already followed never cause a search or follow request.
pub async fn follow_missing_artists<C: ArtistCatalog>(
    catalog: &C,
    table: &FrequencyTable,
    followed: &[Artist],
    options: &FollowOptions,
) -> Res<FollowReport> {
    let followed_names: Vec<&str> = followed.iter().map(|a| a.name.as_str()).collect();
    let mut report = FollowReport::default();
    let mut follows_issued = 0usize;

    for (artist, tracks) in table.eligible(options.threshold) {
        if utils::contains_ignore_case(&followed_names, artist) {
            info!("Already following '{}'", artist);
            report.entries.push(FollowEntry {
                artist: artist.to_string(),
                tracks,
                outcome: FollowOutcome::AlreadyFollowed,
            });
            continue;
        }

        info!("Searching for artist '{}'", artist);
        let candidates = catalog.search_artists(artist).await?;
        let targets = select_candidates(artist, &candidates);

        let outcome = if candidates.is_empty() {
            warning!("No results for '{}'", artist);
            FollowOutcome::NotFound
        } else if targets.is_empty() {
            warning!("Unable to find a match for '{}'", artist);
            for candidate in &candidates {
                println!("\talternative '{}'", candidate.name);
            }
            FollowOutcome::Unmatched(candidates.iter().map(|c| c.name.clone()).collect())
        } else {
            for target in &targets {
                if options.dry_run {
                    info!("Would follow '{}' ({})", target.name, target.id);
                    continue;
                }
                if follows_issued > 0 && !options.delay.is_zero() {
                    sleep(options.delay).await;
                }
                catalog.follow_artist(&target.id).await?;
                follows_issued += 1;
                success!("Following '{}'", target.name);
            }
            FollowOutcome::Followed(targets.into_iter().cloned().collect())
        };

        report.entries.push(FollowEntry {
            artist: artist.to_string(),
            tracks,
            outcome,
        });
    }

    Ok(report)
}

/// Picks the search results to follow for `artist`.
///
/// A single result is taken as is. From several results, every one whose
/// name equals `artist` ignoring case is taken.
pub fn select_candidates<'a>(artist: &str, candidates: &'a [Artist]) -> Vec<&'a Artist> {
    match candidates {
        [only] => vec![only],
        _ => candidates
            .iter()
            .filter(|c| utils::eq_ignore_case(&c.name, artist))
            .collect(),
    }
}
