//! # Dancerator
//!
//! Reorders a playlist into a sequence for continuous dancing: tempo rises
//! and falls in waves while the most danceable tracks move forward.
//!
//! ## Usage
//!
//! ```bash
//! # Load playlists and their audio features
//! dancerator import bob.json
//!
//! # See what is there
//! dancerator playlists --owner bob
//! dancerator show "Friday Night" --owner bob
//!
//! # Save a reordered copy
//! dancerator order "Friday Night" --owner bob --period 8
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use dancerator::cli::{self, Command};
use dancerator::collab::{self, Account, PlaylistInfo, PlaylistSink, TrackSource};
use dancerator::config::RuntimeConfig;
use dancerator::json_file::{JsonExport, JsonPlaylistFile};
use dancerator::library::Library;
use dancerator::summary::PlaylistSummary;
use dancerator::{completion, prompt, AnnotatedTrack, OrderConfig, Track};
use log::{debug, info};
use std::io;
use std::path::PathBuf;

/// Main entry point for the Dancerator application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug dancerator order Party` - Enable debug logging
/// - `RUST_LOG=dancerator::wave=debug dancerator order Party` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        Command::Import { file } => {
            let runtime = RuntimeConfig::resolve(args.db, args.config)?;
            import(&runtime, &file)?;
        }
        Command::Playlists { owner } => {
            let runtime = RuntimeConfig::resolve(args.db, args.config)?;
            let library = Library::open(&runtime.db_path)?;
            let account = Account::new(owner.unwrap_or(runtime.owner));

            let playlists = library.playlists(&account)?;
            if playlists.is_empty() {
                println!("No playlists for {account}");
            }
            for playlist in playlists {
                println!("{} ({} tracks)", playlist.name, playlist.track_count);
            }
        }
        Command::Show { playlist, owner } => {
            let runtime = RuntimeConfig::resolve(args.db, args.config)?;
            let library = Library::open(&runtime.db_path)?;
            let account = Account::new(owner.unwrap_or(runtime.owner));

            let found = collab::find_playlist(&library, &account, &playlist)?;
            let tracks = library.tracks(&found)?;
            print_tracks(&tracks);
            println!();
            print!("{}", PlaylistSummary::from_tracks(&tracks));
        }
        Command::Order {
            playlist,
            owner,
            period,
            group_width,
            name,
            export,
            dry_run,
            verbose,
        } => {
            let runtime = RuntimeConfig::resolve(args.db, args.config)?;
            // Rejects a bad period before anything is read.
            let order_config = OrderConfig::new(
                period.unwrap_or(runtime.period),
                group_width.unwrap_or(runtime.tempo_group_width),
            )?;
            let account = Account::new(owner.unwrap_or_else(|| runtime.owner.clone()));
            let request = OrderRequest {
                playlist,
                name,
                export,
                dry_run,
                verbose,
            };
            order(&runtime, &account, &order_config, request)?;
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            let shell = completion::shell_to_completion_shell(shell);
            completion::generate_completions(shell, &mut cmd);
        }
    }

    Ok(())
}

fn import(runtime: &RuntimeConfig, file: &std::path::Path) -> Result<()> {
    let export = JsonPlaylistFile::open(file)?;
    let mut library = Library::open(&runtime.db_path)?;
    let owner = export.owner().clone();

    let playlists = export
        .playlists(&owner)?
        .into_iter()
        .map(|info| -> Result<(Vec<Track>, String)> { Ok((export.tracks(&info)?, info.name)) })
        .collect::<Result<Vec<_>>>()?;

    // All playlists of the export commit together or not at all.
    library
        .import_playlists(
            &owner,
            playlists.iter().map(|(tracks, name)| (name.as_str(), tracks.as_slice())),
        )
        .with_context(|| format!("Failed to import {}", file.display()))?;
    for (tracks, name) in &playlists {
        println!("Imported '{name}' ({} tracks)", tracks.len());
    }
    info!("Imported {} playlists for {owner}", playlists.len());
    Ok(())
}

struct OrderRequest {
    playlist: Option<String>,
    name: Option<String>,
    export: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
}

fn order(
    runtime: &RuntimeConfig,
    account: &Account,
    config: &OrderConfig,
    request: OrderRequest,
) -> Result<()> {
    let mut library = Library::open(&runtime.db_path)?;

    let source: PlaylistInfo = match request.playlist {
        Some(name) => collab::find_playlist(&library, account, &name)?,
        None => {
            let playlists = library.playlists(account)?;
            let stdin = io::stdin();
            match prompt::select_playlist(&playlists, &mut stdin.lock(), &mut io::stdout())? {
                Some(chosen) => chosen,
                None => {
                    println!("No playlist selected.");
                    return Ok(());
                }
            }
        }
    };
    debug!("Ordering playlist #{} '{}'", source.id, source.name);

    let tracks = library.tracks(&source)?;
    let ordered = dancerator::reorder_with(tracks, config);

    if request.verbose {
        print_annotated(&ordered);
        println!();
    }
    print!("{}", PlaylistSummary::from_tracks(&ordered));

    if request.dry_run {
        if !request.verbose {
            println!();
            print_tracks(&ordered.into_iter().map(AnnotatedTrack::into_track).collect::<Vec<_>>());
        }
        return Ok(());
    }

    let name = request
        .name
        .unwrap_or_else(|| format!("{} (Dance Order)", source.name));
    let uris: Vec<String> = ordered.into_iter().map(|t| t.track.uri).collect();

    let location = match request.export {
        Some(path) => JsonExport::new(path).create_playlist(account, &name, &uris)?,
        None => library.create_playlist(account, &name, &uris)?,
    };
    println!("Created playlist '{name}' at {location}");
    Ok(())
}

fn format_feature(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn print_tracks(tracks: &[Track]) {
    for (position, track) in tracks.iter().enumerate() {
        println!(
            "{:>4}  {:>7}  {:>5}  {}",
            position + 1,
            format_feature(track.tempo, 1),
            format_feature(track.danceability, 2),
            track.name
        );
    }
}

fn print_annotated(tracks: &[AnnotatedTrack]) {
    println!("   #    tempo  dance  tg  dg  name");
    for (position, annotated) in tracks.iter().enumerate() {
        let track = &annotated.track;
        println!(
            "{:>4}  {:>7}  {:>5}  {:>2}  {:>2}  {}",
            position + 1,
            format_feature(track.tempo, 1),
            format_feature(track.danceability, 2),
            annotated.tempo_group,
            annotated
                .danceability_group
                .map_or_else(|| "-".to_string(), |g| g.to_string()),
            track.name
        );
    }
}
