use anyhow::Context as _;

use crate::api::status::MediaStatus;
use crate::api::types::{MovieDetails, NamedEntry, TvDetails};
use crate::cli::args::MediaCommands;
use crate::cli::Context;
use crate::error::Result;
use crate::output::{join_names, year};

/// Handle the media subcommands
pub async fn media(ctx: &Context, command: MediaCommands) -> Result<()> {
    let client = ctx.client()?;

    match command {
        MediaCommands::Movie { tmdb_id } => {
            let movie = client.movie(tmdb_id).await.context("failed to get movie")?;
            if ctx.output.json {
                return ctx.output.json(&movie);
            }
            ctx.output.block(&format_movie_details(&movie));
        }
        MediaCommands::Tv { tmdb_id } => {
            let tv = client.tv(tmdb_id).await.context("failed to get TV show")?;
            if ctx.output.json {
                return ctx.output.json(&tv);
            }
            ctx.output.block(&format_tv_details(&tv));
        }
    }

    Ok(())
}

fn rating_line(average: f64, votes: Option<u64>) -> String {
    match votes {
        Some(votes) => format!("Rating: {:.1}/10 ({} votes)", average, votes),
        None => format!("Rating: {:.1}/10", average),
    }
}

fn names_line(label: &str, entries: &[NamedEntry]) -> Option<String> {
    let names = join_names(entries.iter().map(NamedEntry::name));
    if names.is_empty() {
        None
    } else {
        Some(format!("{}: {}", label, names))
    }
}

fn library_line(status: Option<MediaStatus>) -> Option<String> {
    status.map(|s| format!("Library Status: {}", s))
}

fn format_movie_details(movie: &MovieDetails) -> String {
    let mut lines = vec![
        format!("{} ({})", movie.title(), year(movie.release_date())),
        format!("TMDB ID: {}", movie.id()),
        format!("Status: {}", movie.status()),
    ];

    if let Some(runtime) = movie.runtime() {
        lines.push(format!("Runtime: {} min", runtime));
    }
    lines.push(rating_line(movie.vote_average(), movie.vote_count));
    lines.extend(names_line("Genres", &movie.genres));
    lines.extend(library_line(movie.library_status()));

    lines.push(String::new());
    if !movie.overview().is_empty() {
        lines.push(movie.overview().to_string());
    }

    lines.join("\n") + "\n"
}

fn format_tv_details(tv: &TvDetails) -> String {
    let mut lines = vec![
        format!("{} ({})", tv.name(), year(tv.first_air_date())),
        format!("TMDB ID: {}", tv.id()),
        format!("Status: {}", tv.status()),
        format!(
            "Seasons: {} | Episodes: {}",
            tv.number_of_seasons(),
            tv.number_of_episodes()
        ),
        rating_line(tv.vote_average(), tv.vote_count),
    ];

    lines.extend(names_line("Genres", &tv.genres));
    lines.extend(names_line("Networks", &tv.networks));
    lines.extend(library_line(tv.library_status()));

    lines.push(String::new());
    if !tv.overview().is_empty() {
        lines.push(tv.overview().to_string());
    }

    let seasons: Vec<String> = tv
        .regular_seasons()
        .map(|s| {
            format!(
                "  Season {}: {} episodes ({})",
                s.season_number(),
                s.episode_count(),
                year(s.air_date())
            )
        })
        .collect();
    if !seasons.is_empty() {
        lines.push(String::new());
        lines.push("Seasons:".to_string());
        lines.extend(seasons);
    }

    lines.join("\n") + "\n"
}
