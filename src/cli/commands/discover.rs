use anyhow::Context as _;
use serde::Serialize;

use crate::api::status::MediaStatus;
use crate::api::types::{MovieResult, PersonResult, ResultsPage, SearchResult, TvResult};
use crate::cli::args::DiscoverCommands;
use crate::cli::Context;
use crate::error::Result;
use crate::output::{truncate, year, OVERVIEW_LIMIT};

/// Handle the discover subcommands
pub async fn discover(ctx: &Context, command: DiscoverCommands, page: u32) -> Result<()> {
    let client = ctx.client()?;

    match command {
        DiscoverCommands::Movies => {
            let result = client
                .discover_movies(page)
                .await
                .context("failed to discover movies")?;
            print_page(ctx, &result, "Popular Movies", "No movies found", page, |m| {
                Some(format_movie_result(m))
            })
        }
        DiscoverCommands::Tv => {
            let result = client
                .discover_tv(page)
                .await
                .context("failed to discover TV shows")?;
            print_page(ctx, &result, "Popular TV Shows", "No TV shows found", page, |t| {
                Some(format_tv_result(t))
            })
        }
        DiscoverCommands::Trending => {
            let result = client
                .trending(page)
                .await
                .context("failed to get trending")?;
            print_page(
                ctx,
                &result,
                "Trending",
                "No trending content found",
                page,
                format_search_result,
            )
        }
    }
}

fn print_page<T, F>(
    ctx: &Context,
    result: &ResultsPage<T>,
    title: &str,
    empty: &str,
    page: u32,
    format: F,
) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> Option<String>,
{
    if ctx.output.json {
        return ctx.output.json(result);
    }

    if result.results.is_empty() {
        println!("{}", empty);
        return Ok(());
    }

    ctx.output.heading(format!(
        "{} (page {}/{})",
        title,
        page,
        result.total_pages()
    ));
    for block in result.results.iter().filter_map(format) {
        ctx.output.block(&block);
    }
    Ok(())
}

fn status_tag(status: Option<MediaStatus>) -> String {
    status.map(|s| format!(" [{}]", s)).unwrap_or_default()
}

fn overview_line(overview: &str) -> String {
    if overview.is_empty() {
        String::new()
    } else {
        format!("  {}\n", truncate(overview, OVERVIEW_LIMIT))
    }
}

/// One listing entry for a movie, followed by a blank line
pub fn format_movie_result(movie: &MovieResult) -> String {
    format!(
        "[Movie] {} ({}) - TMDB ID: {}{}\n{}\n",
        movie.title(),
        year(movie.release_date()),
        movie.id(),
        status_tag(movie.library_status()),
        overview_line(movie.overview())
    )
}

/// One listing entry for a TV show, followed by a blank line
pub fn format_tv_result(tv: &TvResult) -> String {
    format!(
        "[TV] {} ({}) - TMDB ID: {}{}\n{}\n",
        tv.name(),
        year(tv.first_air_date()),
        tv.id(),
        status_tag(tv.library_status()),
        overview_line(tv.overview())
    )
}

fn format_person_result(person: &PersonResult) -> String {
    let department = person
        .known_for_department
        .as_deref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default();
    format!(
        "[Person] {} - TMDB ID: {}{}\n\n",
        person.name(),
        person.id(),
        department
    )
}

/// Listing entry for a mixed result; `None` for kinds without a text form
pub fn format_search_result(result: &SearchResult) -> Option<String> {
    match result {
        SearchResult::Movie(movie) => Some(format_movie_result(movie)),
        SearchResult::Tv(tv) => Some(format_tv_result(tv)),
        SearchResult::Person(person) => Some(format_person_result(person)),
        SearchResult::Other => None,
    }
}
