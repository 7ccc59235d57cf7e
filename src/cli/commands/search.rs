use anyhow::Context as _;

use crate::cli::commands::discover::format_search_result;
use crate::cli::Context;
use crate::error::Result;

/// Handle the search command
pub async fn search(ctx: &Context, words: Vec<String>, page: u32) -> Result<()> {
    let client = ctx.client()?;
    let query = words.join(" ");

    let result = client
        .search(&query, page)
        .await
        .context("search failed")?;

    if ctx.output.json {
        return ctx.output.json(&result);
    }

    if result.results.is_empty() {
        println!("No results found");
        return Ok(());
    }

    ctx.output.heading(format!(
        "Search results for '{}' (page {}/{}, {} total)",
        query,
        page,
        result.total_pages(),
        result.total_results()
    ));

    for block in result.results.iter().filter_map(format_search_result) {
        ctx.output.block(&block);
    }

    Ok(())
}
