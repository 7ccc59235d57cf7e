mod config;
mod discover;
mod media;
mod requests;
mod search;
mod status;
mod users;

use crate::cli::{Commands, Context};
use crate::error::Result;

/// Dispatch a parsed command to its handler
pub async fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Status => status::status(ctx).await,
        Commands::Search { query, page } => search::search(ctx, query, page).await,
        Commands::Discover { page, command } => discover::discover(ctx, command, page).await,
        Commands::Media { command } => media::media(ctx, command).await,
        Commands::Requests { command } => requests::requests(ctx, command).await,
        Commands::Users { command } => users::users(ctx, command).await,
        Commands::Config { command } => config::config(ctx, command).await,
    }
}
