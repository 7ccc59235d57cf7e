use anyhow::Context as _;

use crate::api::status::{media_type_label, status_label};
use crate::api::types::{MediaKind, MediaRequest, NewRequest, RequestAction, RequestQuery};
use crate::cli::args::RequestCommands;
use crate::cli::Context;
use crate::error::Result;
use crate::output::format_datetime;

/// Handle the requests subcommands
pub async fn requests(ctx: &Context, command: RequestCommands) -> Result<()> {
    match command {
        RequestCommands::List { list, filter, sort } => {
            let query = RequestQuery {
                take: list.limit,
                skip: list.skip,
                filter,
                sort,
            };
            list_requests(ctx, &query).await
        }
        RequestCommands::Get { id } => get_request(ctx, id).await,
        RequestCommands::Approve { id } => update_status(ctx, id, RequestAction::Approve).await,
        RequestCommands::Decline { id } => update_status(ctx, id, RequestAction::Decline).await,
        RequestCommands::Delete { id, force } => delete_request(ctx, id, force).await,
        RequestCommands::Movie { tmdb_id } => {
            let body = NewRequest {
                media_type: MediaKind::Movie,
                media_id: tmdb_id,
                seasons: None,
            };
            create_request(ctx, &body).await
        }
        RequestCommands::Tv { tmdb_id, seasons } => {
            let body = NewRequest {
                media_type: MediaKind::Tv,
                media_id: tmdb_id,
                seasons: (!seasons.is_empty()).then_some(seasons),
            };
            create_request(ctx, &body).await
        }
    }
}

async fn list_requests(ctx: &Context, query: &RequestQuery) -> Result<()> {
    let client = ctx.client()?;
    let result = client
        .requests(query)
        .await
        .context("failed to list requests")?;

    if ctx.output.json {
        return ctx.output.json(&result);
    }

    if result.results.is_empty() {
        println!("No requests found");
        return Ok(());
    }

    ctx.output.heading(format!(
        "Requests (showing {} of {})",
        result.results.len(),
        result.total()
    ));
    for request in &result.results {
        ctx.output.block(&format_request(request));
    }

    Ok(())
}

async fn get_request(ctx: &Context, id: u64) -> Result<()> {
    let client = ctx.client()?;
    let request = client.request(id).await.context("failed to get request")?;

    if ctx.output.json {
        return ctx.output.json(&request);
    }

    ctx.output.block(&format_request(&request));
    Ok(())
}

async fn update_status(ctx: &Context, id: u64, action: RequestAction) -> Result<()> {
    let client = ctx.client()?;
    let request = client
        .update_request_status(id, action)
        .await
        .with_context(|| format!("failed to {} request", action.as_str()))?;

    if ctx.output.json {
        return ctx.output.json(&request);
    }

    println!("Request {} {}", id, action.past_tense());
    Ok(())
}

async fn delete_request(ctx: &Context, id: u64, force: bool) -> Result<()> {
    if !force && !ctx.output.quiet {
        println!(
            "Delete request {}? This cannot be undone. Use --force to skip confirmation.",
            id
        );
        return Ok(());
    }

    let client = ctx.client()?;
    client
        .delete_request(id)
        .await
        .context("failed to delete request")?;

    ctx.output.info(format!("Request {} deleted", id));
    Ok(())
}

async fn create_request(ctx: &Context, body: &NewRequest) -> Result<()> {
    let label = match body.media_type {
        MediaKind::Movie => "Movie",
        MediaKind::Tv => "TV show",
    };

    let client = ctx.client()?;
    let request = client
        .create_request(body)
        .await
        .with_context(|| format!("failed to request {}", label.to_lowercase()))?;

    if ctx.output.json {
        return ctx.output.json(&request);
    }

    println!(
        "{} requested successfully (Request ID: {})",
        label,
        request.id()
    );
    Ok(())
}

/// Text block for one request, followed by a blank line
fn format_request(request: &MediaRequest) -> String {
    let mut lines = vec![format!(
        "[{}] {} TMDB: {} - {}",
        request.id(),
        media_type_label(request.media_type()),
        request.tmdb_id(),
        status_label(request.status())
    )];

    if let Some(user) = &request.requested_by {
        lines.push(format!("  Requested by: {}", user.name()));
    }
    if let Some(created) = &request.created_at {
        lines.push(format!("  Created: {}", format_datetime(created)));
    }

    lines.join("\n") + "\n\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_request() {
        let request: MediaRequest = serde_json::from_str(
            r#"{
                "id": 42,
                "status": 1,
                "createdAt": "2024-01-15T10:30:00.000Z",
                "media": {"tmdbId": 603, "mediaType": "movie"},
                "requestedBy": {"id": 3, "username": "neo", "email": "neo@example.com"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            format_request(&request),
            "[42] Movie TMDB: 603 - Pending Approval\n  Requested by: neo\n  Created: 2024-01-15 10:30\n\n"
        );
    }

    #[test]
    fn test_format_request_without_details() {
        let request: MediaRequest = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(format_request(&request), "[5] Unknown TMDB: 0 - Unknown\n\n");
    }
}
