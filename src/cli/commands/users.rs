use anyhow::Context as _;

use crate::api::types::User;
use crate::cli::args::UserCommands;
use crate::cli::Context;
use crate::error::Result;
use crate::output::format_date;

/// Handle the users subcommands
pub async fn users(ctx: &Context, command: UserCommands) -> Result<()> {
    let client = ctx.client()?;

    match command {
        UserCommands::List { list } => {
            let result = client
                .users(list.limit, list.skip)
                .await
                .context("failed to list users")?;

            if ctx.output.json {
                return ctx.output.json(&result);
            }

            if result.results.is_empty() {
                println!("No users found");
                return Ok(());
            }

            ctx.output.heading(format!(
                "Users (showing {} of {})",
                result.results.len(),
                result.total()
            ));
            for user in &result.results {
                ctx.output.block(&format_user(user));
            }
        }
        UserCommands::Me => {
            let user = client.me().await.context("failed to get current user")?;

            if ctx.output.json {
                return ctx.output.json(&user);
            }

            ctx.output.block(&format_user(&user));
        }
    }

    Ok(())
}

/// Text block for one user, followed by a blank line
fn format_user(user: &User) -> String {
    let mut lines = vec![format!("[{}] {}", user.id(), user.name())];

    if let Some(email) = user.email() {
        lines.push(format!("  Email: {}", email));
    }
    if let Some(plex) = user.plex_username() {
        lines.push(format!("  Plex: {}", plex));
    }
    if let Some(count) = user.request_count {
        lines.push(format!("  Requests: {}", count));
    }
    if let Some(created) = &user.created_at {
        lines.push(format!("  Created: {}", format_date(created)));
    }

    lines.join("\n") + "\n\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_user() {
        let user: User = serde_json::from_str(
            r#"{
                "id": 1,
                "username": "admin",
                "email": "admin@example.com",
                "plexUsername": "plexadmin",
                "requestCount": 12,
                "createdAt": "2023-06-01T08:00:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(
            format_user(&user),
            "[1] admin\n  Email: admin@example.com\n  Plex: plexadmin\n  Requests: 12\n  Created: 2023-06-01\n\n"
        );
    }

    #[test]
    fn test_format_user_falls_back_to_email() {
        let user: User =
            serde_json::from_str(r#"{"id": 2, "email": "guest@example.com", "plexUsername": ""}"#)
                .unwrap();
        assert_eq!(
            format_user(&user),
            "[2] guest@example.com\n  Email: guest@example.com\n\n"
        );
    }
}
