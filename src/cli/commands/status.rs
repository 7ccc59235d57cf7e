use anyhow::Context as _;

use crate::api::types::ServerStatus;
use crate::cli::Context;
use crate::error::Result;

/// Handle the status command
pub async fn status(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client.status().await.context("failed to get status")?;

    if ctx.output.json {
        return ctx.output.json(&status);
    }

    ctx.output.heading("Overseerr Status");
    ctx.output.block(&format_status(&status, client.base_url()));
    Ok(())
}

fn format_status(status: &ServerStatus, server: &str) -> String {
    let mut lines = vec![
        format!("  Server: {}", server),
        format!("  Version: {}", status.version()),
    ];

    if let Some(tag) = status.commit_tag() {
        lines.push(format!("  Commit: {}", tag));
    }

    if status.update_available() {
        lines.push(format!(
            "  Update Available: Yes ({} commits behind)",
            status.commits_behind()
        ));
    } else {
        lines.push("  Update Available: No".to_string());
    }

    if status.restart_required.unwrap_or(false) {
        lines.push("  Restart Required: Yes".to_string());
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_up_to_date() {
        let status: ServerStatus = serde_json::from_str(
            r#"{"version": "1.33.2", "commitTag": "", "updateAvailable": false}"#,
        )
        .unwrap();
        assert_eq!(
            format_status(&status, "https://example.com/api/v1"),
            "  Server: https://example.com/api/v1\n  Version: 1.33.2\n  Update Available: No\n"
        );
    }

    #[test]
    fn test_format_status_update_available() {
        let status: ServerStatus = serde_json::from_str(
            r#"{"version": "develop", "commitTag": "abc123", "updateAvailable": true, "commitsBehind": 7, "restartRequired": true}"#,
        )
        .unwrap();
        let text = format_status(&status, "http://x/api/v1");
        assert!(text.contains("  Commit: abc123\n"));
        assert!(text.contains("  Update Available: Yes (7 commits behind)\n"));
        assert!(text.ends_with("  Restart Required: Yes\n"));
    }
}
