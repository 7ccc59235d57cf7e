use clap::{Args, Parser, Subcommand};

use crate::api::types::{RequestFilter, RequestSort};

/// overseerr - Manage media requests on an Overseerr server from the terminal
#[derive(Parser)]
#[command(name = "overseerr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override Overseerr URL
    #[arg(short, long, global = true, value_name = "URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show Overseerr server status
    Status,

    /// Search for movies and TV shows
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Discover movies and TV shows
    Discover {
        /// Page number
        #[arg(short, long, default_value_t = 1, global = true)]
        page: u32,

        #[command(subcommand)]
        command: DiscoverCommands,
    },

    /// Get media details
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },

    /// Manage media requests
    #[command(visible_aliases = ["request", "req"])]
    Requests {
        #[command(subcommand)]
        command: RequestCommands,
    },

    /// Manage users
    #[command(visible_alias = "user")]
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum DiscoverCommands {
    /// Discover popular movies
    Movies,

    /// Discover popular TV shows
    Tv,

    /// Show trending movies and TV shows
    Trending,
}

#[derive(Subcommand)]
pub enum MediaCommands {
    /// Get movie details by TMDB ID
    Movie {
        /// TMDB ID
        tmdb_id: u64,
    },

    /// Get TV show details by TMDB ID
    Tv {
        /// TMDB ID
        tmdb_id: u64,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Number of entries to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: u32,

    /// Number of entries to skip
    #[arg(short, long, default_value_t = 0)]
    pub skip: u32,
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// List media requests
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Only show requests in this state
        #[arg(short, long, value_enum)]
        filter: Option<RequestFilter>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<RequestSort>,
    },

    /// Get request details
    Get {
        /// Request ID
        id: u64,
    },

    /// Approve a pending request
    Approve {
        /// Request ID
        id: u64,
    },

    /// Decline a pending request
    Decline {
        /// Request ID
        id: u64,
    },

    /// Delete a request
    Delete {
        /// Request ID
        id: u64,

        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Request a movie by TMDB ID
    Movie {
        /// TMDB ID
        tmdb_id: u64,
    },

    /// Request a TV show by TMDB ID
    Tv {
        /// TMDB ID
        tmdb_id: u64,

        /// Specific seasons to request (default: all)
        #[arg(long, value_delimiter = ',')]
        seasons: Vec<u32>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Get current user
    Me,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set Overseerr server URL
    SetUrl {
        /// Server URL, e.g. https://overseerr.example.com
        url: String,
    },

    /// Set API key
    SetKey {
        /// API key from Settings -> General
        api_key: String,
    },

    /// Show current configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "overseerr", "status", "--json", "-q", "--no-color", "-u", "http://x",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert_eq!(cli.url.as_deref(), Some("http://x"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::try_parse_from(["overseerr", "search", "the", "matrix", "-p", "2"]).unwrap();
        match cli.command {
            Commands::Search { query, page } => {
                assert_eq!(query.join(" "), "the matrix");
                assert_eq!(page, 2);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["overseerr", "search"]).is_err());
    }

    #[test]
    fn test_discover_page_after_subcommand() {
        let cli = Cli::try_parse_from(["overseerr", "discover", "trending", "--page", "3"]).unwrap();
        match cli.command {
            Commands::Discover { page, command } => {
                assert_eq!(page, 3);
                assert!(matches!(command, DiscoverCommands::Trending));
            }
            _ => panic!("expected discover"),
        }
    }

    #[test]
    fn test_requests_list_options() {
        let cli = Cli::try_parse_from([
            "overseerr", "req", "list", "-l", "5", "-s", "10", "-f", "pending", "--sort", "modified",
        ])
        .unwrap();
        match cli.command {
            Commands::Requests {
                command:
                    RequestCommands::List {
                        list,
                        filter,
                        sort,
                    },
            } => {
                assert_eq!(list.limit, 5);
                assert_eq!(list.skip, 10);
                assert_eq!(filter, Some(RequestFilter::Pending));
                assert_eq!(sort, Some(RequestSort::Modified));
            }
            _ => panic!("expected requests list"),
        }
    }

    #[test]
    fn test_requests_list_rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["overseerr", "requests", "list", "-f", "bogus"]).is_err());
    }

    #[test]
    fn test_request_tv_seasons() {
        let cli =
            Cli::try_parse_from(["overseerr", "requests", "tv", "1399", "--seasons", "1,2,3"])
                .unwrap();
        match cli.command {
            Commands::Requests {
                command: RequestCommands::Tv { tmdb_id, seasons },
            } => {
                assert_eq!(tmdb_id, 1399);
                assert_eq!(seasons, vec![1, 2, 3]);
            }
            _ => panic!("expected requests tv"),
        }
    }

    #[test]
    fn test_media_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["overseerr", "media", "movie", "abc"]).is_err());
    }

    #[test]
    fn test_user_alias() {
        let cli = Cli::try_parse_from(["overseerr", "user", "me"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Users {
                command: UserCommands::Me
            }
        ));
    }
}
