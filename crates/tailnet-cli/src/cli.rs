//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// tailnet-admin - Inspect a tailnet and manage device tags in bulk
#[derive(Parser, Debug)]
#[command(name = "tailnet-admin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the API
    #[arg(long, global = true, env = "TAILSCALE_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding stored credentials
    #[arg(long, global = true, env = "TAILNET_ADMIN_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Store an API token for a tailnet
    ///
    /// The token is checked against the API before it is saved.
    ///
    /// Examples:
    ///   tailnet-admin auth --tailnet example.com --token tskey-api-...
    ///   TAILSCALE_API_KEY=tskey-api-... tailnet-admin auth --tailnet example.com
    Auth {
        /// Tailnet name
        #[arg(long, env = "TAILSCALE_TAILNET")]
        tailnet: String,

        /// API access token
        #[arg(long, env = "TAILSCALE_API_KEY", hide_env_values = true)]
        token: String,

        /// Seconds until the token expires
        #[arg(long)]
        expires_in: Option<u64>,
    },

    /// Show stored authentication status
    Status,

    /// Check that the stored token can reach the API
    TestAuth,

    /// Remove stored credentials
    Logout,

    /// List devices in the tailnet
    Devices,

    /// List API keys in the tailnet
    Keys,

    /// Inspect and change device tags
    Tags {
        /// Tag action to perform
        #[command(subcommand)]
        action: TagsAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   tailnet-admin completions bash > ~/.local/share/bash-completion/completions/tailnet-admin
    ///   tailnet-admin completions zsh > ~/.zfunc/_tailnet-admin
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Tag actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TagsAction {
    /// List every tag and the devices carrying it
    List,

    /// List devices with their tags
    DeviceTags {
        /// Filter by device name (case-insensitive substring)
        #[arg(short, long)]
        name: Option<String>,

        /// Only show devices carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Rename a tag on every device
    Rename {
        /// Existing tag
        old: String,

        /// Replacement tag
        new: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Add a tag to devices that have another tag
    AddIfHas {
        /// Tag a device must have
        existing: String,

        /// Tag to add
        new: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Add a tag to devices that lack another tag
    AddIfMissing {
        /// Tag a device must not have
        missing: String,

        /// Tag to add
        new: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Remove a tag from every device
    Remove {
        /// Tag to remove
        tag: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Replace the tags of specific devices
    ///
    /// Examples:
    ///   tailnet-admin tags set n1 n2 --tag tag:prod
    ///   tailnet-admin tags set n1,n2 -t tag:prod -t tag:web --yes
    Set {
        /// Device ids (comma-separated or repeated)
        #[arg(required = true)]
        ids: Vec<String>,

        /// Tags to set (repeatable)
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

/// Flags shared by mutating tag commands
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmArgs {
    /// Show changes without applying them
    #[arg(short, long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["tailnet-admin"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "tailnet-admin",
            "devices",
            "-v",
            "--api-url",
            "http://127.0.0.1:8080/api/v2",
            "--config-dir",
            "/tmp/ta",
            "--timeout",
            "5",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:8080/api/v2"));
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/ta")));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.command, Some(Commands::Devices));
    }

    #[test]
    fn parse_auth() {
        let cli = Cli::parse_from([
            "tailnet-admin",
            "auth",
            "--tailnet",
            "example.com",
            "--token",
            "tskey",
            "--expires-in",
            "3600",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Auth {
                tailnet: "example.com".to_string(),
                token: "tskey".to_string(),
                expires_in: Some(3600),
            })
        );
    }

    #[test]
    fn parse_test_auth_is_kebab_case() {
        let cli = Cli::parse_from(["tailnet-admin", "test-auth"]);
        assert_eq!(cli.command, Some(Commands::TestAuth));
    }

    #[test]
    fn parse_rename_defaults() {
        let cli = Cli::parse_from(["tailnet-admin", "tags", "rename", "prod", "live"]);
        assert_eq!(
            cli.command,
            Some(Commands::Tags {
                action: TagsAction::Rename {
                    old: "prod".to_string(),
                    new: "live".to_string(),
                    confirm: ConfirmArgs::default(),
                }
            })
        );
    }

    #[test]
    fn parse_short_confirm_flags() {
        let cli = Cli::parse_from(["tailnet-admin", "tags", "remove", "x", "-d", "-y"]);
        let Some(Commands::Tags {
            action: TagsAction::Remove { tag, confirm },
        }) = cli.command
        else {
            panic!("expected tags remove");
        };
        assert_eq!(tag, "x");
        assert!(confirm.dry_run);
        assert!(confirm.yes);
    }

    #[test]
    fn parse_add_if_missing() {
        let cli = Cli::parse_from([
            "tailnet-admin",
            "tags",
            "add-if-missing",
            "managed",
            "unmanaged",
            "--dry-run",
        ]);
        assert!(matches!(
            cli.command,
            Some(Commands::Tags {
                action: TagsAction::AddIfMissing { ref missing, ref new, confirm }
            }) if missing == "managed" && new == "unmanaged" && confirm.dry_run
        ));
    }

    #[test]
    fn parse_set_with_repeated_tags() {
        let cli = Cli::parse_from([
            "tailnet-admin",
            "tags",
            "set",
            "n1,n2",
            "n3",
            "-t",
            "tag:a",
            "--tag",
            "tag:b",
        ]);
        let Some(Commands::Tags {
            action: TagsAction::Set { ids, tags, .. },
        }) = cli.command
        else {
            panic!("expected tags set");
        };
        assert_eq!(ids, vec!["n1,n2", "n3"]);
        assert_eq!(tags, vec!["tag:a", "tag:b"]);
    }

    #[test]
    fn set_requires_a_tag() {
        let result = Cli::try_parse_from(["tailnet-admin", "tags", "set", "n1"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_device_tags_filters() {
        let cli = Cli::parse_from(["tailnet-admin", "tags", "device-tags", "-n", "web", "-t", "prod"]);
        assert_eq!(
            cli.command,
            Some(Commands::Tags {
                action: TagsAction::DeviceTags {
                    name: Some("web".to_string()),
                    tag: Some("prod".to_string()),
                }
            })
        );
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["tailnet-admin", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
