//! Clap derive structures for the `hubctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hubctl -- administer a JupyterHub from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hubctl",
    version,
    about = "Administer JupyterHub deployments from the command line",
    long_about = "A CLI for the JupyterHub REST API.\n\n\
        Connection settings come from command-line flags, then the selected\n\
        profile, then JUPYTERHUB_* environment variables, then defaults.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Hub profile to use
    #[arg(long, short = 'p', env = "HUBCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Hub API URL, e.g. https://hub.example.org/hub/api (overrides profile)
    #[arg(long, short = 'u', global = true)]
    pub api_url: Option<String>,

    /// API token (overrides profile)
    #[arg(long, global = true, hide = true)]
    pub token: Option<String>,

    /// Username for HTTP Basic auth
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Password for HTTP Basic auth
    #[arg(long, global = true, hide = true)]
    pub password: Option<String>,

    /// Output format [default: `defaults.output` from the config file, else table]
    #[arg(long, short = 'o', env = "HUBCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The selected output format, falling back to a table.
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the hub version
    Version,

    /// Show detailed hub information (admin only)
    Info,

    /// Show the user or service owning the current credentials
    Whoami,

    /// Manage users and their servers
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage groups
    #[command(alias = "g")]
    Groups(GroupsArgs),

    /// Inspect hub services
    Services(ServicesArgs),

    /// Inspect and sync the proxy routing table
    Proxy(ProxyArgs),

    /// Work with API tokens
    Token(TokenArgs),

    /// OAuth2 helpers for hub services
    Oauth(OauthArgs),

    /// Shut the hub down
    Shutdown(ShutdownArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Paging Arguments ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Max results (0 lets the hub decide)
    #[arg(long, short = 'l', default_value = "0")]
    pub limit: u32,

    /// Pagination offset
    #[arg(long, default_value = "0")]
    pub offset: u32,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateFilter {
    /// No server running or pending
    Inactive,
    /// Server running or pending
    Active,
    /// Server running and ready
    Ready,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    #[command(alias = "ls")]
    List {
        /// Only users whose servers are in this state
        #[arg(long, short = 's')]
        state: Option<StateFilter>,

        /// Include stopped servers in each user's server map
        #[arg(long)]
        include_stopped: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one user
    Get { name: String },

    /// Create one or more users
    Create {
        #[arg(required = true)]
        names: Vec<String>,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete { name: String },

    /// Grant or revoke admin rights
    SetAdmin {
        name: String,

        #[arg(action = clap::ArgAction::Set)]
        admin: bool,
    },

    /// Start a user's server
    Start {
        name: String,

        /// Named server (default server when omitted)
        #[arg(long)]
        server: Option<String>,
    },

    /// Stop a user's server
    Stop {
        name: String,

        /// Named server (default server when omitted)
        #[arg(long)]
        server: Option<String>,
    },

    /// List a user's API tokens
    Tokens { name: String },
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one group
    Get { name: String },

    /// Create a group
    Create { name: String },

    /// Delete a group
    #[command(alias = "rm")]
    Delete { name: String },

    /// Add users to a group
    AddUsers {
        name: String,

        #[arg(required = true)]
        users: Vec<String>,
    },

    /// Remove users from a group
    RemoveUsers {
        name: String,

        #[arg(required = true)]
        users: Vec<String>,
    },
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services
    #[command(alias = "ls")]
    List,

    /// Show one service
    Get { name: String },
}

// ── Proxy ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProxyArgs {
    #[command(subcommand)]
    pub command: ProxyCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProxyCommand {
    /// Show the proxy routing table
    Show {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Force the hub to resync the proxy routing table
    Sync,
}

// ── Token ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Show who owns a token
    Validate {
        /// Token to check
        token: String,
    },
}

// ── OAuth ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OauthArgs {
    #[command(subcommand)]
    pub command: OauthCommand,
}

#[derive(Debug, Subcommand)]
pub enum OauthCommand {
    /// Print the authorize URL to send a browser to
    AuthorizeUrl {
        /// Where the hub redirects back to
        #[arg(long)]
        redirect_uri: String,

        /// Opaque value echoed back on the redirect
        #[arg(long)]
        state: String,

        /// Client id (defaults to the configured client id or service)
        #[arg(long)]
        client_id: Option<String>,

        /// Requested scopes, space separated
        #[arg(long)]
        scope: Option<String>,
    },
}

// ── Shutdown ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ShutdownArgs {
    /// Also shut down the proxy
    #[arg(long)]
    pub proxy: bool,

    /// Also shut down single-user servers
    #[arg(long)]
    pub servers: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the current configuration (secrets masked)
    Show,

    /// Create or update a profile with guided setup
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
