//! Command dispatch: bridges CLI args -> hub API calls -> output formatting.

pub mod config_cmd;
pub mod groups;
pub mod hub;
pub mod oauth;
pub mod proxy;
pub mod services;
pub mod token;
pub mod users;
pub mod util;

use hubctl_api::HubClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a hub-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, client: &HubClient, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Version => hub::version(client, global).await,
        Command::Info => hub::info(client, global).await,
        Command::Whoami => hub::whoami(client, global).await,
        Command::Shutdown(args) => hub::shutdown(client, args, global).await,
        Command::Users(args) => users::handle(client, args, global).await,
        Command::Groups(args) => groups::handle(client, args, global).await,
        Command::Services(args) => services::handle(client, args, global).await,
        Command::Proxy(args) => proxy::handle(client, args, global).await,
        Command::Token(args) => token::handle(client, args, global).await,
        Command::Oauth(args) => oauth::handle(client, args, global),
        // Config and Completions are handled before a client is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
