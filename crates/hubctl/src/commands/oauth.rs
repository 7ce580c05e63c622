//! OAuth command handlers. Nothing here talks to the hub.

use hubctl_api::HubClient;
use hubctl_api::models::AuthorizeParams;

use crate::cli::{GlobalOpts, OauthArgs, OauthCommand};
use crate::error::CliError;
use crate::output;

pub fn handle(client: &HubClient, args: OauthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OauthCommand::AuthorizeUrl {
            redirect_uri,
            state,
            client_id,
            scope,
        } => {
            let url = client.oauth2_authorize_url(&AuthorizeParams {
                client_id,
                response_type: None,
                state,
                redirect_uri,
                scope,
            })?;
            output::print_output(url.as_str(), global.quiet);
            Ok(())
        }
    }
}
