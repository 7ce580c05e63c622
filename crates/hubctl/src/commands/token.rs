//! Token command handlers.

use hubctl_api::HubClient;

use crate::cli::{GlobalOpts, TokenArgs, TokenCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &HubClient, args: TokenArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TokenCommand::Validate { token } => {
            let owner = client.validate_token(&token).await.map_err(|e| {
                CliError::from(e).or_not_found("token", "(redacted)", "users tokens <name>")
            })?;
            let out = output::render_single(global.output_format(), &owner, |o| {
                output::detail_lines(&[
                    ("Owner", o.name.clone()),
                    ("Kind", output::opt_or_dash(o.kind.as_deref())),
                    ("Admin", o.admin.to_string()),
                    ("Scopes", output::join_or_dash(&o.scopes)),
                ])
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
