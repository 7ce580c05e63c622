//! Hub-level handlers: version, info, whoami, shutdown.

use hubctl_api::HubClient;
use hubctl_api::models::ShutdownBody;

use crate::cli::{GlobalOpts, ShutdownArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn version(client: &HubClient, global: &GlobalOpts) -> Result<(), CliError> {
    let version = client.version().await?;
    let out = output::render_single(global.output_format(), &version, |v| v.version.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn info(client: &HubClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.info().await?;
    let out = output::render_single(global.output_format(), &info, |i| {
        output::detail_lines(&[
            ("Version", i.version.clone()),
            ("Python", output::opt_or_dash(i.python.as_deref())),
            ("Authenticator", component(&i.authenticator)),
            ("Spawner", component(&i.spawner)),
        ])
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn component(c: &hubctl_api::models::ComponentInfo) -> String {
    match c.version {
        Some(ref v) => format!("{} {v}", c.class),
        None => c.class.clone(),
    }
}

pub async fn whoami(client: &HubClient, global: &GlobalOpts) -> Result<(), CliError> {
    let me = client.current_user().await?;
    let out = output::render_single(global.output_format(), &me, |u| {
        output::detail_lines(&[
            ("Name", u.name.clone()),
            ("Kind", output::opt_or_dash(u.kind.as_deref())),
            ("Admin", u.admin.to_string()),
            ("Groups", output::join_or_dash(&u.groups)),
            ("Scopes", output::join_or_dash(&u.scopes)),
        ])
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn shutdown(
    client: &HubClient,
    args: ShutdownArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !util::confirm("Shut down the hub?", "shutdown", global.yes)? {
        return Ok(());
    }
    client
        .shutdown(&ShutdownBody {
            proxy: args.proxy,
            servers: args.servers,
        })
        .await?;
    output::notice("Hub shutdown requested", global.quiet);
    Ok(())
}
