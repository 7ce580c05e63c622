//! Proxy command handlers.

use tabled::Tabled;

use hubctl_api::HubClient;
use hubctl_api::models::{ProxyRoute, ProxyTableParams};

use crate::cli::{GlobalOpts, ProxyArgs, ProxyCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Route")]
    routespec: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Data")]
    data: String,
}

impl From<&ProxyRoute> for RouteRow {
    fn from(r: &ProxyRoute) -> Self {
        Self {
            routespec: r.routespec.clone(),
            target: r.target.clone(),
            data: output::opt_or_dash(r.data.as_ref()),
        }
    }
}

pub async fn handle(client: &HubClient, args: ProxyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ProxyCommand::Show { page } => {
            let table = client
                .get_proxy_table(&ProxyTableParams {
                    offset: page.offset,
                    limit: page.limit,
                })
                .await?;
            let mut routes: Vec<ProxyRoute> = table.into_values().collect();
            routes.sort_by(|a, b| a.routespec.cmp(&b.routespec));
            let out = output::render_list(global.output_format(), &routes, |r| RouteRow::from(r))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProxyCommand::Sync => {
            client.force_proxy_sync().await?;
            output::notice("Proxy sync requested", global.quiet);
            Ok(())
        }
    }
}
