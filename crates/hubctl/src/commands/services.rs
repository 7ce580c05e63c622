//! Service command handlers.

use tabled::Tabled;

use hubctl_api::HubClient;
use hubctl_api::models::Service;

use crate::cli::{GlobalOpts, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Prefix")]
    prefix: String,
    #[tabled(rename = "PID")]
    pid: String,
}

impl From<&Service> for ServiceRow {
    fn from(s: &Service) -> Self {
        Self {
            name: s.name.clone(),
            url: output::opt_or_dash(s.url.as_deref()),
            prefix: output::opt_or_dash(s.prefix.as_deref()),
            pid: output::opt_or_dash(s.pid),
        }
    }
}

fn service_detail(s: &Service) -> String {
    output::detail_lines(&[
        ("Name", s.name.clone()),
        ("Admin", s.admin.to_string()),
        ("URL", output::opt_or_dash(s.url.as_deref())),
        ("Prefix", output::opt_or_dash(s.prefix.as_deref())),
        ("PID", output::opt_or_dash(s.pid)),
        ("Command", s.command.join(" ")),
        ("Roles", output::join_or_dash(&s.roles)),
    ])
}

pub async fn handle(
    client: &HubClient,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServicesCommand::List => {
            let mut services: Vec<Service> = client.list_services().await?.into_values().collect();
            services.sort_by(|a, b| a.name.cmp(&b.name));
            let out = output::render_list(global.output_format(), &services, |s| ServiceRow::from(s))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServicesCommand::Get { name } => {
            let service = client
                .get_service(&name)
                .await
                .map_err(|e| CliError::from(e).or_not_found("service", &name, "services list"))?;
            let out = output::render_single(global.output_format(), &service, service_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
