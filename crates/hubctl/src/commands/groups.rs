//! Group command handlers.

use tabled::Tabled;

use hubctl_api::HubClient;
use hubctl_api::models::{Group, GroupUsersBody, ListGroupsParams};

use crate::cli::{GlobalOpts, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Roles")]
    roles: String,
}

impl From<&Group> for GroupRow {
    fn from(g: &Group) -> Self {
        Self {
            name: g.name.clone(),
            members: g.users.len(),
            roles: output::join_or_dash(&g.roles),
        }
    }
}

fn group_detail(g: &Group) -> String {
    let properties = if g.properties.is_empty() {
        "-".into()
    } else {
        serde_json::Value::Object(g.properties.clone()).to_string()
    };
    output::detail_lines(&[
        ("Name", g.name.clone()),
        ("Users", output::join_or_dash(&g.users)),
        ("Roles", output::join_or_dash(&g.roles)),
        ("Properties", properties),
    ])
}

fn not_found(name: &str) -> impl Fn(hubctl_api::Error) -> CliError + '_ {
    move |e| CliError::from(e).or_not_found("group", name, "groups list")
}

pub async fn handle(client: &HubClient, args: GroupsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        GroupsCommand::List { page } => {
            let groups = client
                .list_groups(&ListGroupsParams {
                    offset: page.offset,
                    limit: page.limit,
                })
                .await?;
            let out = output::render_list(global.output_format(), &groups, |g| GroupRow::from(g))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Get { name } => {
            let group = client.get_group(&name).await.map_err(not_found(&name))?;
            let out = output::render_single(global.output_format(), &group, group_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Create { name } => {
            let group = client.create_group(&name).await?;
            let out = output::render_single(global.output_format(), &group, group_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Delete { name } => {
            if !util::confirm(&format!("Delete group '{name}'?"), "delete group", global.yes)? {
                return Ok(());
            }
            client.delete_group(&name).await.map_err(not_found(&name))?;
            output::notice("Group deleted", global.quiet);
            Ok(())
        }

        GroupsCommand::AddUsers { name, users } => {
            let group = client
                .add_group_users(&name, &GroupUsersBody { users })
                .await
                .map_err(not_found(&name))?;
            let out = output::render_single(global.output_format(), &group, group_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::RemoveUsers { name, users } => {
            client
                .remove_group_users(&name, &GroupUsersBody { users })
                .await
                .map_err(not_found(&name))?;
            output::notice("Group members removed", global.quiet);
            Ok(())
        }
    }
}
