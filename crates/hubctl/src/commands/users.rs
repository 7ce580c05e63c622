//! User command handlers.

use tabled::Tabled;

use hubctl_api::HubClient;
use hubctl_api::models::{
    CreateUsersBody, ListUsersParams, Token, UpdateUserBody, User, UserState,
};

use crate::cli::{GlobalOpts, StateFilter, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Admin")]
    admin: String,
    #[tabled(rename = "Groups")]
    groups: String,
    #[tabled(rename = "Servers")]
    servers: String,
    #[tabled(rename = "Last Activity")]
    last_activity: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            admin: if u.admin { "yes".into() } else { String::new() },
            groups: output::join_or_dash(&u.groups),
            servers: u.servers.len().to_string(),
            last_activity: util::timestamp(u.last_activity),
        }
    }
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Scopes")]
    scopes: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Last Activity")]
    last_activity: String,
}

impl From<&Token> for TokenRow {
    fn from(t: &Token) -> Self {
        Self {
            id: t.id.clone(),
            note: output::opt_or_dash(t.note.as_deref()),
            scopes: output::join_or_dash(&t.scopes),
            expires: util::timestamp(t.expires_at),
            last_activity: util::timestamp(t.last_activity),
        }
    }
}

fn user_detail(u: &User) -> String {
    let mut servers: Vec<String> = u
        .servers
        .iter()
        .map(|(name, s)| {
            let label = if name.is_empty() { "(default)" } else { name.as_str() };
            let status = if s.ready { "ready" } else { s.pending.as_deref().unwrap_or("stopped") };
            format!("{label}: {status}")
        })
        .collect();
    servers.sort();

    output::detail_lines(&[
        ("Name", u.name.clone()),
        ("Admin", u.admin.to_string()),
        ("Groups", output::join_or_dash(&u.groups)),
        ("Roles", output::join_or_dash(&u.roles)),
        ("Servers", output::join_or_dash(&servers)),
        ("Created", util::timestamp(u.created)),
        ("Last Activity", util::timestamp(u.last_activity)),
    ])
}

impl From<StateFilter> for UserState {
    fn from(state: StateFilter) -> Self {
        match state {
            StateFilter::Inactive => UserState::Inactive,
            StateFilter::Active => UserState::Active,
            StateFilter::Ready => UserState::Ready,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(client: &HubClient, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List {
            state,
            include_stopped,
            page,
        } => {
            let params = ListUsersParams {
                state: state.map(UserState::from),
                offset: page.offset,
                limit: page.limit,
                include_stopped_servers: include_stopped,
            };
            let users = client.list_users(&params).await?;
            let out = output::render_list(global.output_format(), &users, |u| UserRow::from(u))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Get { name } => {
            let user = client
                .get_user(&name)
                .await
                .map_err(|e| CliError::from(e).or_not_found("user", &name, "users list"))?;
            let out = output::render_single(global.output_format(), &user, user_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create { names, admin } => {
            let created = match names.as_slice() {
                [name] if !admin => vec![client.create_user(name).await?],
                _ => {
                    client
                        .create_users(&CreateUsersBody {
                            usernames: names.clone(),
                            admin,
                        })
                        .await?
                }
            };
            let out = output::render_list(global.output_format(), &created, |u| UserRow::from(u))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Delete { name } => {
            if !util::confirm(&format!("Delete user '{name}'?"), "delete user", global.yes)? {
                return Ok(());
            }
            client
                .delete_user(&name)
                .await
                .map_err(|e| CliError::from(e).or_not_found("user", &name, "users list"))?;
            output::notice("User deleted", global.quiet);
            Ok(())
        }

        UsersCommand::SetAdmin { name, admin } => {
            let user = set_admin(client, &name, admin)
                .await
                .map_err(|e| CliError::from(e).or_not_found("user", &name, "users list"))?;
            let out = output::render_single(global.output_format(), &user, user_detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Start { name, server } => {
            let options = serde_json::json!({});
            match server {
                Some(ref server) => client.start_user_named_server(&name, server, &options).await?,
                None => client.start_user_server(&name, &options).await?,
            }
            output::notice("Server start requested", global.quiet);
            Ok(())
        }

        UsersCommand::Stop { name, server } => {
            match server {
                Some(ref server) => client.stop_user_named_server(&name, server).await?,
                None => client.stop_user_server(&name).await?,
            }
            output::notice("Server stop requested", global.quiet);
            Ok(())
        }

        UsersCommand::Tokens { name } => {
            let tokens = client
                .list_user_tokens(&name)
                .await
                .map_err(|e| CliError::from(e).or_not_found("user", &name, "users list"))?;
            let out = output::render_list(global.output_format(), &tokens, |t| TokenRow::from(t))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn set_admin(client: &HubClient, name: &str, admin: bool) -> Result<User, hubctl_api::Error> {
    client
        .update_user(
            name,
            &UpdateUserBody {
                admin: Some(admin),
                ..UpdateUserBody::default()
            },
        )
        .await
}
