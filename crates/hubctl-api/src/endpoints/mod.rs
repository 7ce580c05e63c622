// Endpoint groups, each an inherent `impl HubClient` block.

mod authorizations;
mod groups;
mod hub;
mod oauth;
mod proxy;
mod services;
mod users;

pub use oauth::parse_oauth_callback;
