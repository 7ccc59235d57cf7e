mod loader;
mod schema;

pub use loader::{config_path, load_config, set_api_key, set_url};
pub use schema::{Config, EnvOverrides};
