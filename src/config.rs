use std::collections::HashMap;

pub const DEFAULT_PATH: &str = "/etc/courier/courier.toml";
const ENV_PREFIX: &str = "COURIER";

/// Loads config from the filesystem and merges it with any environment
/// variables prefixed with COURIER_.
///
/// This function will panic on error.
///
/// Feed the resulting map to `Credentials::from_map` to get a typed view
/// of the provider settings.
pub fn load_config(path: Option<&str>) -> HashMap<String, String> {
    let mut settings = config::Config::default();

    settings
        .merge(config::File::with_name(path.unwrap_or(DEFAULT_PATH)))
        .unwrap()
        .merge(config::Environment::with_prefix(ENV_PREFIX))
        .unwrap();

    settings.try_into::<HashMap<String, String>>().unwrap()
}
