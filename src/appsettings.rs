use config::{Config, ConfigError, Environment, File};
use shprayer_models::settings::Settings;

/// Layers `appsettings`, `appsettings.local` and `APP_*` variables, in that
/// order. Nested keys use `__`, e.g. `APP_SPEECH__ENABLED=false`.
pub fn load() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("appsettings").required(false))
        .add_source(File::with_name("appsettings.local").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
