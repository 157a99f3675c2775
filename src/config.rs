use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::contact::ContactScheme;

/// Hosted store endpoint, read straight from the environment when set.
pub const STORE_URL_ENV: &str = "SUPABASE_URL";
/// Service-role credential for the hosted store.
pub const STORE_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub store: StoreSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub base_url: String,
    #[serde(default)]
    pub contact_scheme: ContactScheme,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct StoreSettings {
    pub base_url: String,
    // secrecy protects secret information and prevents them to be exposed (eg: via logs)
    pub service_role_key: Secret<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(
        default = "default_timeout_milliseconds",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_milliseconds: u64,
}

fn default_table() -> String {
    String::from("subscribers")
}

fn default_timeout_milliseconds() -> u64 {
    10_000
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn get_app_base_url(&self) -> String {
        self.application.get_base_url()
    }

    pub fn get_contact_scheme(&self) -> ContactScheme {
        self.application.contact_scheme
    }

    pub fn set_store_base_url(&mut self, new_base_url: String) {
        self.store.set_base_url(new_base_url)
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }

    pub fn set_contact_scheme(&mut self, scheme: ContactScheme) {
        self.application.contact_scheme = scheme;
    }

    /// Both store secrets must be present and non-blank before the server starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.base_url.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "store.base_url is empty. Set it in the configuration files or through {}.",
                STORE_URL_ENV
            )));
        }

        if self.store.service_role_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "store.service_role_key is empty. Set it through {}.",
                STORE_KEY_ENV
            )));
        }

        Ok(())
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }

    pub fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}

impl StoreSettings {
    pub fn get_base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn get_service_role_key(&self) -> Secret<String> {
        self.service_role_key.clone()
    }

    pub fn get_table(&self) -> String {
        self.table.clone()
    }

    pub fn get_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn set_base_url(&mut self, new_base_url: String) {
        self.base_url = new_base_url
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    get_configuration_with(|name| std::env::var(name).ok())
}

/// Same as [`get_configuration`], reading `APP_ENVIRONMENT` and the store
/// credentials through `env_var` instead of the process environment.
pub fn get_configuration_with<F>(env_var: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let root_path = std::env::current_dir().map_err(|err| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", err))
    })?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let environment: Environment = env_var("APP_ENVIRONMENT")
        .unwrap_or_else(|| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(environment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_APPLICATION__PORT would set Settings.application.port
        .add_source(config::Environment::with_prefix("app").separator("__"))
        // The hosted store hands out its credentials under these names
        .set_override_option("store.base_url", env_var(STORE_URL_ENV))?
        .set_override_option("store.service_role_key", env_var(STORE_KEY_ENV))?
        .build()?;

    tracing::info!("Application environment = {:?}", environment);

    // Try to convert the value from the configuration file into a Settings type
    let settings: Settings = settings.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
