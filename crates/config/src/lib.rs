use etcetera::BaseStrategy;
use serde::{Deserialize, Serialize};

use figment::{
    providers::{Env, Format, Toml},
    Figment, Metadata, Provider,
};

lazy_static::lazy_static! {
    /// Provide a lazily instantiated static reference to a config
    /// object parsed from canonical locations so that the CLI has
    /// immutable access to it from anywhere without ever parsing the
    /// config more than once.
    pub static ref CONFIG: Config = load_config();
}

fn load_config() -> Config {
    Config::figment().extract().unwrap_or_default()
}

#[derive(Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    lint: Lint,
}

/// How hard each lint rule bites.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suppress the rule entirely.
    Allow,
    /// Report the rule without failing the run.
    Warn,
    /// Report the rule and fail the run.
    Deny,
}

/// Per-rule severities, all `deny` unless the user relaxes them.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
#[serde(default, rename_all = "kebab-case")]
pub struct Lint {
    pub editable_first: Severity,
    pub duplicate_name: Severity,
    pub unsatisfiable: Severity,
}

impl Default for Lint {
    fn default() -> Self {
        Lint {
            editable_first: Severity::Deny,
            duplicate_name: Severity::Deny,
            unsatisfiable: Severity::Deny,
        }
    }
}

impl Config {
    pub fn lint(&self) -> &Lint {
        &self.lint
    }

    pub fn from<T: Provider>(provider: T) -> Result<Config, figment::Error> {
        Figment::from(provider).extract()
    }

    pub fn figment() -> Figment {
        let mut fig = Figment::from(Config::default());

        if let Ok(c) = etcetera::choose_base_strategy() {
            let config = c.config_dir().join("reqlint.toml");
            fig = fig.admerge(Toml::file(config));
        }

        fig.admerge(Env::prefixed("REQLINT_"))
    }
}

impl Provider for Config {
    fn metadata(&self) -> figment::Metadata {
        Metadata::named("Reqlint CLI Config")
    }
    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        figment::providers::Serialized::defaults(Config::default()).data()
    }
}
