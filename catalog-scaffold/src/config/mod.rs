//! Configuration management for catalog-scaffold
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Command-line flags (merged by the CLI, highest priority)
//! 2. Environment variables (`CATALOG_` prefix, `__` separates sections;
//!    a bare `DATABASE_URL` is honoured below them)
//! 3. `./catalog-scaffold.toml` or the file given with `--config`
//! 4. `~/.config/catalog-scaffold/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # catalog-scaffold.toml
//! [database]
//! url = "sqlite://./database/database.sqlite"
//!
//! [paths]
//! project_root = "."
//! routes = "routes/web.php"
//!
//! [templates]
//! dir = "stubs/catalog"
//! unbound_placeholders = "reject"
//!
//! [generator]
//! excluded_columns = ["id", "created_at", "updated_at", "deleted_at", "uuid"]
//!
//! [routes]
//! placement = "last_contiguous"
//! ```

use crate::error::{Result, ScaffoldError};
use crate::scaffold::routes::RouteDialect;
use crate::scaffold::templates::UnboundPlaceholders;
use crate::schema::ColumnFilter;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "catalog-scaffold.toml";

/// Default directory for customized stubs, relative to the project root
pub const DEFAULT_STUB_DIR: &str = "stubs/catalog";

/// Database settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL used for schema introspection
    pub url: Option<String>,
}

/// Output locations, relative to `project_root`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Root every other path is resolved against
    pub project_root: PathBuf,
    /// Model classes
    pub models: PathBuf,
    /// Controller classes
    pub controllers: PathBuf,
    /// Form-request validators
    pub requests: PathBuf,
    /// Database seeders
    pub seeders: PathBuf,
    /// UI pages; each model gets a subdirectory
    pub pages: PathBuf,
    /// Shared routes registry patched in place
    pub routes: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            models: PathBuf::from("app/Models"),
            controllers: PathBuf::from("app/Http/Controllers"),
            requests: PathBuf::from("app/Http/Requests"),
            seeders: PathBuf::from("database/seeders"),
            pages: PathBuf::from("resources/js/Pages"),
            routes: PathBuf::from("routes/web.php"),
        }
    }
}

impl PathSettings {
    /// Absolute (root-joined) location of the routes registry
    #[must_use]
    pub fn routes_file(&self) -> PathBuf {
        self.project_root.join(&self.routes)
    }
}

/// Template settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory of customized `.stub` files, relative to `project_root`
    ///
    /// When unset, `{project_root}/stubs/catalog` is used if it exists and
    /// the compiled-in stubs otherwise.
    pub dir: Option<PathBuf>,

    /// What to do when a stub references a placeholder nobody bound
    pub unbound_placeholders: UnboundPlaceholders,
}

/// Generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Columns never offered for mass assignment or validation
    pub excluded_columns: Vec<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            excluded_columns: ColumnFilter::DEFAULT_EXCLUDED
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl GeneratorSettings {
    /// Build the column filter described by these settings
    #[must_use]
    pub fn column_filter(&self) -> ColumnFilter {
        ColumnFilter::new(self.excluded_columns.iter().cloned())
    }
}

/// Complete catalog-scaffold configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Template settings
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Routes registry dialect
    #[serde(default)]
    pub routes: RouteDialect,
}

impl CatalogConfig {
    /// Load configuration from every source
    ///
    /// `explicit` replaces `./catalog-scaffold.toml` and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any source fails
    /// to deserialize.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::extract(Self::figment(explicit)?)
    }

    /// Build the layered figment without extracting it
    ///
    /// The CLI merges its own flags on top before calling [`Self::extract`].
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is given but does not exist.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_config) = Self::user_config_path() {
            figment = figment.merge(Toml::file(user_config));
        }

        let project_config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ScaffoldError::io(
                        path,
                        std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                    ));
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Ok(figment
            .merge(Toml::file(project_config))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
            .merge(Env::prefixed("CATALOG_").split("__")))
    }

    /// Extract a configuration from a prepared figment
    ///
    /// # Errors
    ///
    /// Returns an error if the merged data does not match the schema.
    pub fn extract(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| ScaffoldError::Config(Box::new(e)))
    }

    /// Get the XDG user config path
    ///
    /// Returns `None` when no config directory can be determined.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("catalog-scaffold").join("config.toml"))
    }

    /// Stub directory used by template management commands
    ///
    /// A relative `templates.dir` is resolved against the project root.
    #[must_use]
    pub fn stub_dir(&self) -> PathBuf {
        let dir = self
            .templates
            .dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STUB_DIR));
        self.paths.project_root.join(dir)
    }

    /// Stub directory generation renders from, or `None` for compiled-in stubs
    ///
    /// An explicit `templates.dir` is always used, even when it does not
    /// exist; the default location only when it does.
    #[must_use]
    pub fn render_stub_dir(&self) -> Option<PathBuf> {
        let dir = self.stub_dir();
        (self.templates.dir.is_some() || dir.is_dir()).then_some(dir)
    }
}
