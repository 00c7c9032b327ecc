use hocon::HoconLoader;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use validator::{Validate, ValidationError};

/// Submit methods Swagger UI may enable "Try it out" for.
const KNOWN_SUBMIT_METHODS: [&str; 7] = ["get", "post", "put", "patch", "delete", "head", "options"];

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub swagger: SwaggerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SwaggerConfig {
    /// Registries to document, resolved against the registration catalog.
    #[validate(
        length(min = 1, message = "at least one API registry entry is required"),
        nested
    )]
    #[serde(default)]
    pub api_registry_module_list: Vec<RegistryModuleConfig>,

    #[validate(custom(function = "validate_submit_methods"))]
    #[serde(default = "default_submit_methods")]
    pub supported_submit_methods: Vec<String>,

    #[serde(default)]
    pub api_doc_info: ApiDocInfo,

    /// Generate endpoint templates without a trailing slash.
    #[serde(default)]
    pub allow_missing_slash: bool,

    /// URL prefix the documentation views are mounted under (`""` is the root).
    #[serde(default)]
    pub mount_path: String,
}

/// One configured registry: `path` and `obj` name a registered object,
/// `func_name` an optional zero-argument factory on it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct RegistryModuleConfig {
    #[validate(length(min = 1))]
    pub path: String,
    #[validate(length(min = 1))]
    pub obj: String,
    #[serde(default)]
    pub func_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiDocInfo {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: LicenseInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LicenseInfo {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origins allowed to fetch the JSON document. `*` allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ApiDocInfo {
    fn default() -> Self {
        Self {
            title: "API Center".to_string(),
            version: "1.0.0".to_string(),
            description: Some("All backend APIs".to_string()),
            license: LicenseInfo::default(),
        }
    }
}

impl Default for LicenseInfo {
    fn default() -> Self {
        Self {
            name: "Private".to_string(),
            url: None,
        }
    }
}

fn default_submit_methods() -> Vec<String> {
    Vec::new()
}

fn validate_submit_methods(methods: &[String]) -> Result<(), ValidationError> {
    for method in methods {
        if !KNOWN_SUBMIT_METHODS.contains(&method.to_ascii_lowercase().as_str()) {
            let mut err = ValidationError::new("unknown_submit_method");
            err.message = Some(Cow::from(format!(
                "unsupported submit method '{}'",
                method
            )));
            return Err(err);
        }
    }
    Ok(())
}

impl SwaggerConfig {
    /// Mount path without a trailing slash; empty for the root.
    pub fn normalized_mount_path(&self) -> String {
        let trimmed = self.mount_path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    /// Submit methods lowercased, as Swagger UI expects them.
    pub fn submit_methods(&self) -> Vec<String> {
        self.supported_submit_methods
            .iter()
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty())
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        // Try to load from HOCON file first, fall back to environment variables
        Self::from_hocon().unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load HOCON config: {}. Falling back to environment variables.",
                e
            );
            Self::from_env_fallback()
        })
    }
}

impl Config {
    /// Load configuration from HOCON file with environment variable substitution
    pub fn from_hocon() -> Result<Self, String> {
        Self::from_hocon_path("application.conf")
    }

    /// Load configuration from a specific HOCON file path
    pub fn from_hocon_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let config: Config = HoconLoader::new()
            .load_file(path)
            .map_err(|e| format!("Failed to load HOCON file: {}", e))?
            .resolve()
            .map_err(|e| format!("Failed to parse and resolve HOCON: {}", e))?;

        Ok(config.with_env_overrides())
    }

    /// Load configuration from an in-memory HOCON document.
    pub fn from_hocon_str(source: &str) -> Result<Self, String> {
        HoconLoader::new()
            .load_str(source)
            .map_err(|e| format!("Failed to load HOCON source: {}", e))?
            .resolve()
            .map_err(|e| format!("Failed to parse and resolve HOCON: {}", e))
    }

    /// Load configuration from `SWAGGER__`-prefixed environment variables
    /// (`SWAGGER__SERVER__PORT=8000`). List values are comma separated.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SWAGGER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("swagger.supported_submit_methods")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Fallback configuration from flat environment variables.
    fn from_env_fallback() -> Self {
        let api_registry_module_list = std::env::var("SWAGGER_API_REGISTRY_MODULE_LIST")
            .ok()
            .map(|raw| {
                parse_registry_module_list(&raw).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring SWAGGER_API_REGISTRY_MODULE_LIST: {}", e);
                    Vec::new()
                })
            })
            .unwrap_or_default();

        Self {
            server: ServerConfig {
                host: std::env::var("SWAGGER_SERVER_HOST")
                    .unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SWAGGER_SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
            },
            swagger: SwaggerConfig {
                api_registry_module_list,
                supported_submit_methods: split_list(
                    &std::env::var("SWAGGER_SUPPORTED_SUBMIT_METHODS").unwrap_or_default(),
                ),
                api_doc_info: ApiDocInfo::default(),
                allow_missing_slash: std::env::var("SWAGGER_ALLOW_MISSING_SLASH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
                mount_path: std::env::var("SWAGGER_MOUNT_PATH").unwrap_or_default(),
            },
            cors: CorsConfig {
                allowed_origins: split_list(
                    &std::env::var("SWAGGER_CORS_ALLOWED_ORIGINS").unwrap_or_default(),
                ),
            },
        }
    }

    /// Apply environment overrides on top of the loaded file.
    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("SWAGGER_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SWAGGER_SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(methods) = std::env::var("SWAGGER_SUPPORTED_SUBMIT_METHODS") {
            self.swagger.supported_submit_methods = split_list(&methods);
        }
        if let Ok(raw) = std::env::var("SWAGGER_API_REGISTRY_MODULE_LIST") {
            match parse_registry_module_list(&raw) {
                Ok(entries) => self.swagger.api_registry_module_list = entries,
                Err(e) => tracing::warn!("Ignoring SWAGGER_API_REGISTRY_MODULE_LIST: {}", e),
            }
        }
        self
    }

    /// Validate configuration before serving; fails fast on misconfiguration.
    pub fn validate_settings(&self) -> Result<(), String> {
        self.validate()
            .map_err(|e| format!("Invalid configuration: {}", e))
    }
}

/// Parse `path:obj[:func_name]` entries separated by commas.
pub fn parse_registry_module_list(raw: &str) -> Result<Vec<RegistryModuleConfig>, String> {
    split_list(raw)
        .into_iter()
        .map(|entry| {
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            match parts.as_slice() {
                [path, obj] if !path.is_empty() && !obj.is_empty() => Ok(RegistryModuleConfig {
                    path: path.to_string(),
                    obj: obj.to_string(),
                    func_name: None,
                }),
                [path, obj, func] if !path.is_empty() && !obj.is_empty() => {
                    Ok(RegistryModuleConfig {
                        path: path.to_string(),
                        obj: obj.to_string(),
                        func_name: Some(func.to_string()).filter(|f| !f.is_empty()),
                    })
                }
                _ => Err(format!(
                    "malformed registry entry '{}', expected path:obj[:func_name]",
                    entry
                )),
            }
        })
        .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
