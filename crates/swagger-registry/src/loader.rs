use std::sync::Arc;

use swagger_config::RegistryModuleConfig;
use swagger_core::SwaggerError;
use swagger_ports::DynRegistry;

use crate::RegistryCatalog;

/// Resolves the configured registry entries against a catalog.
///
/// Resolution is repeated on every call; nothing is cached between requests.
#[derive(Clone)]
pub struct RegistryLoader {
    catalog: Arc<RegistryCatalog>,
    entries: Vec<RegistryModuleConfig>,
}

impl RegistryLoader {
    pub fn new(catalog: Arc<RegistryCatalog>, entries: Vec<RegistryModuleConfig>) -> Self {
        Self { catalog, entries }
    }

    /// Resolve every configured entry, in configuration order.
    pub fn load(&self) -> Result<Vec<DynRegistry>, SwaggerError> {
        if self.entries.is_empty() {
            tracing::warn!("no API registries configured");
            return Err(SwaggerError::improperly_configured(
                "Must define API_REGISTRY_MODULE_LIST in settings as path to an API registry instance",
            ));
        }

        self.entries
            .iter()
            .map(|entry| {
                let resolved = self.catalog.resolve(entry);
                match &resolved {
                    Ok(registry) => tracing::debug!(
                        path = %entry.path,
                        obj = %entry.obj,
                        api_name = %registry.api_name(),
                        "resolved API registry"
                    ),
                    Err(e) => tracing::warn!(
                        path = %entry.path,
                        obj = %entry.obj,
                        error = %e,
                        "failed to resolve API registry"
                    ),
                }
                resolved
            })
            .collect()
    }

    /// Load all registries and return the first named `api_name`.
    pub fn load_named(&self, api_name: &str) -> Result<DynRegistry, SwaggerError> {
        self.load()?
            .into_iter()
            .find(|registry| registry.api_name() == api_name)
            .ok_or_else(|| {
                SwaggerError::not_found(&format!("no API registry named '{}'", api_name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Api, ModelResource};

    fn loader(entries: Vec<RegistryModuleConfig>) -> RegistryLoader {
        let catalog = RegistryCatalog::new()
            .register_instance(
                "blog.api",
                "v1_api",
                Arc::new(Api::new("v1").register(ModelResource::new("entry").into_dyn())),
            )
            .register_factory("blog.api", "v2_api", "build", || Arc::new(Api::new("v2")));
        RegistryLoader::new(Arc::new(catalog), entries)
    }

    fn entry(obj: &str, func_name: Option<&str>) -> RegistryModuleConfig {
        RegistryModuleConfig {
            path: "blog.api".to_string(),
            obj: obj.to_string(),
            func_name: func_name.map(str::to_string),
        }
    }

    #[test]
    fn empty_configuration_is_rejected() {
        let err = loader(Vec::new()).load().err().unwrap();
        assert!(err.is_improperly_configured());
    }

    #[test]
    fn loads_in_configuration_order() {
        let registries = loader(vec![entry("v2_api", Some("build")), entry("v1_api", None)])
            .load()
            .unwrap();

        let names: Vec<&str> = registries.iter().map(|r| r.api_name()).collect();
        assert_eq!(names, vec!["v2", "v1"]);
    }

    #[test]
    fn one_bad_entry_fails_the_whole_load() {
        let result = loader(vec![entry("v1_api", None), entry("nope", None)]).load();
        assert!(result.is_err());
    }

    #[test]
    fn load_named_reports_not_found() {
        let loader = loader(vec![entry("v1_api", None)]);

        assert_eq!(loader.load_named("v1").unwrap().resource_names(), vec!["entry"]);

        let err = loader.load_named("v9").err().unwrap();
        assert!(err.is_not_found());
    }
}
