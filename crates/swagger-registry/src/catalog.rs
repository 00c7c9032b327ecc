use std::collections::BTreeMap;
use std::sync::Arc;

use swagger_config::RegistryModuleConfig;
use swagger_core::SwaggerError;
use swagger_ports::DynRegistry;

/// Zero-argument constructor producing a registry on demand.
pub type RegistryFactory = Arc<dyn Fn() -> DynRegistry + Send + Sync>;

#[derive(Default, Clone)]
struct RegisteredObject {
    instance: Option<DynRegistry>,
    factories: BTreeMap<String, RegistryFactory>,
}

/// Explicit registration of API registries, addressed the same way the
/// configuration addresses them: a module `path`, an object name `obj` and an
/// optional factory `func_name` on that object.
#[derive(Default, Clone)]
pub struct RegistryCatalog {
    modules: BTreeMap<String, BTreeMap<String, RegisteredObject>>,
}

impl RegistryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-constructed registry as `path` / `obj`.
    pub fn register_instance(
        mut self,
        path: impl Into<String>,
        obj: impl Into<String>,
        registry: DynRegistry,
    ) -> Self {
        self.object_mut(path.into(), obj.into()).instance = Some(registry);
        self
    }

    /// Register a factory reachable as `path` / `obj` / `func_name`.
    pub fn register_factory<F>(
        mut self,
        path: impl Into<String>,
        obj: impl Into<String>,
        func_name: impl Into<String>,
        factory: F,
    ) -> Self
    where
        F: Fn() -> DynRegistry + Send + Sync + 'static,
    {
        self.object_mut(path.into(), obj.into())
            .factories
            .insert(func_name.into(), Arc::new(factory));
        self
    }

    /// Resolve one configured entry to a registry.
    pub fn resolve(&self, entry: &RegistryModuleConfig) -> Result<DynRegistry, SwaggerError> {
        let module = self.modules.get(&entry.path).ok_or_else(|| {
            SwaggerError::improperly_configured(&format!(
                "{} is not a valid module path",
                entry.path
            ))
        })?;

        let not_a_registry = || {
            SwaggerError::improperly_configured(&format!(
                "{} is not a valid API registry instance",
                describe(entry)
            ))
        };

        let object = module.get(&entry.obj).ok_or_else(not_a_registry)?;

        match entry.func_name.as_deref() {
            Some(func_name) => object
                .factories
                .get(func_name)
                .map(|factory| factory())
                .ok_or_else(not_a_registry),
            None => object.instance.clone().ok_or_else(not_a_registry),
        }
    }

    fn object_mut(&mut self, path: String, obj: String) -> &mut RegisteredObject {
        self.modules.entry(path).or_default().entry(obj).or_default()
    }
}

fn describe(entry: &RegistryModuleConfig) -> String {
    match &entry.func_name {
        Some(func_name) => format!("{}:{}:{}", entry.path, entry.obj, func_name),
        None => format!("{}:{}", entry.path, entry.obj),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Api;

    fn entry(path: &str, obj: &str, func_name: Option<&str>) -> RegistryModuleConfig {
        RegistryModuleConfig {
            path: path.to_string(),
            obj: obj.to_string(),
            func_name: func_name.map(str::to_string),
        }
    }

    fn catalog() -> RegistryCatalog {
        RegistryCatalog::new()
            .register_instance("blog.api", "v1_api", Arc::new(Api::new("v1")))
            .register_factory("shop.api", "builder", "build_v2", || {
                Arc::new(Api::new("v2"))
            })
    }

    #[test]
    fn resolves_instances_and_factories() {
        let catalog = catalog();

        let v1 = catalog.resolve(&entry("blog.api", "v1_api", None)).unwrap();
        assert_eq!(v1.api_name(), "v1");

        let v2 = catalog
            .resolve(&entry("shop.api", "builder", Some("build_v2")))
            .unwrap();
        assert_eq!(v2.api_name(), "v2");
    }

    #[test]
    fn unknown_module_path_is_rejected() {
        let err = catalog()
            .resolve(&entry("missing.api", "v1_api", None))
            .err()
            .unwrap();
        assert!(err.is_improperly_configured());
        assert!(err.to_string().contains("missing.api is not a valid module path"));
    }

    #[test]
    fn non_registry_objects_are_rejected() {
        let catalog = catalog();

        for bad in [
            entry("blog.api", "other", None),
            entry("blog.api", "v1_api", Some("build")),
            entry("shop.api", "builder", None),
            entry("shop.api", "builder", Some("unknown")),
        ] {
            let err = catalog.resolve(&bad).err().unwrap();
            assert!(err.is_improperly_configured());
            assert!(err.to_string().contains("is not a valid API registry instance"));
        }
    }
}
