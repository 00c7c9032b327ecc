use serde_json::{json, Map, Value};
use utoipa::openapi::{Info, InfoBuilder, LicenseBuilder, Server};

use swagger_config::{ApiDocInfo, SwaggerConfig};
use swagger_core::{SwaggerError, TagList};
use swagger_ports::{ApiRegistry, DynRegistry, DynResource};

use crate::mapping::ResourceSwaggerMapping;

pub const OPENAPI_VERSION: &str = "3.0.1";
pub const LEGACY_SWAGGER_VERSION: &str = "1.1";

/// Merged path document and tag list of all configured registries.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub paths: Map<String, Value>,
    pub tags: TagList,
    pub resources: usize,
}

/// Builds the OpenAPI document served to Swagger UI, and the per-resource
/// Swagger 1.1 listings of the legacy schema view.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    info: Info,
    allow_missing_slash: bool,
}

impl DocumentBuilder {
    pub fn new(info: &ApiDocInfo, allow_missing_slash: bool) -> Self {
        let license = LicenseBuilder::new()
            .name(info.license.name.clone())
            .url(info.license.url.clone())
            .build();

        let info = InfoBuilder::new()
            .title(info.title.clone())
            .version(info.version.clone())
            .description(info.description.clone())
            .license(Some(license))
            .build();

        Self {
            info,
            allow_missing_slash,
        }
    }

    pub fn from_config(config: &SwaggerConfig) -> Self {
        Self::new(&config.api_doc_info, config.allow_missing_slash)
    }

    pub fn mapping(&self, registry: &dyn ApiRegistry, resource: DynResource) -> ResourceSwaggerMapping {
        ResourceSwaggerMapping::new(registry, resource, self.allow_missing_slash)
    }

    /// Walk every registry's resources in sorted name order, merging path
    /// fragments (later keys overwrite earlier ones) and collecting unique tags.
    pub fn collect(&self, registries: &[DynRegistry]) -> Result<Aggregate, SwaggerError> {
        let mut aggregate = Aggregate::default();

        for registry in registries {
            let mut names = registry.resource_names();
            names.sort();

            for name in names {
                let Some(resource) = registry.resource(&name) else {
                    tracing::warn!(
                        api_name = %registry.api_name(),
                        resource = %name,
                        "resource listed but not resolvable; skipping"
                    );
                    continue;
                };

                let mapping = self.mapping(registry.as_ref(), resource);
                aggregate.paths.extend(mapping.path_fragment()?);
                aggregate.tags.push_unique(mapping.build_global_tag());
                aggregate.resources += 1;
            }
        }

        tracing::debug!(
            paths = aggregate.paths.len(),
            tags = aggregate.tags.len(),
            resources = aggregate.resources,
            "aggregated resource documentation"
        );

        Ok(aggregate)
    }

    /// The OpenAPI 3.0.1 document: `openapi`, `info`, `servers`, `paths` and,
    /// when any resource contributed one, `tags`.
    pub fn build(
        &self,
        registries: &[DynRegistry],
        server_url: &str,
    ) -> Result<Map<String, Value>, SwaggerError> {
        let aggregate = self.collect(registries)?;
        self.render(aggregate, server_url)
    }

    pub fn render(
        &self,
        aggregate: Aggregate,
        server_url: &str,
    ) -> Result<Map<String, Value>, SwaggerError> {
        let mut document = Map::new();
        document.insert("openapi".to_string(), json!(OPENAPI_VERSION));
        document.insert("info".to_string(), serde_json::to_value(&self.info)?);
        document.insert(
            "servers".to_string(),
            serde_json::to_value(vec![Server::new(server_url)])?,
        );
        document.insert("paths".to_string(), Value::Object(aggregate.paths));
        if !aggregate.tags.is_empty() {
            document.insert("tags".to_string(), serde_json::to_value(&aggregate.tags)?);
        }
        Ok(document)
    }

    /// Swagger 1.1 listing of one resource of `registry`.
    pub fn build_resource_schema(
        &self,
        registry: &dyn ApiRegistry,
        resource_name: &str,
        base_path: &str,
    ) -> Result<Map<String, Value>, SwaggerError> {
        let resource = registry.resource(resource_name).ok_or_else(|| {
            SwaggerError::not_found(&format!(
                "no resource named '{}' in API registry '{}'",
                resource_name,
                registry.api_name()
            ))
        })?;
        let mapping = self.mapping(registry, resource);

        let mut listing = Map::new();
        listing.insert("apiVersion".to_string(), json!(self.info.version));
        listing.insert("swaggerVersion".to_string(), json!(LEGACY_SWAGGER_VERSION));
        listing.insert("basePath".to_string(), json!(base_path));
        listing.insert("resourcePath".to_string(), json!(mapping.list_endpoint()?));
        listing.insert("apis".to_string(), Value::Array(mapping.build_apis()?));
        listing.insert("models".to_string(), mapping.build_models());
        Ok(listing)
    }
}
