use std::sync::Arc;

use serde_json::{json, Value};
use tera::Tera;

use swagger_config::SwaggerConfig;
use swagger_core::SwaggerError;
use swagger_openapi::DocumentBuilder;
use swagger_registry::{RegistryCatalog, RegistryLoader};

use crate::ViewContext;

const INDEX_TEMPLATE_NAME: &str = "swagger/index.html";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Presentation settings of the HTML shell.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub title: String,
    pub supported_submit_methods: Vec<String>,
    /// Mount path without trailing slash; empty for the root.
    pub mount_path: String,
}

impl ViewSettings {
    pub fn from_config(config: &SwaggerConfig) -> Self {
        Self {
            title: config.api_doc_info.title.clone(),
            supported_submit_methods: config.submit_methods(),
            mount_path: config.normalized_mount_path(),
        }
    }

    pub fn resources_url(&self) -> String {
        format!("{}/resources/", self.mount_path)
    }
}

/// Application state of the documentation views: the registry-loading and
/// document-building capabilities, plus the HTML shell.
#[derive(Clone)]
pub struct SwaggerState {
    pub loader: RegistryLoader,
    pub builder: DocumentBuilder,
    pub settings: ViewSettings,
    templates: Arc<Tera>,
}

impl SwaggerState {
    pub fn new(
        loader: RegistryLoader,
        builder: DocumentBuilder,
        settings: ViewSettings,
    ) -> Result<Self, SwaggerError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
            .map_err(|e| SwaggerError::server_error(&format!("invalid index template: {}", e)))?;

        Ok(Self {
            loader,
            builder,
            settings,
            templates: Arc::new(tera),
        })
    }

    /// Wire the views for `config` against the registries in `catalog`.
    pub fn from_config(
        catalog: Arc<RegistryCatalog>,
        config: &SwaggerConfig,
    ) -> Result<Self, SwaggerError> {
        Self::new(
            RegistryLoader::new(catalog, config.api_registry_module_list.clone()),
            DocumentBuilder::from_config(config),
            ViewSettings::from_config(config),
        )
    }

    /// Add the HTML shell's settings to `context`.
    pub fn index_context(&self, context: &mut ViewContext) {
        context.insert("title", json!(self.settings.title));
        context.insert(
            "supported_submit_methods",
            Value::from(self.settings.supported_submit_methods.clone()),
        );
        context.insert("resources_url", json!(self.settings.resources_url()));
    }

    pub fn render_index(&self, context: &ViewContext) -> Result<String, SwaggerError> {
        let context = tera::Context::from_serialize(context.as_map())
            .map_err(|e| SwaggerError::server_error(&e.to_string()))?;
        self.templates
            .render(INDEX_TEMPLATE_NAME, &context)
            .map_err(|e| SwaggerError::server_error(&format!("failed to render index: {}", e)))
    }
}
