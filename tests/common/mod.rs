#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use resource_swagger::actix::SwaggerState;
use resource_swagger::config::{ApiDocInfo, RegistryModuleConfig, SwaggerConfig};
use resource_swagger::core::{FieldDescriptor, FieldType};
use resource_swagger::observability::Metrics;
use resource_swagger::registry::{Api, ModelResource, RegistryCatalog};

pub const MODULE: &str = "tests.api";

/// Registry with two resources, `alpha` and `beta`, each under its own tag.
pub fn alpha_beta_api() -> Api {
    Api::new("v1")
        .register(
            ModelResource::new("beta")
                .description("Second resource")
                .field(FieldDescriptor::new("id", FieldType::Integer).readonly())
                .field(FieldDescriptor::new("label", FieldType::String))
                .into_dyn(),
        )
        .register(
            ModelResource::new("alpha")
                .description("First resource")
                .field(FieldDescriptor::new("id", FieldType::Integer).readonly())
                .field(FieldDescriptor::new("name", FieldType::String))
                .filter("name", &["exact", "icontains"])
                .into_dyn(),
        )
}

pub fn catalog() -> RegistryCatalog {
    RegistryCatalog::new()
        .register_instance(MODULE, "v1_api", Arc::new(alpha_beta_api()))
        .register_factory(MODULE, "builder", "build_v2", || {
            Arc::new(Api::new("v2").register(ModelResource::new("gamma").tag("beta").into_dyn()))
        })
}

pub fn entry(obj: &str, func_name: Option<&str>) -> RegistryModuleConfig {
    RegistryModuleConfig {
        path: MODULE.to_string(),
        obj: obj.to_string(),
        func_name: func_name.map(str::to_string),
    }
}

pub fn swagger_config(entries: Vec<RegistryModuleConfig>, mount_path: &str) -> SwaggerConfig {
    SwaggerConfig {
        api_registry_module_list: entries,
        supported_submit_methods: vec!["GET".to_string(), "post".to_string()],
        api_doc_info: ApiDocInfo::default(),
        allow_missing_slash: false,
        mount_path: mount_path.to_string(),
    }
}

pub fn state(entries: Vec<RegistryModuleConfig>, mount_path: &str) -> web::Data<SwaggerState> {
    let state = SwaggerState::from_config(Arc::new(catalog()), &swagger_config(entries, mount_path))
        .expect("build swagger state");
    web::Data::new(state)
}

pub fn metrics() -> web::Data<Metrics> {
    web::Data::new(Metrics::new().expect("metrics"))
}
