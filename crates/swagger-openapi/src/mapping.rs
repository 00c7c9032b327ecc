use serde_json::{json, Map, Value};

use swagger_core::urls::{trailing_slash_or_none, urljoin_forced};
use swagger_core::{FieldType, HttpMethod, SwaggerError, Tag, EXACT_FILTER};
use swagger_ports::{ApiRegistry, DynResource};

use crate::schema::{filter_value_type, legacy_data_type, object_schema, type_schema, ObjectShape};

/// Page size advertised for list endpoints that do not declare one.
pub const DEFAULT_LIMIT: u32 = 20;

const ORDER_BY_DESCRIPTION: &str = "Field to order by, prefixed with '-' for descending order";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    List,
    Detail,
}

impl Endpoint {
    fn as_str(&self) -> &'static str {
        match self {
            Endpoint::List => "list",
            Endpoint::Detail => "detail",
        }
    }
}

/// Query parameter for one `field` / `term` filter expression.
struct FilterParam {
    name: String,
    field: String,
    term: String,
    value_type: FieldType,
}

/// Translates one registered resource into OpenAPI path fragments, its tag,
/// and the Swagger 1.1 `apis` / `models` of the legacy schema view.
pub struct ResourceSwaggerMapping {
    resource: DynResource,
    api_name: String,
    url_prefix: String,
    allow_missing_slash: bool,
}

impl ResourceSwaggerMapping {
    pub fn new(registry: &dyn ApiRegistry, resource: DynResource, allow_missing_slash: bool) -> Self {
        Self {
            resource,
            api_name: registry.api_name().to_string(),
            url_prefix: registry.url_prefix().to_string(),
            allow_missing_slash,
        }
    }

    fn resource_name(&self) -> &str {
        &self.resource.meta().resource_name
    }

    /// `<prefix>/<api_name>/<resource_name>/`
    pub fn list_endpoint(&self) -> Result<String, SwaggerError> {
        let api_url = urljoin_forced(&self.url_prefix, &self.api_name)?;
        let list_url = urljoin_forced(&api_url, self.resource_name())?;
        Ok(format!(
            "{}{}",
            list_url.trim_end_matches('/'),
            trailing_slash_or_none(self.allow_missing_slash)
        ))
    }

    /// `<list endpoint>{id}/`
    pub fn detail_endpoint(&self) -> Result<String, SwaggerError> {
        let list_url = self.list_endpoint()?;
        Ok(format!(
            "{}/{{id}}{}",
            list_url.trim_end_matches('/'),
            trailing_slash_or_none(self.allow_missing_slash)
        ))
    }

    /// The resource documentation parsed as a JSON object, when it is one.
    pub fn doc_override(&self) -> Option<Map<String, Value>> {
        let doc = self.resource.doc()?;
        match serde_json::from_str::<Value>(doc) {
            Ok(Value::Object(fragment)) => Some(fragment),
            // `paths` maps path templates to items; arrays and scalars have no
            // keys to merge into it.
            Ok(_) => {
                tracing::debug!(
                    resource = %self.resource_name(),
                    "documentation is JSON but not an object; using generated paths"
                );
                None
            }
            Err(e) => {
                tracing::debug!(
                    resource = %self.resource_name(),
                    error = %e,
                    "documentation is not JSON; using generated paths"
                );
                None
            }
        }
    }

    /// Path fragment for the document: the documentation override when
    /// present, the generated paths otherwise.
    pub fn path_fragment(&self) -> Result<Map<String, Value>, SwaggerError> {
        match self.doc_override() {
            Some(fragment) => Ok(fragment),
            None => self.build_paths(),
        }
    }

    /// Generated OpenAPI path items for the list and detail endpoints.
    pub fn build_paths(&self) -> Result<Map<String, Value>, SwaggerError> {
        let meta = self.resource.meta();
        let mut paths = Map::new();

        for (endpoint, methods) in [
            (Endpoint::List, &meta.list_allowed_methods),
            (Endpoint::Detail, &meta.detail_allowed_methods),
        ] {
            if methods.is_empty() {
                continue;
            }

            let mut item = Map::new();
            for method in methods {
                item.insert(
                    method.as_str().to_string(),
                    self.build_operation(*method, endpoint),
                );
            }

            let url = match endpoint {
                Endpoint::List => self.list_endpoint()?,
                Endpoint::Detail => self.detail_endpoint()?,
            };
            paths.insert(url, Value::Object(item));
        }

        Ok(paths)
    }

    pub fn build_global_tag(&self) -> Tag {
        let meta = self.resource.meta();
        Tag::new(meta.tag_name(), meta.description.clone())
    }

    fn build_operation(&self, method: HttpMethod, endpoint: Endpoint) -> Value {
        let meta = self.resource.meta();
        let mut operation = Map::new();

        operation.insert(
            "summary".to_string(),
            json!(self.summary(method, endpoint)),
        );
        if let Some(description) = &meta.description {
            operation.insert("description".to_string(), json!(description));
        }
        operation.insert(
            "operationId".to_string(),
            json!(format!(
                "{}_{}_{}",
                method.as_str(),
                self.resource_name(),
                endpoint.as_str()
            )),
        );
        operation.insert("tags".to_string(), json!([meta.tag_name()]));

        let parameters = self.build_parameters(method, endpoint);
        if !parameters.is_empty() {
            operation.insert("parameters".to_string(), Value::Array(parameters));
        }

        if let Some(body) = self.build_request_body(method) {
            operation.insert("requestBody".to_string(), body);
        }

        operation.insert(
            "responses".to_string(),
            self.build_responses(method, endpoint),
        );

        Value::Object(operation)
    }

    fn summary(&self, method: HttpMethod, endpoint: Endpoint) -> String {
        let name = self.resource_name();
        match (endpoint, method) {
            (Endpoint::List, HttpMethod::Get) => format!("Retrieve a list of {} objects", name),
            (Endpoint::List, HttpMethod::Post) => format!("Create a new {} object", name),
            (Endpoint::List, HttpMethod::Put) => format!("Replace the {} collection", name),
            (Endpoint::List, HttpMethod::Patch) => format!("Update multiple {} objects", name),
            (Endpoint::List, HttpMethod::Delete) => format!("Delete the {} collection", name),
            (Endpoint::Detail, HttpMethod::Get) => format!("Retrieve a single {} object", name),
            (Endpoint::Detail, HttpMethod::Post) => {
                format!("Create a {} object at this location", name)
            }
            (Endpoint::Detail, HttpMethod::Put) => format!("Replace a {} object", name),
            (Endpoint::Detail, HttpMethod::Patch) => {
                format!("Partially update a {} object", name)
            }
            (Endpoint::Detail, HttpMethod::Delete) => format!("Delete a {} object", name),
        }
    }

    fn build_parameters(&self, method: HttpMethod, endpoint: Endpoint) -> Vec<Value> {
        let mut parameters = Vec::new();

        match endpoint {
            Endpoint::Detail => parameters.push(json!({
                "name": "id",
                "in": "path",
                "required": true,
                "description": format!("Primary key of the {} object", self.resource_name()),
                "schema": { "type": "string" }
            })),
            Endpoint::List if method == HttpMethod::Get => {
                parameters.extend(self.build_list_parameters());
            }
            Endpoint::List => {}
        }

        parameters
    }

    fn build_list_parameters(&self) -> Vec<Value> {
        let meta = self.resource.meta();
        let mut parameters = vec![
            json!({
                "name": "limit",
                "in": "query",
                "required": false,
                "description": "Maximum number of objects to return",
                "schema": {
                    "type": "integer",
                    "default": meta.default_limit.unwrap_or(DEFAULT_LIMIT)
                }
            }),
            json!({
                "name": "offset",
                "in": "query",
                "required": false,
                "description": "Number of objects to skip",
                "schema": { "type": "integer", "default": 0 }
            }),
        ];

        if let Some(choices) = self.ordering_choices() {
            parameters.push(json!({
                "name": "order_by",
                "in": "query",
                "required": false,
                "description": ORDER_BY_DESCRIPTION,
                "schema": { "type": "string", "enum": choices }
            }));
        }

        for filter in self.filter_params() {
            parameters.push(json!({
                "name": filter.name,
                "in": "query",
                "required": false,
                "description": format!("Filter on {} ({})", filter.field, filter.term),
                "schema": type_schema(filter.value_type)
            }));
        }

        parameters
    }

    /// `order_by` values: each ordering field, ascending and descending.
    fn ordering_choices(&self) -> Option<Vec<String>> {
        let ordering = &self.resource.meta().ordering;
        if ordering.is_empty() {
            return None;
        }
        Some(
            ordering
                .iter()
                .flat_map(|field| [field.clone(), format!("-{}", field)])
                .collect(),
        )
    }

    fn filter_params(&self) -> Vec<FilterParam> {
        let mut params = Vec::new();
        for (field, terms) in &self.resource.meta().filtering {
            let field_type = self.field_type(field);
            for term in terms {
                let name = if term == EXACT_FILTER {
                    field.clone()
                } else {
                    format!("{}__{}", field, term)
                };
                params.push(FilterParam {
                    name,
                    field: field.clone(),
                    term: term.clone(),
                    value_type: filter_value_type(field_type, term),
                });
            }
        }
        params
    }

    fn field_type(&self, name: &str) -> Option<FieldType> {
        self.resource
            .fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.field_type)
    }

    fn build_request_body(&self, method: HttpMethod) -> Option<Value> {
        let shape = match method {
            HttpMethod::Post | HttpMethod::Put => ObjectShape::Create,
            HttpMethod::Patch => ObjectShape::PartialUpdate,
            HttpMethod::Get | HttpMethod::Delete => return None,
        };

        Some(json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": object_schema(self.resource.fields(), shape)
                }
            }
        }))
    }

    fn build_responses(&self, method: HttpMethod, endpoint: Endpoint) -> Value {
        let object = object_schema(self.resource.fields(), ObjectShape::Response);
        let mut responses = Map::new();

        match (method, endpoint) {
            (HttpMethod::Get, Endpoint::List) => {
                responses.insert(
                    "200".to_string(),
                    json!({
                        "description": "OK",
                        "content": {
                            "application/json": { "schema": list_envelope(object) }
                        }
                    }),
                );
            }
            (HttpMethod::Get, Endpoint::Detail) => {
                responses.insert(
                    "200".to_string(),
                    json!({
                        "description": "OK",
                        "content": { "application/json": { "schema": object } }
                    }),
                );
            }
            (HttpMethod::Post, _) => {
                responses.insert("201".to_string(), json!({ "description": "Created" }));
            }
            (HttpMethod::Put, _) => {
                responses.insert("204".to_string(), json!({ "description": "Updated" }));
            }
            (HttpMethod::Patch, _) => {
                responses.insert("202".to_string(), json!({ "description": "Accepted" }));
            }
            (HttpMethod::Delete, _) => {
                responses.insert("204".to_string(), json!({ "description": "Deleted" }));
            }
        }

        if method.has_body() {
            responses.insert(
                "400".to_string(),
                json!({ "description": "Invalid request data" }),
            );
        }
        if endpoint == Endpoint::Detail {
            responses.insert("404".to_string(), json!({ "description": "Not found" }));
        }

        Value::Object(responses)
    }

    /// Swagger 1.1 model name: the resource name in CamelCase.
    pub fn model_name(&self) -> String {
        self.resource_name()
            .split(|c: char| c == '_' || c == '-' || c == ' ')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }

    /// Swagger 1.1 `apis` entries for the list and detail endpoints.
    pub fn build_apis(&self) -> Result<Vec<Value>, SwaggerError> {
        let meta = self.resource.meta();
        let mut apis = Vec::new();

        for (endpoint, methods) in [
            (Endpoint::List, &meta.list_allowed_methods),
            (Endpoint::Detail, &meta.detail_allowed_methods),
        ] {
            if methods.is_empty() {
                continue;
            }

            let path = match endpoint {
                Endpoint::List => self.list_endpoint()?,
                Endpoint::Detail => self.detail_endpoint()?,
            };
            let operations: Vec<Value> = methods
                .iter()
                .map(|method| self.build_legacy_operation(*method, endpoint))
                .collect();

            let mut api = Map::new();
            api.insert("path".to_string(), json!(path));
            if let Some(description) = &meta.description {
                api.insert("description".to_string(), json!(description));
            }
            api.insert("operations".to_string(), Value::Array(operations));
            apis.push(Value::Object(api));
        }

        Ok(apis)
    }

    fn build_legacy_operation(&self, method: HttpMethod, endpoint: Endpoint) -> Value {
        let model = self.model_name();
        let mut parameters = Vec::new();

        if endpoint == Endpoint::Detail {
            parameters.push(json!({
                "paramType": "path",
                "name": "id",
                "description": format!("Primary key of the {} object", self.resource_name()),
                "dataType": "string",
                "required": true,
                "allowMultiple": false
            }));
        }

        if method == HttpMethod::Get && endpoint == Endpoint::List {
            for name in ["limit", "offset"] {
                parameters.push(json!({
                    "paramType": "query",
                    "name": name,
                    "dataType": "int",
                    "required": false,
                    "allowMultiple": false
                }));
            }
            if let Some(choices) = self.ordering_choices() {
                parameters.push(json!({
                    "paramType": "query",
                    "name": "order_by",
                    "description": ORDER_BY_DESCRIPTION,
                    "dataType": "string",
                    "required": false,
                    "allowMultiple": false,
                    "allowableValues": { "valueType": "LIST", "values": choices }
                }));
            }
            for filter in self.filter_params() {
                parameters.push(json!({
                    "paramType": "query",
                    "name": filter.name,
                    "dataType": legacy_data_type(filter.value_type),
                    "required": false,
                    "allowMultiple": false
                }));
            }
        }

        if method.has_body() {
            parameters.push(json!({
                "paramType": "body",
                "name": "body",
                "dataType": model,
                "required": true,
                "allowMultiple": false
            }));
        }

        let response_class = match (method, endpoint) {
            (HttpMethod::Get, Endpoint::List) => format!("List[{}]", model),
            (HttpMethod::Delete, _) => "void".to_string(),
            _ => model.clone(),
        };

        json!({
            "httpMethod": method.as_upper(),
            "summary": self.summary(method, endpoint),
            "nickname": format!("{}_{}_{}", method.as_str(), self.resource_name(), endpoint.as_str()),
            "parameters": parameters,
            "responseClass": response_class
        })
    }

    /// Swagger 1.1 `models` for the resource.
    pub fn build_models(&self) -> Value {
        let model = self.model_name();
        let mut properties = Map::new();

        for field in self.resource.fields() {
            let mut property = Map::new();
            property.insert(
                "type".to_string(),
                json!(legacy_data_type(field.field_type)),
            );
            property.insert("required".to_string(), json!(field.is_required()));
            if let Some(help_text) = &field.help_text {
                property.insert("description".to_string(), json!(help_text));
            }
            if matches!(field.field_type, FieldType::ToMany) {
                property.insert("items".to_string(), json!({ "type": "string" }));
            }
            properties.insert(field.name.clone(), Value::Object(property));
        }

        let mut models = Map::new();
        models.insert(
            model.clone(),
            json!({ "id": model, "properties": properties }),
        );
        Value::Object(models)
    }
}

fn list_envelope(object: Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "meta": {
                "type": "object",
                "properties": {
                    "limit": { "type": "integer" },
                    "next": { "type": "string", "nullable": true },
                    "offset": { "type": "integer" },
                    "previous": { "type": "string", "nullable": true },
                    "total_count": { "type": "integer" }
                }
            },
            "objects": { "type": "array", "items": object }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_core::FieldDescriptor;
    use swagger_registry::{Api, ModelResource};

    fn entry() -> ModelResource {
        ModelResource::new("blog_entry")
            .description("Blog entries")
            .field(FieldDescriptor::new("id", FieldType::Integer).readonly())
            .field(FieldDescriptor::new("title", FieldType::String).help_text("Headline"))
            .field(FieldDescriptor::new("rating", FieldType::Integer).nullable())
            .filter("title", &["exact", "startswith"])
            .filter("rating", &["gte", "in"])
            .ordering(&["rating"])
    }

    fn mapping(resource: ModelResource, allow_missing_slash: bool) -> ResourceSwaggerMapping {
        let api = Api::new("v1");
        ResourceSwaggerMapping::new(&api, resource.into_dyn(), allow_missing_slash)
    }

    fn param_names(operation: &Value) -> Vec<String> {
        operation["parameters"]
            .as_array()
            .map(|params| {
                params
                    .iter()
                    .map(|p| p["name"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn endpoints_follow_slash_setting() {
        let m = mapping(entry(), false);
        assert_eq!(m.list_endpoint().unwrap(), "/api/v1/blog_entry/");
        assert_eq!(m.detail_endpoint().unwrap(), "/api/v1/blog_entry/{id}/");

        let m = mapping(entry(), true);
        assert_eq!(m.list_endpoint().unwrap(), "/api/v1/blog_entry");
        assert_eq!(m.detail_endpoint().unwrap(), "/api/v1/blog_entry/{id}");
    }

    fn param<'a>(operation: &'a Value, name: &str) -> &'a Value {
        operation["parameters"]
            .as_array()
            .and_then(|params| params.iter().find(|p| p["name"] == name))
            .unwrap_or_else(|| panic!("no parameter {}", name))
    }

    #[test]
    fn url_prefix_is_joined_as_a_directory() {
        for (prefix, expected) in [
            ("", "/v1/blog_entry/"),
            ("api", "/api/v1/blog_entry/"),
            ("/svc/", "/svc/v1/blog_entry/"),
        ] {
            let api = Api::new("v1").with_url_prefix(prefix);
            let m = ResourceSwaggerMapping::new(&api, entry().into_dyn(), false);

            assert_eq!(m.list_endpoint().unwrap(), expected, "prefix: {:?}", prefix);
            assert_eq!(
                m.detail_endpoint().unwrap(),
                format!("{}{{id}}/", expected),
                "prefix: {:?}",
                prefix
            );
        }
    }

    #[test]
    fn builds_list_and_detail_operations() {
        let paths = mapping(entry(), false).build_paths().unwrap();
        assert_eq!(paths.len(), 2);

        let list = &paths["/api/v1/blog_entry/"];
        assert_eq!(
            list.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["get", "post"]
        );
        assert_eq!(list["get"]["operationId"], "get_blog_entry_list");
        assert_eq!(list["get"]["tags"], json!(["blog_entry"]));
        assert_eq!(list["get"]["description"], "Blog entries");

        let detail = &paths["/api/v1/blog_entry/{id}/"];
        assert_eq!(detail.as_object().unwrap().len(), 4);
        assert_eq!(param_names(&detail["delete"]), vec!["id"]);
        assert!(detail["delete"]["responses"]["404"].is_object());
        assert!(detail["get"]["requestBody"].is_null());
    }

    #[test]
    fn list_get_has_paging_ordering_and_filters() {
        let paths = mapping(entry(), false).build_paths().unwrap();
        let get = &paths["/api/v1/blog_entry/"]["get"];

        assert_eq!(
            param_names(get),
            vec![
                "limit",
                "offset",
                "order_by",
                "rating__gte",
                "rating__in",
                "title",
                "title__startswith"
            ]
        );

        let params = get["parameters"].as_array().unwrap();
        assert_eq!(params[0]["schema"]["default"], DEFAULT_LIMIT);
        assert_eq!(params[2]["schema"]["enum"], json!(["rating", "-rating"]));
        assert_eq!(params[3]["schema"]["type"], "integer");
        assert_eq!(params[4]["schema"]["type"], "string");
    }

    #[test]
    fn write_bodies_respect_required_fields() {
        let paths = mapping(entry(), false).build_paths().unwrap();

        let post = &paths["/api/v1/blog_entry/"]["post"];
        let schema = &post["requestBody"]["content"]["application/json"]["schema"];
        assert_eq!(schema["required"], json!(["title"]));
        assert!(schema["properties"].get("id").is_none());
        assert!(post["responses"]["201"].is_object());

        let patch = &paths["/api/v1/blog_entry/{id}/"]["patch"];
        let schema = &patch["requestBody"]["content"]["application/json"]["schema"];
        assert!(schema.get("required").is_none());
        assert!(patch["responses"]["202"].is_object());
    }

    #[test]
    fn endpoints_without_methods_are_omitted() {
        let paths = mapping(entry().list_allowed_methods(&[]), false)
            .build_paths()
            .unwrap();
        assert_eq!(paths.keys().collect::<Vec<_>>(), vec!["/api/v1/blog_entry/{id}/"]);
    }

    #[test]
    fn json_doc_overrides_generated_paths() {
        let doc = r#"{"/custom/": {"get": {"summary": "hand written"}}}"#;
        let fragment = mapping(entry().doc(doc), false).path_fragment().unwrap();

        assert_eq!(
            Value::Object(fragment),
            json!({ "/custom/": { "get": { "summary": "hand written" } } })
        );
    }

    #[test]
    fn invalid_or_non_object_doc_falls_back() {
        for doc in ["Plain prose documentation.", "[1, 2]", "{not json"] {
            let fragment = mapping(entry().doc(doc), false).path_fragment().unwrap();
            assert!(fragment.contains_key("/api/v1/blog_entry/"), "doc: {}", doc);
        }
    }

    #[test]
    fn tag_uses_override_then_name() {
        let tag = mapping(entry(), false).build_global_tag();
        assert_eq!(tag, Tag::new("blog_entry", Some("Blog entries".to_string())));

        let tag = mapping(entry().tag("blog"), false).build_global_tag();
        assert_eq!(tag.name, "blog");
    }

    #[test]
    fn legacy_list_parameters_match_generated_ones() {
        let m = mapping(entry().filter("title", &["exact", "startswith", "isnull"]), false);

        let paths = m.build_paths().unwrap();
        let get = &paths["/api/v1/blog_entry/"]["get"];
        let apis = m.build_apis().unwrap();
        let legacy_get = &apis[0]["operations"][0];

        assert_eq!(param_names(legacy_get), param_names(get));

        let order_by = param(legacy_get, "order_by");
        assert_eq!(order_by["dataType"], "string");
        assert_eq!(
            order_by["allowableValues"]["values"],
            json!(["rating", "-rating"])
        );

        assert_eq!(param(get, "title__isnull")["schema"]["type"], "boolean");
        assert_eq!(param(legacy_get, "title__isnull")["dataType"], "boolean");
        assert_eq!(param(legacy_get, "rating__gte")["dataType"], "int");
        assert_eq!(param(legacy_get, "rating__in")["dataType"], "string");
    }

    #[test]
    fn legacy_apis_and_models() {
        let m = mapping(entry(), false);
        assert_eq!(m.model_name(), "BlogEntry");

        let apis = m.build_apis().unwrap();
        assert_eq!(apis.len(), 2);
        assert_eq!(apis[0]["path"], "/api/v1/blog_entry/");
        assert_eq!(apis[0]["operations"][0]["httpMethod"], "GET");
        assert_eq!(apis[0]["operations"][0]["responseClass"], "List[BlogEntry]");
        assert_eq!(apis[0]["operations"][1]["parameters"][0]["paramType"], "body");
        assert_eq!(apis[1]["operations"][3]["responseClass"], "void");

        let models = m.build_models();
        let properties = &models["BlogEntry"]["properties"];
        assert_eq!(models["BlogEntry"]["id"], "BlogEntry");
        assert_eq!(properties["id"]["type"], "int");
        assert_eq!(properties["title"]["required"], true);
        assert_eq!(properties["rating"]["required"], false);
    }
}
