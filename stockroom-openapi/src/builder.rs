use serde_json::{json, Map, Value};

use crate::route::{ResponseBody, RouteInfo, TypeSchema};

const ERROR_SCHEMA: &str = "Error";
const VALIDATION_ERROR_SCHEMA: &str = "ValidationError";

/// Configuration for the generated OpenAPI document.
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub docs_ui: bool,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            docs_ui: false,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_docs_ui(mut self, enabled: bool) -> Self {
        self.docs_ui = enabled;
        self
    }
}

/// Rewrite schemars `#/$defs/X` references to `#/components/schemas/X`.
fn sanitize_schema(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(reference)) = obj.get_mut("$ref") {
                if reference.starts_with("#/$defs/") {
                    *reference = reference.replace("#/$defs/", "#/components/schemas/");
                }
            }
            for (_, v) in obj.iter_mut() {
                sanitize_schema(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize_schema),
        _ => {}
    }
}

/// Insert a root schema under its name, promoting its `$defs` to siblings.
fn insert_schema(schemas: &mut Map<String, Value>, type_schema: &TypeSchema) {
    if schemas.contains_key(&type_schema.name) {
        return;
    }
    let mut schema = type_schema.schema.clone();
    let mut defs = Map::new();
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        if let Some(Value::Object(found)) = obj.remove("$defs") {
            defs = found;
        }
    }
    sanitize_schema(&mut schema);
    schemas.insert(type_schema.name.clone(), schema);

    for (name, mut def) in defs {
        sanitize_schema(&mut def);
        schemas.entry(name).or_insert(def);
    }
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

/// Schemas of the error bodies rendered by `HttpError`.
fn error_schemas(schemas: &mut Map<String, Value>) {
    schemas.insert(
        ERROR_SCHEMA.into(),
        json!({
            "type": "object",
            "required": ["error"],
            "properties": { "error": { "type": "string" } }
        }),
    );
    schemas.insert(
        VALIDATION_ERROR_SCHEMA.into(),
        json!({
            "type": "object",
            "required": ["error", "details"],
            "properties": {
                "error": { "type": "string" },
                "details": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["field", "message", "code"],
                        "properties": {
                            "field": { "type": "string" },
                            "message": { "type": "string" },
                            "code": { "type": "string" }
                        }
                    }
                }
            }
        }),
    );
}

/// Build an OpenAPI 3.1.0 document from config and route metadata.
pub fn build_spec(config: &OpenApiConfig, routes: &[RouteInfo]) -> Value {
    let mut paths: Map<String, Value> = Map::new();
    let mut schemas: Map<String, Value> = Map::new();
    error_schemas(&mut schemas);

    for route in routes {
        let mut operation: Map<String, Value> = Map::new();
        operation.insert("operationId".into(), json!(route.operation_id));
        if let Some(tag) = &route.tag {
            operation.insert("tags".into(), json!([tag]));
        }
        if let Some(summary) = &route.summary {
            operation.insert("summary".into(), json!(summary));
        }

        if !route.params.is_empty() {
            let params: Vec<Value> = route
                .params
                .iter()
                .map(|p| {
                    json!({
                        "name": p.name,
                        "in": p.location.as_str(),
                        "required": p.required,
                        "schema": { "type": p.param_type }
                    })
                })
                .collect();
            operation.insert("parameters".into(), json!(params));
        }

        if let Some(body) = &route.request_body {
            insert_schema(&mut schemas, body);
            operation.insert(
                "requestBody".into(),
                json!({ "required": true, "content": json_content(schema_ref(&body.name)) }),
            );
        }

        let mut responses: Map<String, Value> = Map::new();
        for response in &route.responses {
            let mut entry = Map::new();
            entry.insert("description".into(), json!(response.description));
            let content = match &response.body {
                ResponseBody::Empty => None,
                ResponseBody::Json(ty) => {
                    insert_schema(&mut schemas, ty);
                    Some(schema_ref(&ty.name))
                }
                ResponseBody::JsonList(ty) => {
                    insert_schema(&mut schemas, ty);
                    Some(json!({ "type": "array", "items": schema_ref(&ty.name) }))
                }
                ResponseBody::Error => Some(schema_ref(ERROR_SCHEMA)),
                ResponseBody::ValidationError => Some(schema_ref(VALIDATION_ERROR_SCHEMA)),
            };
            if let Some(schema) = content {
                entry.insert("content".into(), json_content(schema));
            }
            responses.insert(response.status.to_string(), Value::Object(entry));
        }
        operation.insert("responses".into(), Value::Object(responses));

        let path_entry = paths.entry(route.path.clone()).or_insert_with(|| json!({}));
        if let Some(obj) = path_entry.as_object_mut() {
            obj.insert(route.method.to_lowercase(), Value::Object(operation));
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(desc) = &config.description {
        info.insert("description".into(), json!(desc));
    }

    json!({
        "openapi": "3.1.0",
        "info": info,
        "paths": paths,
        "components": { "schemas": schemas }
    })
}
