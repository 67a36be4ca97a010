use schemars::JsonSchema;
use serde_json::Value;

/// A named JSON Schema produced by `schemars`.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    pub name: String,
    pub schema: Value,
}

impl TypeSchema {
    pub fn of<T: JsonSchema>() -> Self {
        Self {
            name: T::schema_name().into_owned(),
            schema: schemars::schema_for!(T).to_value(),
        }
    }
}

/// Where a parameter is located in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParamInfo {
    pub name: String,
    pub location: ParamLocation,
    /// JSON Schema primitive type (`integer`, `string`, ...).
    pub param_type: String,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub enum ResponseBody {
    Empty,
    Json(TypeSchema),
    JsonList(TypeSchema),
    /// `{"error": "..."}`
    Error,
    /// `{"error": "Validation failed", "details": [...]}`
    ValidationError,
}

#[derive(Debug, Clone)]
pub struct ResponseInfo {
    pub status: u16,
    pub description: String,
    pub body: ResponseBody,
}

/// Metadata for one operation of the generated document.
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub method: String,
    pub path: String,
    pub operation_id: String,
    pub summary: Option<String>,
    pub tag: Option<String>,
    pub params: Vec<ParamInfo>,
    pub request_body: Option<TypeSchema>,
    pub responses: Vec<ResponseInfo>,
}

impl RouteInfo {
    pub fn new(method: &str, path: impl Into<String>, operation_id: &str) -> Self {
        Self {
            method: method.to_uppercase(),
            path: path.into(),
            operation_id: operation_id.to_string(),
            summary: None,
            tag: None,
            params: Vec::new(),
            request_body: None,
            responses: Vec::new(),
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn path_param(self, name: &str, param_type: &str) -> Self {
        self.param(name, ParamLocation::Path, param_type, true)
    }

    pub fn query_param(self, name: &str, param_type: &str, required: bool) -> Self {
        self.param(name, ParamLocation::Query, param_type, required)
    }

    fn param(mut self, name: &str, location: ParamLocation, param_type: &str, required: bool) -> Self {
        self.params.push(ParamInfo {
            name: name.to_string(),
            location,
            param_type: param_type.to_string(),
            required,
        });
        self
    }

    /// JSON request body of type `T`.
    pub fn body<T: JsonSchema>(mut self) -> Self {
        self.request_body = Some(TypeSchema::of::<T>());
        self
    }

    pub fn returns<T: JsonSchema>(self, status: u16, description: &str) -> Self {
        self.response(status, description, ResponseBody::Json(TypeSchema::of::<T>()))
    }

    pub fn returns_list<T: JsonSchema>(self, status: u16, description: &str) -> Self {
        self.response(status, description, ResponseBody::JsonList(TypeSchema::of::<T>()))
    }

    pub fn no_content(self, description: &str) -> Self {
        self.response(204, description, ResponseBody::Empty)
    }

    pub fn error(self, status: u16, description: &str) -> Self {
        self.response(status, description, ResponseBody::Error)
    }

    pub fn validation_error(self) -> Self {
        self.response(422, "Validation error", ResponseBody::ValidationError)
    }

    fn response(mut self, status: u16, description: &str, body: ResponseBody) -> Self {
        self.responses.push(ResponseInfo {
            status,
            description: description.to_string(),
            body,
        });
        self
    }
}
