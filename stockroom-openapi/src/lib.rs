//! OpenAPI 3.1 document generation from hand-declared route metadata, plus
//! the `/openapi.json`, `/docs` (Swagger UI) and `/redoc` endpoints.
//!
//! Request and response body schemas come from `schemars`; the two error
//! bodies rendered by `stockroom-core` are published as the `Error` and
//! `ValidationError` components.

mod builder;
mod handlers;
mod route;

pub use builder::{build_spec, OpenApiConfig};
pub use handlers::{openapi_routes, DOCS_PATH, REDOC_PATH, SPEC_PATH};
pub use route::{ParamInfo, ParamLocation, ResponseBody, ResponseInfo, RouteInfo, TypeSchema};
