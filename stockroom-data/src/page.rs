use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 100;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Offset/limit window over a table in primary-key order, extractable from
/// `?skip=&limit=` query params.
///
/// Both values are signed so that a negative input reaches validation instead
/// of failing deserialization with a less useful message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, garde::Validate)]
pub struct PageRequest {
    #[serde(default)]
    #[garde(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[garde(range(min = 0))]
    pub limit: i64,
}

impl PageRequest {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
