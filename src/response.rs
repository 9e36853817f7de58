//! Wire shape for failed requests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub description: String,
}

impl ErrorBody {
    pub fn new(error_code: &str, description: String) -> Self {
        Self {
            error_code: error_code.to_string(),
            description,
        }
    }
}
