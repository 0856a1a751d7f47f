use std::collections::HashMap;

use url::form_urlencoded;

use crate::plugin::host_fns::RequestInput;

/// Query parameters of an admin panel request. Later duplicates win.
#[derive(Debug, Default, Clone)]
pub struct AdminRequest {
    params: HashMap<String, String>,
}

impl AdminRequest {
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        Self {
            params: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }
}

impl RequestInput for AdminRequest {
    fn get_input(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
