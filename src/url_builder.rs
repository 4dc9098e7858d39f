use url::Url;
use url::form_urlencoded;

use crate::error::{Error, Result};

pub const BATCH_PATH: &str = "batch";
pub const REQUESTS_PARAM: &str = "requests";

/// A request ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl CompiledRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_string(&self) -> String {
        encode_query(&self.params)
    }

    /// Absolute URL including the encoded query. Fails for batch-mode leaves,
    /// whose url is a bare path.
    pub fn full_url(&self) -> Result<Url> {
        Ok(Url::parse_with_params(&self.url, &self.params)?)
    }

    /// `path?query` form used for entries of a batch request.
    pub fn to_batch_entry(&self) -> String {
        let query = encode_component_query(&self.params);
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }
}

/// `root` must end with `/` (a bare `/` for batch entries).
pub fn leaf_url(root: &str, endpoint: &str, action: &str) -> Result<String> {
    let endpoint = endpoint.trim_matches('/');
    if endpoint.is_empty() {
        return Err(Error::NoEndpoint);
    }
    if action.is_empty() {
        return Err(Error::NoAction);
    }
    Ok(format!("{root}{endpoint}/{action}"))
}

pub fn batch_url(root: &str) -> String {
    format!("{root}{BATCH_PATH}")
}

pub fn join_batch_entries(entries: &[String]) -> String {
    entries.join(",")
}

/// `application/x-www-form-urlencoded` query, pairs kept in order.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Query for a batch entry: like [`encode_query`] but a space becomes `%20`,
/// since the entry is embedded verbatim in the outer `requests` value.
pub fn encode_component_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(s: &str) -> String {
    // byte_serialize escapes a literal '+' as %2B, so any '+' left is a space.
    form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(xs: &[(&str, &str)]) -> Vec<(String, String)> {
        xs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn leaf_url_requires_endpoint_then_action() {
        assert!(matches!(leaf_url("/", "", ""), Err(Error::NoEndpoint)));
        assert!(matches!(leaf_url("/", "observations", ""), Err(Error::NoAction)));
        assert!(matches!(leaf_url("/", "/", "closest"), Err(Error::NoEndpoint)));
        assert_eq!(leaf_url("/", "/places/", "search").unwrap(), "/places/search");
        assert_eq!(
            leaf_url("/", "observations/summary", "closest").unwrap(),
            "/observations/summary/closest"
        );
        assert_eq!(
            leaf_url("https://api.aerisapi.com/", "forecasts", "closest").unwrap(),
            "https://api.aerisapi.com/forecasts/closest"
        );
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            encode_query(&pairs(&[
                ("p", "-45.039948,168.695312"),
                ("filter", "allstations,hasprecip"),
                ("query", "qcmin:10"),
            ])),
            "p=-45.039948%2C168.695312&filter=allstations%2Chasprecip&query=qcmin%3A10"
        );
    }

    #[test]
    fn batch_entry_percent_encodes_spaces() {
        let req = CompiledRequest {
            url: "/places/search".into(),
            params: pairs(&[("query", "name:new york"), ("from", "+2days")]),
        };
        assert_eq!(
            req.to_batch_entry(),
            "/places/search?query=name%3Anew%20york&from=%2B2days"
        );
        // The outer query keeps form encoding.
        assert_eq!(req.query_string(), "query=name%3Anew+york&from=%2B2days");
    }

    #[test]
    fn batch_entry_omits_empty_query() {
        let req = CompiledRequest { url: "/observations/KNUQ".into(), params: vec![] };
        assert_eq!(req.to_batch_entry(), "/observations/KNUQ");

        let req = CompiledRequest {
            url: "/forecasts/closest".into(),
            params: pairs(&[("limit", "7"), ("filter", "day")]),
        };
        assert_eq!(req.to_batch_entry(), "/forecasts/closest?limit=7&filter=day");
    }

    #[test]
    fn full_url_appends_query() {
        let req = CompiledRequest {
            url: "https://api.aerisapi.com/batch".into(),
            params: pairs(&[("requests", "/a/b?limit=1,/c/d")]),
        };
        assert_eq!(
            req.full_url().unwrap().as_str(),
            "https://api.aerisapi.com/batch?requests=%2Fa%2Fb%3Flimit%3D1%2C%2Fc%2Fd"
        );
        assert_eq!(req.param("requests"), Some("/a/b?limit=1,/c/d"));
        assert_eq!(req.param("limit"), None);
    }

    #[test]
    fn batch_url_appends_path() {
        assert_eq!(batch_url("https://api.aerisapi.com/"), "https://api.aerisapi.com/batch");
        assert_eq!(join_batch_entries(&["/a/b".into(), "/c/d".into()]), "/a/b,/c/d");
    }
}
