use std::fmt;

/// Value type for a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Null,
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<(f64, f64)> for ParamValue {
    /// A `(lat, lon)` pair, rendered the way the API expects places: `lat,lon`.
    fn from((lat, lon): (f64, f64)) -> Self {
        ParamValue::Str(format!("{lat},{lon}"))
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::Str(value.join(","))
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::Str(value.join(","))
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(value: [&str; N]) -> Self {
        ParamValue::Str(value.join(","))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Null => Ok(()),
        }
    }
}

impl ParamValue {
    /// Parse a user-provided string into a [`ParamValue`].
    ///
    /// Integers become `Int`, everything else stays a string. Comma-joined
    /// values such as places (`"-45.03,168.69"`) or composite filters are kept
    /// as one string since the API takes them verbatim.
    pub fn parse_auto(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() {
            return ParamValue::Str(String::new());
        }
        match t.parse::<i64>() {
            Ok(v) => ParamValue::Int(v),
            Err(_) => ParamValue::Str(t.to_string()),
        }
    }

    /// Empty string, zero, NaN and null are pruned from outbound requests.
    pub fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.is_empty(),
            ParamValue::Int(i) => *i == 0,
            ParamValue::Float(x) => *x == 0.0 || x.is_nan(),
            ParamValue::Null => true,
        }
    }
}

/// Parameters the API documents for every endpoint, in outbound order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Limit,
    Place,
    Radius,
    Filter,
    Query,
    Sort,
    Skip,
    From,
    To,
    PLimit,
    PSort,
    PSkip,
    Callback,
    Fields,
}

impl ParamKey {
    pub const ALL: [ParamKey; 14] = [
        ParamKey::Limit,
        ParamKey::Place,
        ParamKey::Radius,
        ParamKey::Filter,
        ParamKey::Query,
        ParamKey::Sort,
        ParamKey::Skip,
        ParamKey::From,
        ParamKey::To,
        ParamKey::PLimit,
        ParamKey::PSort,
        ParamKey::PSkip,
        ParamKey::Callback,
        ParamKey::Fields,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::Limit => "limit",
            ParamKey::Place => "p",
            ParamKey::Radius => "radius",
            ParamKey::Filter => "filter",
            ParamKey::Query => "query",
            ParamKey::Sort => "sort",
            ParamKey::Skip => "skip",
            ParamKey::From => "from",
            ParamKey::To => "to",
            ParamKey::PLimit => "plimit",
            ParamKey::PSort => "psort",
            ParamKey::PSkip => "pskip",
            ParamKey::Callback => "callback",
            ParamKey::Fields => "fields",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn default_value(self) -> ParamValue {
        match self {
            ParamKey::Limit | ParamKey::Skip | ParamKey::PSkip => ParamValue::Int(0),
            ParamKey::Callback => ParamValue::Null,
            _ => ParamValue::Str(String::new()),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered parameter set.
///
/// Recognized keys are always present (holding their defaults until set) so the
/// outbound query string keeps a stable order; other keys follow in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            entries: ParamKey::ALL
                .into_iter()
                .map(|k| (k.as_str().to_string(), k.default_value()))
                .collect(),
        }
    }
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Overwrite matching keys with `other`'s values, keeping everything else.
    pub fn merge<K, V>(&mut self, other: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        for (k, v) in other {
            self.set(k, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rendered non-falsy pairs, in order.
    pub fn outbound(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_falsy())
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_auto_int_and_string() {
        assert_eq!(ParamValue::parse_auto("25"), ParamValue::Int(25));
        assert_eq!(ParamValue::parse_auto(" day "), ParamValue::Str("day".to_string()));
        assert_eq!(
            ParamValue::parse_auto("-45.039948,168.695312"),
            ParamValue::Str("-45.039948,168.695312".to_string())
        );
    }

    #[test]
    fn falsy_values() {
        assert!(ParamValue::from("").is_falsy());
        assert!(ParamValue::from(0).is_falsy());
        assert!(ParamValue::from(0.0).is_falsy());
        assert!(ParamValue::Null.is_falsy());
        assert!(ParamValue::from(None::<&str>).is_falsy());
        assert!(!ParamValue::from("0").is_falsy());
        assert!(!ParamValue::from(-1).is_falsy());
    }

    #[test]
    fn defaults_are_all_pruned() {
        let p = Params::new();
        assert_eq!(p.iter().count(), ParamKey::ALL.len());
        assert!(p.outbound().is_empty());
        assert_eq!(p.get("limit"), Some(&ParamValue::Int(0)));
        assert_eq!(p.get("callback"), Some(&ParamValue::Null));
    }

    #[test]
    fn outbound_keeps_default_key_order() {
        let mut p = Params::new();
        p.set("from", "-1hour");
        p.set("filter", "allstations");
        p.set("p", "94024");
        p.set("limit", 1);
        let keys: Vec<String> = p.outbound().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["limit", "p", "filter", "from"]);
    }

    #[test]
    fn unknown_keys_append_after_recognized_keys() {
        let mut p = Params::new();
        p.set("format", "json");
        p.set("limit", 3);
        assert_eq!(
            p.outbound(),
            vec![
                ("limit".to_string(), "3".to_string()),
                ("format".to_string(), "json".to_string())
            ]
        );
        assert_eq!(p.get("format"), Some(&ParamValue::from("json")));
    }

    #[test]
    fn merge_overwrites_matching_keys_only() {
        let mut p = Params::new();
        p.merge([("limit", ParamValue::from(25)), ("filter", "allstations,1hr".into())]);
        p.merge([("limit", ParamValue::from(169)), ("from", "-1hour".into())]);
        assert_eq!(p.get("limit"), Some(&ParamValue::Int(169)));
        assert_eq!(p.get("filter"), Some(&ParamValue::from("allstations,1hr")));
        assert_eq!(p.get("from"), Some(&ParamValue::from("-1hour")));
    }

    #[test]
    fn key_lookup_by_name() {
        assert_eq!(ParamKey::from_name("p"), Some(ParamKey::Place));
        assert_eq!(ParamKey::from_name("pskip"), Some(ParamKey::PSkip));
        assert_eq!(ParamKey::from_name("place"), None);
    }

    #[test]
    fn coordinates_render_as_place() {
        assert_eq!(
            ParamValue::from((-45.039948, 168.695312)).to_string(),
            "-45.039948,168.695312"
        );
    }
}
