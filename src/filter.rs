use std::fmt;
use std::str::FromStr;

use crate::params::ParamValue;

/// Station filters accepted by the observation endpoints.
///
/// `filter` itself takes any string (forecast endpoints use values like `day`
/// or `1hr`); this enum is the typed way to name the station filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    AllStations,
    Official,
    Metar,
    Pws,
    Mesonet,
    HasPrecip,
}

impl Filter {
    pub const ALL: [Filter; 6] = [
        Filter::AllStations,
        Filter::Official,
        Filter::Metar,
        Filter::Pws,
        Filter::Mesonet,
        Filter::HasPrecip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::AllStations => "allstations",
            Filter::Official => "official",
            Filter::Metar => "metar",
            Filter::Pws => "pws",
            Filter::Mesonet => "mesonet",
            Filter::HasPrecip => "hasprecip",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

impl From<Filter> for ParamValue {
    fn from(value: Filter) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

impl<const N: usize> From<[Filter; N]> for ParamValue {
    fn from(value: [Filter; N]) -> Self {
        ParamValue::from(value.as_slice())
    }
}

impl From<&[Filter]> for ParamValue {
    fn from(value: &[Filter]) -> Self {
        let joined: Vec<&str> = value.iter().map(|f| f.as_str()).collect();
        ParamValue::Str(joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_filters() {
        assert_eq!("allstations".parse::<Filter>(), Ok(Filter::AllStations));
        assert_eq!(" hasprecip".parse::<Filter>(), Ok(Filter::HasPrecip));
        assert_eq!(
            "1hr".parse::<Filter>(),
            Err(UnknownFilter("1hr".to_string()))
        );
    }

    #[test]
    fn composite_filters_join_with_commas() {
        assert_eq!(
            ParamValue::from([Filter::AllStations, Filter::HasPrecip]),
            ParamValue::from("allstations,hasprecip")
        );
        assert_eq!(ParamValue::from(Filter::Metar), ParamValue::from("metar"));
    }
}
