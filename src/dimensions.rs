use crate::error::Error;

/// Name/value tag attached to a metric
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricDimension {
    pub name: String,
    pub value: String,
}

/// Parse `Host=myhost,MetricSource=sesame-seed` into ordered dimensions.
///
/// Each comma separated token is split on its first `=`, so values may
/// contain further `=` characters. No escaping is supported. Blank input
/// gives an empty set.
pub fn parse_dimensions(input: &str) -> Result<Vec<MetricDimension>, Error> {
    if input.trim().is_empty() {
        return Ok(vec![]);
    }
    input
        .split(',')
        .map(|token| match token.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(MetricDimension {
                name: name.to_string(),
                value: value.to_string(),
            }),
            _ => Err(Error::InvalidDimension {
                token: token.to_string(),
            }),
        })
        .collect()
}
