use crate::dimensions::MetricDimension;

use std::fmt;

/// One data point submitted to CloudWatch
#[derive(Clone, PartialEq)]
pub struct MetricPoint {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<MetricDimension>,
    pub value: f64,
}

impl fmt::Debug for MetricPoint {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self
            .dimensions
            .iter()
            .map(|d| format!("{}={}", d.name, d.value))
            .collect::<Vec<String>>()
            .join(",");
        write!(
            fmt,
            "MetricPoint {{ {}/{} [{}] value {:.3} }}",
            self.namespace, self.metric_name, dims, self.value
        )?;
        Ok(())
    }
}
