use prometheus_client::{
    collector::Collector,
    encoding::{DescriptorEncoder, EncodeMetric},
    metrics::{gauge::ConstGauge, MetricType},
    registry::Registry,
};

use super::SharedIndex;

#[derive(Debug)]
struct Instrumented(SharedIndex);

pub fn register(reg: &mut Registry, index: SharedIndex) {
    reg.register_collector(Box::new(Instrumented(index)));
}

impl Collector for Instrumented {
    fn encode(&self, mut encoder: DescriptorEncoder<'_>) -> Result<(), std::fmt::Error> {
        let this = self.0.read();

        let mut grants_encoder = encoder.encode_descriptor(
            "referencegrant_index_size",
            "The number of ReferenceGrants in index",
            None,
            MetricType::Gauge,
        )?;
        for (ns, index) in &this.namespaces {
            let labels = [("namespace", ns.as_str())];
            let grants = ConstGauge::new(index.grants.len() as u32);
            let grants_encoder = grants_encoder.encode_family(&labels)?;
            grants.encode(grants_encoder)?;
        }

        Ok(())
    }
}
