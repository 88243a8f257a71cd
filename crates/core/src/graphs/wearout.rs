use super::{Graph, GraphInfo};
use crate::{model::Device, render::Fields};

/// Percentage of rated endurance used
pub struct WearoutGraph {
    critical: u64,
}

impl WearoutGraph {
    pub fn new(critical: u64) -> Self {
        Self { critical }
    }
}

impl Graph for WearoutGraph {
    fn info(&self) -> GraphInfo {
        GraphInfo {
            multigraph: "nvme_wearout",
            title: "NVMe disks wearout",
            category: "disk",
            info: "The graph shows nvme disks wearout (percentage_used)",
            args: "--base 1000 --lower-limit 0 --upper-limit 105",
            vlabel: "%",
        }
    }

    fn device_config(&self, key: &str, device: &Device, fields: &mut Fields) {
        fields.push_field(key, "label", &device.system_name);
        fields.push_field(key, "critical", format!(":{}", self.critical));
    }

    fn device_value(&self, device: &Device) -> String {
        device.metrics.percent_used.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_config() {
        let devices = fixtures::device_map(&["/dev/nvme0n1"]);
        let config = WearoutGraph::new(95).config(&devices);
        assert_eq!(config.get("_dev_nvme0n1.critical"), Some(":95"));
        assert_eq!(config.get("graph_vlabel"), Some("%"));
    }

    #[test]
    fn test_value() {
        let devices = fixtures::device_map(&["/dev/nvme0n1"]);
        let values = WearoutGraph::new(95).values(&devices);
        assert_eq!(values.get("_dev_nvme0n1.value"), Some("12"));
    }
}
