use super::{Graph, GraphInfo};
use crate::{model::Device, render::Fields};

/// Thermal management temperature 1 transition count
pub struct ThrottleGraph;

impl Graph for ThrottleGraph {
    fn info(&self) -> GraphInfo {
        GraphInfo {
            // Misspelt id kept so existing munin data keeps matching.
            multigraph: "nvme_throtlling",
            title: "NVMe disks throttling",
            category: "disk",
            info: "The graph shows nvme disks throttling event count.",
            args: "--base 1000 --lower-limit 0",
            vlabel: "Thermal throttle events",
        }
    }

    fn device_config(&self, key: &str, device: &Device, fields: &mut Fields) {
        fields.push_field(key, "label", &device.system_name);
        fields.push_field(key, "type", "DERIVE");
        fields.push_field(key, "min", 0);
    }

    fn device_value(&self, device: &Device) -> String {
        device.metrics.thm_temp1_trans_count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_counter_config() {
        let devices = fixtures::device_map(&["/dev/nvme0n1"]);
        let config = ThrottleGraph.config(&devices);

        assert_eq!(config.get("_dev_nvme0n1.type"), Some("DERIVE"));
        assert_eq!(config.get("_dev_nvme0n1.min"), Some("0"));
        assert_eq!(config.get("graph_args"), Some("--base 1000 --lower-limit 0"));
    }

    #[test]
    fn test_value() {
        let devices = fixtures::device_map(&["/dev/nvme0n1"]);
        assert_eq!(
            ThrottleGraph.report(&devices, crate::Mode::Fetch),
            "multigraph nvme_throtlling\n_dev_nvme0n1.value 3\n"
        );
    }
}
