use super::{Graph, GraphInfo};
use crate::{model::Device, render::Fields};

/// Remaining spare capacity against the device's own threshold
pub struct SpareGraph;

impl Graph for SpareGraph {
    fn info(&self) -> GraphInfo {
        GraphInfo {
            multigraph: "nvme_available_spare",
            title: "NVMe health",
            category: "disk",
            info: "The graph shows nvme disks available spare blocks.",
            args: "--base 1000 --lower-limit 0 --upper-limit 105",
            vlabel: "Spare space left, %",
        }
    }

    fn device_config(&self, key: &str, device: &Device, fields: &mut Fields) {
        fields.push_field(key, "label", &device.system_name);
        // Lower bound: alert once spare drops below the threshold.
        fields.push_field(key, "critical", format!("{}:", device.metrics.spare_thresh));
    }

    fn device_value(&self, device: &Device) -> String {
        device.metrics.avail_spare.to_string()
    }
}
