use super::{Graph, GraphInfo};
use crate::{model::Device, render::Fields};

const MEDIA_ERRORS_INFO: &str = "Indicates the number of unrecovered data integrity \
errors detected by the controller. Errors such as uncorrectable ECC, CRC \
checksum failure, or LBA tag mismatch are included in this field.";

/// Unrecovered media and data integrity errors
pub struct ErrorsGraph;

impl Graph for ErrorsGraph {
    fn info(&self) -> GraphInfo {
        GraphInfo {
            multigraph: "nvme_errors",
            title: "NVMe media errors",
            category: "disk",
            info: "The graph shows nvme disks errors (media_errors)",
            args: "--base 1000",
            vlabel: "media_errors",
        }
    }

    fn device_config(&self, key: &str, device: &Device, fields: &mut Fields) {
        fields.push_field(key, "label", &device.system_name);
        fields.push_field(key, "type", "DERIVE");
        fields.push_field(key, "min", 0);
        fields.push_field(key, "info", MEDIA_ERRORS_INFO);
    }

    fn device_value(&self, device: &Device) -> String {
        device.metrics.media_errors.to_string()
    }
}
