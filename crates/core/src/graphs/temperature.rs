use super::{Graph, GraphInfo};
use crate::{
    model::{ktoc, Device},
    render::Fields,
};

/// Composite temperature in Celsius, thresholds from the controller
pub struct TemperatureGraph {
    fallback_warning: i64,
    fallback_critical: i64,
}

impl TemperatureGraph {
    pub fn new(fallback_warning: i64, fallback_critical: i64) -> Self {
        Self {
            fallback_warning,
            fallback_critical,
        }
    }

    /// Controller threshold in Celsius, or the fallback when the controller reports 0
    fn threshold(kelvin: i64, fallback: i64) -> i64 {
        if kelvin > 0 {
            ktoc(kelvin)
        } else {
            fallback
        }
    }
}

impl Graph for TemperatureGraph {
    fn info(&self) -> GraphInfo {
        GraphInfo {
            multigraph: "nvme_temp",
            title: "NVMe disks temperatures",
            category: "sensors",
            info: "The graph shows nvme disks temperature.",
            args: "--base 1000",
            vlabel: "Celsius",
        }
    }

    fn device_config(&self, key: &str, device: &Device, fields: &mut Fields) {
        let warning = Self::threshold(device.controller.wctemp, self.fallback_warning);
        let critical = Self::threshold(device.controller.cctemp, self.fallback_critical);

        fields.push_field(key, "label", &device.system_name);
        fields.push_field(key, "warning", format!(":{}", warning));
        fields.push_field(key, "critical", format!(":{}", critical));
    }

    fn device_value(&self, device: &Device) -> String {
        ktoc(device.metrics.temperature).to_string()
    }
}
