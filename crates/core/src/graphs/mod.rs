pub mod errors;
pub mod spare;
pub mod temperature;
pub mod throttle;
pub mod wearout;

pub use errors::ErrorsGraph;
pub use spare::SpareGraph;
pub use temperature::TemperatureGraph;
pub use throttle::ThrottleGraph;
pub use wearout::WearoutGraph;

use crate::{
    config::Config,
    model::{Device, DeviceMap, Mode},
    render::{render, Fields},
};

/// Graph-level munin attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphInfo {
    pub multigraph: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub info: &'static str,
    pub args: &'static str,
    pub vlabel: &'static str,
}

/// A munin multigraph fed from the enumerated devices
pub trait Graph {
    fn info(&self) -> GraphInfo;

    /// Per-device configuration fields, label first
    fn device_config(&self, key: &str, device: &Device, fields: &mut Fields);

    /// Current reading for `device`
    fn device_value(&self, device: &Device) -> String;

    fn config(&self, devices: &DeviceMap) -> Fields {
        let info = self.info();
        let mut fields = Fields::new();
        fields.push("graph_title", info.title);
        fields.push("graph_category", info.category);
        fields.push("graph_info", info.info);
        fields.push("graph_args", info.args);
        fields.push("graph_vlabel", info.vlabel);

        for (key, device) in devices.iter() {
            self.device_config(key, device, &mut fields);
        }
        fields
    }

    fn values(&self, devices: &DeviceMap) -> Fields {
        let mut fields = Fields::new();
        for (key, device) in devices.iter() {
            fields.push_field(key, "value", self.device_value(device));
        }
        fields
    }

    /// Render the config or the values section for this graph.
    fn report(&self, devices: &DeviceMap, mode: Mode) -> String {
        let fields = match mode {
            Mode::Config => self.config(devices),
            Mode::Fetch | Mode::Autoconf => self.values(devices),
        };
        render(self.info().multigraph, &fields)
    }
}

/// All graphs, in output order.
pub fn all_graphs(config: &Config) -> Vec<Box<dyn Graph>> {
    vec![
        Box::new(TemperatureGraph::new(
            config.warning_celsius,
            config.critical_celsius,
        )),
        Box::new(ThrottleGraph),
        Box::new(WearoutGraph::new(config.wearout_critical)),
        Box::new(ErrorsGraph),
        Box::new(SpareGraph),
    ]
}
