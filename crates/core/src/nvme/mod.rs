pub mod command;

pub use command::CommandRunner;

use crate::error::{CoreError, Result};
use crate::model::{Device, DeviceList, DeviceMap, IdCtrl, ListedDevice, SmartLog};
use crate::sanitize::clean_fieldname;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

/// Access to nvme-cli
pub trait NvmeCli {
    /// Whether the nvme-cli binary can be found
    fn is_available(&self) -> bool;

    /// Invoke nvme-cli with `args` and parse its stdout as JSON.
    ///
    /// `append_json_flag` adds the configured JSON output flag. Vendor
    /// extensions that spell the flag differently pass `false` and supply
    /// their own flag in `args`.
    fn run(&self, args: &[&str], append_json_flag: bool) -> Result<Value>;

    /// `nvme list`
    fn list_devices(&self) -> Result<Vec<ListedDevice>> {
        let list: DeviceList = typed("list", self.run(&["list"], true)?)?;
        Ok(list.devices)
    }

    /// `nvme smart-log <device>`
    fn smart_log(&self, device_path: &str) -> Result<SmartLog> {
        typed("smart-log", self.run(&["smart-log", device_path], true)?)
    }

    /// `nvme id-ctrl <device>`
    fn id_ctrl(&self, device_path: &str) -> Result<IdCtrl> {
        typed("id-ctrl", self.run(&["id-ctrl", device_path], true)?)
    }
}

fn typed<T: DeserializeOwned>(command: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| CoreError::malformed(command, e))
}

/// Enumerate devices and fetch their health log and controller identity.
///
/// Any failing invocation aborts the whole enumeration.
pub fn get_devices(cli: &dyn NvmeCli) -> Result<DeviceMap> {
    let mut devices = DeviceMap::new();

    for listed in cli.list_devices()? {
        let metrics = cli.smart_log(&listed.device_path)?;
        let controller = cli.id_ctrl(&listed.device_path)?;
        let key = clean_fieldname(&listed.device_path);

        if devices.get(&key).is_some() {
            warn!(key = %key, path = %listed.device_path, "field name collision, keeping the later device");
        }

        let system_name = listed.device_path.replace("/dev/", "");
        devices.insert(
            key,
            Device {
                device_path: listed.device_path,
                system_name,
                model_name: listed.model_number,
                serial_number: listed.serial_number,
                metrics,
                controller,
            },
        );
    }

    info!(count = devices.len(), "enumerated nvme devices");
    Ok(devices)
}
