//! The management RPCs the CLI can issue.

use std::fmt;

use clap::Subcommand;
use oltauth_proto::proto;

/// A single unary `openolt.Openolt` call.
///
/// Every variant sends `openolt.Empty`; they differ in the response type.
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OltCommand {
    /// Disable the OLT (default)
    #[default]
    DisableOlt,
    /// Re-enable a previously disabled OLT
    ReenableOlt,
    /// Reboot the OLT
    Reboot,
    /// Trigger a statistics collection cycle
    CollectStatistics,
    /// Check the agent heartbeat signature
    HeartbeatCheck,
    /// Fetch vendor, model and port information
    GetDeviceInfo,
}

impl OltCommand {
    /// Method name as it appears in the gRPC route.
    pub const fn rpc_name(self) -> &'static str {
        match self {
            Self::DisableOlt => "DisableOlt",
            Self::ReenableOlt => "ReenableOlt",
            Self::Reboot => "Reboot",
            Self::CollectStatistics => "CollectStatistics",
            Self::HeartbeatCheck => "HeartbeatCheck",
            Self::GetDeviceInfo => "GetDeviceInfo",
        }
    }

    /// Full gRPC path, e.g. `/openolt.Openolt/DisableOlt`.
    pub fn route(self) -> String {
        format!("/openolt.Openolt/{}", self.rpc_name())
    }
}

impl fmt::Display for OltCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rpc_name())
    }
}

/// The decoded reply of an [`OltCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OltResponse {
    /// Acknowledgement of a lifecycle or statistics call
    Empty(proto::Empty),
    /// Reply to [`OltCommand::HeartbeatCheck`]
    Heartbeat(proto::Heartbeat),
    /// Reply to [`OltCommand::GetDeviceInfo`]
    DeviceInfo(proto::DeviceInfo),
}

impl fmt::Display for OltResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(_) => f.write_str("{}"),
            Self::Heartbeat(hb) => write!(f, "heartbeat_signature={}", hb.heartbeat_signature),
            Self::DeviceInfo(info) => write!(
                f,
                "vendor={} model={} hardware_version={} firmware_version={} pon_ports={} device_id={} serial={}",
                info.vendor,
                info.model,
                info.hardware_version,
                info.firmware_version,
                info.pon_ports,
                info.device_id,
                info.device_serial_number
            ),
        }
    }
}
