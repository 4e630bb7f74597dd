//! gRPC definitions for the openolt management calls issued by `oltauth`.
//!
//! Only the slice of `openolt.proto` that the CLI touches is declared here.
//! Field tags follow the upstream definitions, so unknown fields sent by a
//! full OLT agent are skipped on decode.

#[allow(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
pub mod proto {
    /// `openolt.Empty`.
    #[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
    pub struct Empty {}

    /// `openolt.Heartbeat`.
    #[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
    pub struct Heartbeat {
        #[prost(fixed32, tag = "1")]
        pub heartbeat_signature: u32,
    }

    /// `openolt.DeviceInfo`, identity and port-count fields only.
    #[derive(Clone, PartialEq, Eq, ::prost::Message)]
    pub struct DeviceInfo {
        #[prost(string, tag = "1")]
        pub vendor: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub model: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub hardware_version: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub firmware_version: ::prost::alloc::string::String,
        #[prost(fixed32, tag = "12")]
        pub pon_ports: u32,
        #[prost(string, tag = "16")]
        pub device_id: ::prost::alloc::string::String,
        #[prost(string, tag = "17")]
        pub device_serial_number: ::prost::alloc::string::String,
    }

    include!(concat!(env!("OUT_DIR"), "/openolt.Openolt.rs"));
}

pub use proto::openolt_client::OpenoltClient;
pub use proto::openolt_server::{Openolt, OpenoltServer};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use prost::Message;

    use super::proto::{DeviceInfo, Empty, Heartbeat};

    #[test]
    fn test_empty_encodes_to_nothing() {
        assert!(Empty {}.encode_to_vec().is_empty());
    }

    #[test]
    fn test_heartbeat_signature_is_fixed32() {
        let bytes = Heartbeat {
            heartbeat_signature: 0x0102_0304,
        }
        .encode_to_vec();

        // tag 1, wire type 5 (fixed32), little-endian payload
        assert_eq!(bytes, vec![0x0d, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_device_info_skips_unknown_fields() {
        let mut bytes = DeviceInfo {
            vendor: "BRCM".to_string(),
            pon_ports: 16,
            device_serial_number: "EC1234".to_string(),
            ..Default::default()
        }
        .encode_to_vec();
        // field 19 (previously_connected, bool) is not modelled here
        bytes.extend_from_slice(&[0x98, 0x01, 0x01]);

        let decoded = DeviceInfo::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.vendor, "BRCM");
        assert_eq!(decoded.pon_ports, 16);
        assert_eq!(decoded.device_serial_number, "EC1234");
        assert!(decoded.model.is_empty());
    }
}
