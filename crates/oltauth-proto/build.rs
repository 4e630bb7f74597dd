use tonic_build::manual::{Builder, Method, Service};

/// Unary methods of `openolt.Openolt` that the CLI can issue, as
/// `(rust name, route name, output message)`.
const UNARY_METHODS: &[(&str, &str, &str)] = &[
    ("disable_olt", "DisableOlt", "Empty"),
    ("reenable_olt", "ReenableOlt", "Empty"),
    ("reboot", "Reboot", "Empty"),
    ("collect_statistics", "CollectStatistics", "Empty"),
    ("heartbeat_check", "HeartbeatCheck", "Heartbeat"),
    ("get_device_info", "GetDeviceInfo", "DeviceInfo"),
];

fn main() {
    // Messages are declared by hand in `src/lib.rs`, so only the service
    // stubs are generated here and no protoc is needed.
    let service = UNARY_METHODS
        .iter()
        .fold(
            Service::builder().name("Openolt").package("openolt"),
            |service, (name, route, output)| {
                service.method(
                    Method::builder()
                        .name(*name)
                        .route_name(*route)
                        .input_type("crate::proto::Empty")
                        .output_type(format!("crate::proto::{output}"))
                        .codec_path("tonic::codec::ProstCodec")
                        .build(),
                )
            },
        )
        .build();

    Builder::new().compile(&[service]);
}
