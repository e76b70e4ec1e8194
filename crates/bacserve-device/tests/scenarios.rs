use bacserve_core::types::{
    Date, ErrorClass, ErrorCode, ObjectType, PropertyId, ReinitializeState, Time,
};
use bacserve_device::{
    DeviceConfig, DeviceServer, ObjectCounts, PropertyError, PropertyRequest, RecordingEngine,
    ReinitializeError, ServerConfig,
};

fn server() -> DeviceServer<RecordingEngine> {
    let _ = env_logger::builder().is_test(true).try_init();
    DeviceServer::new(&ServerConfig::default(), RecordingEngine::new()).unwrap()
}

fn request(object_type: ObjectType, instance: u32, property: PropertyId) -> PropertyRequest {
    PropertyRequest::new(object_type, instance, property)
}

#[test]
fn analog_output_command_sequence() {
    let mut server = server();
    let config = ServerConfig {
        objects: ObjectCounts::uniform(6),
        ..ServerConfig::default()
    };
    let mut wide = DeviceServer::new(&config, RecordingEngine::new()).unwrap();
    let pv = request(ObjectType::AnalogOutput, 5, PropertyId::PresentValue);
    // relinquish default for offset 5 is 5 * 1.1
    assert_eq!(wide.get_real(&pv), Ok(5.0 * 1.1));
    wide.set_real(&pv, 10.0, Some(8)).unwrap();
    assert_eq!(wide.get_real(&pv), Ok(10.0));
    wide.set_real(&pv, 20.0, Some(3)).unwrap();
    assert_eq!(wide.get_real(&pv), Ok(20.0));
    wide.set_null(&pv, Some(3)).unwrap();
    assert_eq!(wide.get_real(&pv), Ok(10.0));
    wide.set_null(&pv, Some(8)).unwrap();
    assert_eq!(wide.get_real(&pv), Ok(5.0 * 1.1));

    let pv = request(ObjectType::AnalogOutput, 0, PropertyId::PresentValue);
    assert_eq!(
        server.set_real(&pv, 1.0, Some(0)),
        Err(PropertyError::PriorityOutOfRange(0))
    );
    assert_eq!(
        server.set_real(&pv, 1.0, Some(17)),
        Err(PropertyError::PriorityOutOfRange(17))
    );
    assert_eq!(server.get_real(&pv), Ok(0.0));
}

#[test]
fn priority_array_elements_report_null_and_value() {
    let mut server = server();
    let pv = request(ObjectType::AnalogOutput, 1, PropertyId::PresentValue);
    server.set_real(&pv, 42.0, Some(8)).unwrap();

    let array = request(ObjectType::AnalogOutput, 1, PropertyId::PriorityArray);
    assert_eq!(server.get_unsigned(&array.with_index(0)), Ok(16));
    assert_eq!(server.get_bool(&array.with_index(8)), Ok(false));
    assert_eq!(server.get_real(&array.with_index(8)), Ok(42.0));
    assert_eq!(server.get_bool(&array.with_index(1)), Ok(true));
    assert_eq!(
        server.get_real(&array.with_index(17)),
        Err(PropertyError::InvalidArrayIndex)
    );
}

#[test]
fn bbmd_write_then_activate_changes() {
    let mut server = server();
    let bbmd = request(ObjectType::NetworkPort, 0, PropertyId::FdBbmdAddress).with_index(1);
    let pending = request(ObjectType::NetworkPort, 0, PropertyId::ChangesPending);

    assert_eq!(server.get_bool(&pending), Ok(false));
    server
        .set_octet_string(&bbmd, &[192, 168, 5, 10], None)
        .unwrap();
    assert_eq!(server.get_bool(&pending), Ok(true));

    let outcome = server
        .reinitialize_device(ReinitializeState::ActivateChanges.to_u32(), Some("12345"))
        .unwrap();
    assert!(outcome.committed_changes);
    assert!(!outcome.restart);
    assert!(!server.take_restart_request());
    assert_eq!(server.get_bool(&pending), Ok(false));

    let mut ip = [0u8; 4];
    assert_eq!(server.get_octet_string(&bbmd, &mut ip), Ok(4));
    assert_eq!(ip, [192, 168, 5, 10]);
}

#[test]
fn network_port_reads_configured_settings() {
    let server = server();
    let port = |property| request(ObjectType::NetworkPort, 0, property);
    let mut octets = [0u8; 4];

    assert_eq!(server.get_octet_string(&port(PropertyId::IpAddress), &mut octets), Ok(4));
    assert_eq!(octets, [192, 168, 1, 100]);
    assert_eq!(server.get_octet_string(&port(PropertyId::IpSubnetMask), &mut octets), Ok(4));
    assert_eq!(octets, [255, 255, 255, 0]);
    assert_eq!(
        server.get_octet_string(&port(PropertyId::IpDefaultGateway), &mut octets),
        Ok(4)
    );
    assert_eq!(octets, [192, 168, 1, 1]);

    assert_eq!(server.get_real(&port(PropertyId::LinkSpeed)), Ok(100_000_000.0));
    assert_eq!(server.get_enumerated(&port(PropertyId::NetworkType)), Ok(5));
    assert_eq!(server.get_unsigned(&port(PropertyId::BacnetIpUdpPort)), Ok(47808));
}

#[test]
fn udp_port_change_commits_on_activate_changes() {
    let mut server = server();
    let udp = request(ObjectType::NetworkPort, 0, PropertyId::BacnetIpUdpPort);
    server.set_unsigned(&udp, 47809, None).unwrap();
    assert!(server.network_port().changes_pending);
    assert_eq!(
        server.set_unsigned(&udp, 70_000, None),
        Err(PropertyError::ValueOutOfRange)
    );

    let outcome = server
        .reinitialize_device(ReinitializeState::ActivateChanges.to_u32(), Some("12345"))
        .unwrap();
    assert!(outcome.committed_changes);
    assert!(!server.network_port().changes_pending);
    assert_eq!(server.get_unsigned(&udp), Ok(47809));
}

#[test]
fn subscription_lifetime_and_host_type_writes() {
    let mut server = server();
    let host = request(ObjectType::NetworkPort, 0, PropertyId::FdBbmdAddress).with_index(1);
    assert_eq!(
        server.set_enumerated(&host, 3, None),
        Err(PropertyError::ValueOutOfRange)
    );
    assert!(!server.network_port().changes_pending);

    let lifetime = request(ObjectType::NetworkPort, 0, PropertyId::FdSubscriptionLifetime);
    server.set_unsigned(&lifetime, 600, None).unwrap();
    assert!(server.network_port().changes_pending);
    server
        .reinitialize_device(ReinitializeState::ActivateChanges.to_u32(), Some("12345"))
        .unwrap();
    assert!(!server.network_port().changes_pending);
    assert_eq!(server.get_unsigned(&lifetime), Ok(600));
}

#[test]
fn device_identity_strings() {
    let server = server();
    let device = |property| request(ObjectType::Device, 389001, property);
    let mut out = [0u8; 64];

    let len = server
        .get_character_string(&device(PropertyId::ModelName), &mut out)
        .unwrap();
    assert_eq!(&out[..len], b"BACnetServerExampleCSharp");
    let len = server
        .get_character_string(&device(PropertyId::ApplicationSoftwareVersion), &mut out)
        .unwrap();
    assert_eq!(&out[..len], b"0.0.4");
}

#[test]
fn truncated_names_stay_valid_utf8() {
    let config = ServerConfig {
        device: DeviceConfig {
            name: "Gerät Süd".to_string(),
            ..DeviceConfig::default()
        },
        ..ServerConfig::default()
    };
    let server = DeviceServer::new(&config, RecordingEngine::new()).unwrap();
    let name = request(ObjectType::Device, 389001, PropertyId::ObjectName);

    let mut short = [0u8; 4];
    let len = server.get_character_string(&name, &mut short).unwrap();
    assert_eq!(std::str::from_utf8(&short[..len]), Ok("Ger"));

    let mut full = [0u8; 32];
    let len = server.get_character_string(&name, &mut full).unwrap();
    assert_eq!(std::str::from_utf8(&full[..len]), Ok("Gerät Süd"));
}

#[test]
fn analog_objects_report_in_service() {
    let server = server();
    for kind in [
        ObjectType::AnalogInput,
        ObjectType::AnalogOutput,
        ObjectType::AnalogValue,
    ] {
        let oos = request(kind, 0, PropertyId::OutOfService);
        assert_eq!(server.get_bool(&oos), Ok(false), "{kind:?}");
    }
}

#[test]
fn reinitialize_rejections() {
    let mut server = server();
    let activate = ReinitializeState::ActivateChanges.to_u32();

    let missing = server.reinitialize_device(activate, None).unwrap_err();
    assert_eq!(missing, ReinitializeError::MissingPassword);
    assert_eq!(missing.error_code(), ErrorCode::MissingRequiredParameter);

    let wrong = server.reinitialize_device(activate, Some("54321")).unwrap_err();
    assert_eq!(wrong, ReinitializeError::PasswordFailure);
    assert_eq!(wrong.error_code(), ErrorCode::PasswordFailure);

    let coldstart = server
        .reinitialize_device(ReinitializeState::Coldstart.to_u32(), Some("12345"))
        .unwrap_err();
    assert_eq!(
        coldstart.error_code(),
        ErrorCode::OptionalFunctionalityNotSupported
    );
    assert_eq!(
        server.last_reinitialize_result(),
        Some(Err(ReinitializeError::UnsupportedState(0)))
    );
}

#[test]
fn configured_password_replaces_default() {
    let config = ServerConfig {
        reinitialize_password: "open sesame".to_string(),
        ..ServerConfig::default()
    };
    let mut server = DeviceServer::new(&config, RecordingEngine::new()).unwrap();
    let warmstart = ReinitializeState::Warmstart.to_u32();
    assert_eq!(
        server.reinitialize_device(warmstart, Some("12345")),
        Err(ReinitializeError::PasswordFailure)
    );
    assert!(server
        .reinitialize_device(warmstart, Some("open sesame"))
        .unwrap()
        .restart);
    assert!(server.take_restart_request());
}

#[test]
fn multi_state_state_text() {
    let server = server();
    let text = request(ObjectType::MultiStateInput, 0, PropertyId::StateText);
    let mut out = [0u8; 64];
    let len = server
        .get_character_string(&text.with_index(5), &mut out)
        .unwrap();
    assert_eq!(&out[..len], b"East (E)");
    assert_eq!(server.get_unsigned(&text.with_index(0)), Ok(16));
    assert_eq!(
        server.get_unsigned(&request(ObjectType::MultiStateInput, 2, PropertyId::PresentValue)),
        Ok(2)
    );
}

#[test]
fn instance_bounds_per_kind() {
    let config = ServerConfig {
        objects: ObjectCounts {
            positive_integer_value: 2,
            date_value: 1,
            ..ObjectCounts::default()
        },
        ..ServerConfig::default()
    };
    let server = DeviceServer::new(&config, RecordingEngine::new()).unwrap();

    let piv = |i| request(ObjectType::PositiveIntegerValue, i, PropertyId::PresentValue);
    assert_eq!(server.get_unsigned(&piv(1)), Ok(1000));
    let err = server.get_unsigned(&piv(2)).unwrap_err();
    assert_eq!(err, PropertyError::UnknownObject);
    assert_eq!(err.error_class(), ErrorClass::Object);

    let dv = |i| request(ObjectType::DateValue, i, PropertyId::PresentValue);
    assert_eq!(server.get_date(&dv(0)), Ok(Date::new(2019, 6, 7, 5)));
    assert_eq!(server.get_date(&dv(1)), Err(PropertyError::UnknownObject));

    let tv = request(ObjectType::TimeValue, 2, PropertyId::PresentValue);
    assert_eq!(server.get_time(&tv), Ok(Time::new(15, 13, 55, 0)));
}

#[test]
fn value_object_writes() {
    let mut server = server();
    let bv = request(ObjectType::BinaryValue, 0, PropertyId::PresentValue);
    server.set_enumerated(&bv, 1, Some(10)).unwrap();
    assert_eq!(server.get_enumerated(&bv), Ok(1));
    assert_eq!(
        server.set_enumerated(&bv, 3, None),
        Err(PropertyError::ValueOutOfRange)
    );

    let bi = request(ObjectType::BinaryInput, 0, PropertyId::PresentValue);
    assert_eq!(
        server.set_enumerated(&bi, 1, None),
        Err(PropertyError::WriteAccessDenied)
    );

    let msv = request(ObjectType::MultiStateValue, 1, PropertyId::PresentValue);
    server.set_unsigned(&msv, 12, None).unwrap();
    assert_eq!(server.get_unsigned(&msv), Ok(12));

    let av = request(ObjectType::AnalogValue, 2, PropertyId::PresentValue);
    assert_eq!(
        server.set_unsigned(&av, 12, None),
        Err(PropertyError::InvalidDataType)
    );
    let tv = request(ObjectType::TimeValue, 0, PropertyId::PresentValue);
    assert_eq!(
        server.set_time(&tv, Time::new(1, 2, 3, 4), None),
        Err(PropertyError::WriteAccessDenied)
    );
}

#[test]
fn unsupported_reads_are_unknown_property() {
    let server = server();
    let ai_units = request(ObjectType::AnalogInput, 0, PropertyId::Units);
    assert_eq!(server.get_enumerated(&ai_units), Ok(95));
    assert_eq!(
        server.get_unsigned(&ai_units),
        Err(PropertyError::UnknownProperty)
    );
    let err = server
        .get_real(&request(ObjectType::BinaryInput, 0, PropertyId::PriorityArray))
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::UnknownProperty);
    assert_eq!(
        server.get_unsigned(&request(ObjectType::AnalogInput, 0, PropertyId::Proprietary(512))),
        Err(PropertyError::UnknownProperty)
    );
}
