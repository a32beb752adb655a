use super::*;

#[test]
fn names_follow_host_generation() {
    assert_eq!(
        resolve_socket_name(
            Socket::DiffuseDirect,
            EngineKind::Cycles,
            HostGeneration::Legacy
        ),
        Some("DiffDir")
    );
    assert_eq!(
        resolve_socket_name(
            Socket::DiffuseDirect,
            EngineKind::Cycles,
            HostGeneration::Current
        ),
        Some("Diffuse Direct")
    );
    assert_eq!(
        resolve_socket_name(
            Socket::ObjectIndex,
            EngineKind::Cycles,
            HostGeneration::Current
        ),
        Some("Object Index")
    );
}

#[test]
fn engine_specific_sockets_are_absent_elsewhere() {
    assert_eq!(
        resolve_socket_name(
            Socket::Transparent,
            EngineKind::Cycles,
            HostGeneration::Legacy
        ),
        None
    );
    assert_eq!(
        resolve_socket_name(
            Socket::DenoisingAlbedo,
            EngineKind::Eevee,
            HostGeneration::Legacy
        ),
        None
    );
    assert_eq!(
        resolve_socket_name(
            Socket::Transparent,
            EngineKind::Eevee,
            HostGeneration::Legacy
        ),
        Some("Transp")
    );
}

#[test]
fn crypto_sockets_carry_two_levels_each() {
    assert_eq!(crypto_socket_count(6), 3);
    assert_eq!(crypto_socket_count(5), 3);
    assert_eq!(crypto_socket_count(2), 1);
    assert_eq!(crypto_socket_count(0), 0);
    assert_eq!(crypto_socket_count(64), MAX_CRYPTO_SOCKETS);
    assert_eq!(
        resolve_socket_name(
            Socket::Crypto(CryptoKind::Material, 2),
            EngineKind::Cycles,
            HostGeneration::Current
        ),
        Some("CryptoMaterial02")
    );
}

#[test]
fn data_sockets_expand_cryptomatte() {
    let sockets = data_sockets(2);
    assert!(sockets.contains(&Socket::Crypto(CryptoKind::Asset, 1)));
    assert!(!sockets.contains(&Socket::Crypto(CryptoKind::Asset, 2)));
    assert_eq!(sockets.first(), Some(&Socket::Depth));
    assert_eq!(sockets.last(), Some(&Socket::DenoisingDepth));
}

#[test]
fn alpha_over_inputs_differ_per_generation() {
    let legacy = node_socket_names(HostGeneration::Legacy);
    let current = node_socket_names(HostGeneration::Current);
    assert_ne!(legacy.alpha_over_foreground, current.alpha_over_foreground);
    assert_eq!(current.file_output_slot_api, "file_output_items");
}

#[test]
fn light_group_names_are_prefixed() {
    assert_eq!(light_group_socket_name("key"), "Combined_key");
}
