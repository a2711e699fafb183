use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        Dave2dError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        Dave2dError::worker("x")
            .to_string()
            .contains("worker error:")
    );
    assert!(
        Dave2dError::AlreadyInitialized(3)
            .to_string()
            .contains("already initialized: device 3")
    );
    assert!(
        Dave2dError::device_init("set_alpha", DriverError::NoMemory)
            .to_string()
            .contains("device init error (set_alpha): driver out of memory")
    );
    assert!(
        Dave2dError::from(DriverError::Status(-2))
            .to_string()
            .contains("driver error: driver status -2")
    );
}

#[test]
fn init_errors_are_fatal_and_driver_errors_are_not() {
    assert!(Dave2dError::AlreadyInitialized(0).is_fatal());
    assert!(Dave2dError::device_init("init_hw", DriverError::InvalidDevice).is_fatal());
    assert!(Dave2dError::config("bad").is_fatal());
    assert!(Dave2dError::worker("spawn").is_fatal());
    assert!(!Dave2dError::Driver(DriverError::NoMemory).is_fatal());
    assert!(!Dave2dError::Other(anyhow::anyhow!("x")).is_fatal());
}

#[test]
fn device_init_keeps_driver_source() {
    let err = Dave2dError::device_init("new_render_buffer", DriverError::InvalidRenderBuffer(7));
    let source = std::error::Error::source(&err).expect("source");
    assert_eq!(source.to_string(), "invalid render buffer 7");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = Dave2dError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
