extern crate simplefat;
use simplefat::{Disc, DiscEvent, FatError, Geometry, DEFAULT_LABEL};

mod common;
use common::*;

#[test]
fn test_mount_creates_and_formats() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let disc = Disc::mount(&mut handler, &mut manager).unwrap();

    assert_eq!(disc.label().unwrap(), DEFAULT_LABEL);
    assert_eq!(disc.geometry(), Geometry::default());
    assert_eq!(handler.persist_count, 1);
    assert_eq!(handler.dump_disc().len(), 3072);
    assert_eq!(manager.events, vec![DiscEvent::Formatted]);
}

#[test]
fn test_mount_existing_image() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut handle = disc.open("f").unwrap();
    disc.write(&mut handle, b"kept across mounts").unwrap();
    drop(disc);

    let mut manager = Manager::new();
    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let handle = disc.open("f").unwrap();

    assert_eq!(disc.read(&handle).unwrap(), b"kept across mounts".to_vec());
    assert_eq!(manager.events[0], DiscEvent::Mounted { file_count: 1 });
}

#[test]
fn test_mount_wrong_size() {
    let mut handler = Handler::with_image(vec![0u8; 3000]);
    let mut manager = Manager::new();

    let result = Disc::mount(&mut handler, &mut manager);

    assert!(matches!(
        result,
        Err(FatError::InvalidImageSize {
            expected: 3072,
            found: 3000
        })
    ));
    assert_eq!(handler.persist_count, 0);
}

#[test]
fn test_mount_custom_geometry() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let geometry = Geometry::new(2000, 40).unwrap();
    let disc = Disc::mount_with_geometry(&mut handler, &mut manager, geometry, "forty").unwrap();

    assert_eq!(disc.label().unwrap(), "forty");
    assert_eq!(handler.dump_disc().len(), 2000);
}
