extern crate simplefat;
use simplefat::{Disc, DiscEvent, FatError};

mod common;
use common::*;

#[test]
fn test_append_no_new_cluster() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut handle = disc.open("t").unwrap();

    let mut file_contents = b"The file contents are testing, 1234, ok so this fits".to_vec();
    disc.write(&mut handle, &file_contents).unwrap();

    disc.append(&mut handle, b" one cluster").unwrap();
    file_contents.extend_from_slice(b" one cluster");

    assert_eq!(handle.size(), 1);
    assert_eq!(
        handler.dump_disc()[300..300 + file_contents.len()].to_vec(),
        file_contents
    );
}

#[test]
fn test_append_new_cluster() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut handle = disc.open("t").unwrap();

    disc.write(&mut handle, &[b'x'; 100]).unwrap();
    disc.append(&mut handle, &[b'y'; 5]).unwrap();

    assert_eq!(handle.size(), 2);
    assert_eq!(handle.active_cluster(), 4);
    assert!(manager.events.contains(&DiscEvent::ChainExtended {
        name: 't',
        tail: 3,
        cluster: 4
    }));

    let image = handler.dump_disc();

    assert_eq!(image[202], 2);
    assert_eq!(table_byte(&image, 3), 4);
    assert_eq!(table_byte(&image, 4), 255);
    assert_eq!(&image[400..405], &[b'y'; 5]);
}

#[test]
fn test_append_many_times() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut handle = disc.open("m").unwrap();

    let mut file_contents = Vec::new();

    for round in 0..16u32 {
        let chunk: Vec<u8> = (0..37u32).map(|i| ((round * 37 + i) % 255 + 1) as u8).collect();
        disc.append(&mut handle, &chunk).unwrap();
        file_contents.extend_from_slice(&chunk);
    }

    // 592 bytes
    assert_eq!(handle.size(), 6);
    assert_eq!(disc.read(&handle).unwrap(), file_contents);

    let entry = disc.lookup("m").unwrap().unwrap();
    assert_eq!(disc.chain(&entry).unwrap().len(), entry.length() as usize);
}

#[test]
fn test_append_with_second_handle() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut first = disc.open("h").unwrap();
    let mut second = disc.open("h").unwrap();

    disc.append(&mut first, b"first ").unwrap();
    disc.append(&mut second, b"second").unwrap();

    assert_eq!(disc.read(&first).unwrap(), b"first second".to_vec());
}

#[test]
fn test_append_to_handle_from_other_disc() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut other_handler = Handler::new();
    let mut other_manager = Manager::new();

    let mut other = Disc::mount(&mut other_handler, &mut other_manager).unwrap();
    let mut foreign = other.open("h").unwrap();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut own = disc.open("h").unwrap();

    // Both handles are the first one issued for the same slot and cluster.
    assert_eq!(foreign.origin(), own.origin());
    assert_eq!(foreign.position(), own.position());

    assert_eq!(disc.append(&mut foreign, b"x"), Err(FatError::InvalidHandle));
    assert_eq!(disc.read(&foreign), Err(FatError::InvalidHandle));
    assert_eq!(disc.close(foreign), Err(FatError::InvalidHandle));
    assert_eq!(disc.append(&mut own, b"x").unwrap(), 1);
}

#[test]
fn test_append_refreshes_size_of_second_handle() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut first = disc.open("s").unwrap();
    let mut second = disc.open("s").unwrap();

    disc.append(&mut first, &[b's'; 250]).unwrap();

    assert_eq!(first.size(), 3);

    disc.append(&mut second, b"t").unwrap();

    assert_eq!(second.size(), 3);
    assert_eq!(disc.lookup("s").unwrap().unwrap().length(), 3);
}
