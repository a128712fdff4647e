extern crate simplefat;
use simplefat::{Disc, DiscEvent, FatError};

mod common;
use common::*;

#[test]
fn test_open_new_file() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let handle = disc.open("f").unwrap();

    assert_eq!(handle.name(), 'f');
    assert_eq!(handle.size(), 1);
    assert_eq!(handle.position(), 3);
    assert_eq!(handle.origin(), 200);
    assert_eq!(disc.disc_info().unwrap().free_cluster_count(), 26);

    let image = handler.dump_disc();

    assert_eq!(&image[200..203], &[b'f', 3, 1]);
    assert_eq!(table_byte(&image, 3), 255);
    assert!(manager.events.contains(&DiscEvent::FileCreated {
        name: 'f',
        slot: 200,
        cluster: 3
    }));
}

#[test]
fn test_open_every_name_takes_one_cluster() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();

    for (i, name) in ["a", "b", "c", "Z", "0", "~"].iter().enumerate() {
        let handle = disc.open(name).unwrap();

        assert_eq!(handle.size(), 1);
        assert_eq!(handle.position(), 3 + i as u8);
        assert_eq!(handle.origin(), 200 + i * 3);
        assert_eq!(disc.disc_info().unwrap().free_cluster_count(), 26 - i as u64);
    }

    assert_eq!(disc.list_files().unwrap().len(), 6);
}

#[test]
fn test_open_invalid_names() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();

    assert_eq!(disc.open(""), Err(FatError::InvalidFilename));
    assert_eq!(disc.open("ab"), Err(FatError::InvalidFilename));
    assert_eq!(disc.open("é"), Err(FatError::InvalidFilename));
    assert_eq!(disc.open("\0"), Err(FatError::InvalidFilename));
    assert!(disc.list_files().unwrap().is_empty());
}

#[test]
fn test_open_existing_name_reuses_entry() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let mut first = disc.open("a").unwrap();
    disc.write(&mut first, &[b'a'; 150]).unwrap();

    let second = disc.open("a").unwrap();

    assert_eq!(second.origin(), first.origin());
    assert_eq!(second.position(), first.position());
    assert_eq!(second.size(), 2);
    assert_eq!(disc.list_files().unwrap().len(), 1);
    assert_eq!(disc.read(&second).unwrap(), vec![b'a'; 150]);
}

#[test]
fn test_open_directory_full() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();

    // 27 data clusters run out before the 33 directory slots do.
    for i in 0..27u8 {
        let name = ((b'A' + i) as char).to_string();
        disc.open(&name).unwrap();
    }

    let persisted = stored_bytes(&disc);

    assert_eq!(disc.open("z"), Err(FatError::DiscFull));
    assert_eq!(disc.image().unwrap().as_bytes(), &persisted[..]);
    assert!(disc.lookup("z").unwrap().is_none());
}

#[test]
fn test_close_invalidates_handle() {
    let mut handler = Handler::new();
    let mut manager = Manager::new();

    let mut disc = Disc::mount(&mut handler, &mut manager).unwrap();
    let handle = disc.open("a").unwrap();
    let mut copy = handle.clone();
    let persisted = disc.image().unwrap();

    disc.close(handle).unwrap();

    assert_eq!(disc.append(&mut copy, b"x"), Err(FatError::InvalidHandle));
    assert_eq!(disc.close(copy), Err(FatError::InvalidHandle));
    assert_eq!(disc.image().unwrap(), persisted);
    assert!(manager.events.contains(&DiscEvent::FileClosed { name: 'a' }));
}

fn stored_bytes(disc: &Disc<Error>) -> Vec<u8> {
    return disc.image().unwrap().as_bytes().to_vec();
}
