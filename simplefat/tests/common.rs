extern crate simplefat;
use chrono::{DateTime, Utc};
use simplefat::{DiscEvent, DiscObserver, DiscStore, FatErrorConvertible};

#[derive(Debug, PartialEq)]
pub struct Error {}

impl FatErrorConvertible for Error {}

pub struct Handler {
    pub disc: Option<Vec<u8>>,
    pub persist_count: usize,
}

impl Handler {
    /// A store that holds no image yet.
    pub fn new() -> Self {
        return Self {
            disc: None,
            persist_count: 0,
        };
    }

    pub fn with_image(image: Vec<u8>) -> Self {
        return Self {
            disc: Some(image),
            persist_count: 0,
        };
    }

    pub fn dump_disc(&self) -> Vec<u8> {
        return self.disc.clone().unwrap_or_default();
    }
}

impl DiscStore<Error> for Handler {
    fn load(&self) -> Result<Option<Vec<u8>>, Error> {
        return Ok(self.disc.clone());
    }

    fn persist(&mut self, image: &[u8]) -> Result<(), Error> {
        self.disc = Some(image.to_vec());
        self.persist_count += 1;

        return Ok(());
    }
}

#[derive(Debug)]
pub struct Manager {
    pub events: Vec<DiscEvent>,
}

impl Manager {
    pub fn new() -> Self {
        return Self { events: Vec::new() };
    }
}

impl DiscObserver for Manager {
    fn current_time(&self) -> DateTime<Utc> {
        return Utc::now();
    }

    fn notify(&mut self, _at: DateTime<Utc>, event: &DiscEvent) {
        self.events.push(event.clone());
    }
}

/// The allocation table status byte of `cluster` on a default geometry image.
pub fn table_byte(disc: &[u8], cluster: usize) -> u8 {
    return disc[100 + cluster];
}

/// The number of clusters reachable from `head` on a default geometry image.
pub fn chain_length(disc: &[u8], head: u8) -> usize {
    let mut length = 1;
    let mut current = head as usize;

    while table_byte(disc, current) != 255 {
        current = table_byte(disc, current) as usize;
        length += 1;

        assert!(length <= 30, "chain does not terminate");
    }

    return length;
}
