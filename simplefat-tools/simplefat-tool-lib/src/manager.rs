use chrono::DateTime;
use chrono::Utc;
use log::{debug, info, warn};
use simplefat::{DiscEvent, DiscObserver};

/// Reports what happens on a disc through the `log` facade.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Ord)]
pub struct Manager {}

impl Manager {
    pub fn new() -> Self {
        return Self {};
    }
}

impl DiscObserver for Manager {
    fn current_time(&self) -> DateTime<Utc> {
        return Utc::now();
    }

    fn notify(&mut self, at: DateTime<Utc>, event: &DiscEvent) {
        let at = at.format("%H:%M:%S%.3f");

        match event {
            DiscEvent::Formatted => info!("[{}] formatted a new image", at),
            DiscEvent::Mounted { file_count } => {
                info!("[{}] mounted image holding {} file(s)", at, file_count)
            }
            DiscEvent::ClusterAllocated { cluster } => {
                debug!("[{}] allocated cluster {}", at, cluster)
            }
            DiscEvent::ChainExtended {
                name,
                tail,
                cluster,
            } => debug!("[{}] \"{}\": linked cluster {} -> {}", at, name, tail, cluster),
            DiscEvent::FileCreated {
                name,
                slot,
                cluster,
            } => info!(
                "[{}] created \"{}\" at slot {} starting in cluster {}",
                at, name, slot, cluster
            ),
            DiscEvent::FileReopened { name, slot } => {
                info!("[{}] opened \"{}\" at slot {}", at, name, slot)
            }
            DiscEvent::FileTruncated { name, freed } => {
                debug!("[{}] \"{}\": truncated, {} cluster(s) freed", at, name, freed)
            }
            DiscEvent::WriteAborted {
                name,
                written,
                error,
            } => warn!(
                "[{}] \"{}\": write stopped after {} byte(s): {}",
                at, name, written, error
            ),
            DiscEvent::FileDeleted { name, freed } => {
                info!("[{}] deleted \"{}\", {} cluster(s) freed", at, name, freed)
            }
            DiscEvent::FileClosed { name } => debug!("[{}] closed \"{}\"", at, name),
        }
    }
}
