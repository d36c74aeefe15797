//! Background catalog loading; the UI thread only ever drains a channel.

use crossbeam_channel::{unbounded, Receiver};
use tracing::info;

use stardust_gallery::{fetch_state, GalleryState};
use stardust_platform::ProjectSource;

pub fn spawn_catalog_loader<S>(source: S) -> Receiver<GalleryState>
where
    S: ProjectSource + 'static,
{
    let (sender, receiver) = unbounded();
    std::thread::spawn(move || {
        info!("catalog loader started");
        let _ = sender.send(fetch_state(&source));
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardust_gallery::StaticProjectSource;

    #[test]
    fn loader_delivers_a_terminal_state() {
        let receiver = spawn_catalog_loader(StaticProjectSource {
            body: "not json".into(),
        });
        let state = receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert!(matches!(state, GalleryState::Failed(_)));
    }
}
