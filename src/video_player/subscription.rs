// SPDX-License-Identifier: MPL-2.0
//! Iced subscription delivering driver notifications to the UI.
//!
//! The stream owns an [`EventBinder`] for as long as the subscription is
//! alive. When Iced drops the subscription (the player is unmounted or the
//! session changes) the binder goes with it and the listeners are removed.

use super::binder::{BoundEvent, EventBinder};
use super::driver::PlaybackDriver;
use iced::futures::stream::BoxStream;
use iced::futures::{SinkExt, StreamExt};
use iced::stream;
use std::hash::{Hash, Hasher};
use tokio::sync::mpsc;

/// Subscription identity: one stream per playback session.
struct DriverSession<D> {
    session_id: u64,
    driver: D,
}

impl<D> Hash for DriverSession<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.session_id.hash(state);
    }
}

/// Creates the subscription for the driver of session `session_id`.
///
/// A new `session_id` restarts the stream and rebinds the listeners.
pub fn driver_events<D>(driver: D, session_id: u64) -> iced::Subscription<BoundEvent>
where
    D: PlaybackDriver + Clone + Send + 'static,
{
    iced::Subscription::run_with(DriverSession { session_id, driver }, bound_events::<D>)
}

fn bound_events<D>(session: &DriverSession<D>) -> BoxStream<'static, BoundEvent>
where
    D: PlaybackDriver + Clone + Send + 'static,
{
    let driver = session.driver.clone();
    let session_id = session.session_id;

    stream::channel(100, move |mut output| async move {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let _binder = EventBinder::attach(driver, event_tx);
        log::debug!("Player session {} bound", session_id);

        while let Some(event) = event_rx.recv().await {
            if output.send(event).await.is_err() {
                break;
            }
        }
    })
    .boxed()
}
