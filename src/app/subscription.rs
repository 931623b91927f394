// SPDX-License-Identifier: MPL-2.0
//! Native event routing for the application window.

use super::Message;
use iced::{event, window, Event, Subscription};

/// Window events revealing the id needed for mode changes, and close
/// requests.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(route_event)
}

fn route_event(event: Event, _status: event::Status, window_id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Opened { .. } | window::Event::Resized(_)) => {
            Some(Message::WindowSeen(window_id))
        }
        Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        _ => None,
    }
}
