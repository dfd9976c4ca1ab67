//! A running list view.
//!
//! `ListSession::spawn` moves a [`ListView`] into a tokio task. The task reads
//! user events, debounces typed search text, follows store changes and
//! publishes the resulting snapshots and location updates on watch channels.

use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::debounce::{debounce, Distinct};
use crate::list_view::{ListSnapshot, ListView};
use crate::location::{Location, LocationUpdate};
use crate::store::RecipesView;

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Raw text from the search box. Applied after the debounce window.
    SearchInput(String),
    SetTags(BTreeSet<String>),
    ToggleTag(String),
    SetPage(usize),
    /// The host navigated (back/forward, pasted link). Typed text is compared
    /// against the query this location carries from here on.
    LocationChanged(Location),
}

#[derive(Debug, Error)]
#[error("list session has ended")]
pub struct SessionClosed;

/// Handle to a running list session. The task stops once every clone is dropped.
#[derive(Debug, Clone)]
pub struct ListSession {
    events: mpsc::Sender<ListEvent>,
    snapshots: watch::Receiver<ListSnapshot>,
    locations: watch::Receiver<Option<LocationUpdate>>,
}

impl ListSession {
    pub fn spawn(
        mut recipes: RecipesView,
        initial: &Location,
        page_size: usize,
        search_debounce: Duration,
    ) -> Self {
        let (events, mut event_rx) = mpsc::channel(EVENT_BUFFER);
        let (text_tx, text_rx) = mpsc::channel(EVENT_BUFFER);
        let mut queries = debounce(text_rx, search_debounce);

        let mut list = ListView::new(recipes.snapshot(), page_size);
        list.apply_location(initial);
        let mut distinct = Distinct::new();
        distinct.reset(list.filter().query.clone());

        let (snapshot_tx, snapshots) = watch::channel(list.snapshot());
        let (location_tx, locations) = watch::channel(None);

        tokio::spawn(async move {
            let mut store_open = true;

            loop {
                let update = tokio::select! {
                    event = event_rx.recv() => match event {
                        None => break,
                        Some(ListEvent::SearchInput(text)) => {
                            if text_tx.send(text).await.is_err() {
                                break;
                            }
                            continue;
                        }
                        Some(event) => {
                            let navigated = matches!(event, ListEvent::LocationChanged(_));
                            let update = apply_event(&mut list, event);
                            if navigated {
                                distinct.reset(list.filter().query.clone());
                            }
                            update
                        }
                    },
                    Some(query) = queries.recv() => {
                        if !distinct.admit(&query) {
                            continue;
                        }
                        debug!(%query, "search query settled");
                        list.set_query(&query)
                    }
                    alive = recipes.changed(), if store_open => {
                        if alive {
                            list.set_collection(recipes.snapshot());
                        } else {
                            store_open = false;
                        }
                        None
                    }
                };

                if let Some(update) = update {
                    location_tx.send_replace(Some(update));
                }
                snapshot_tx.send_replace(list.snapshot());
            }

            debug!("list session ended");
        });

        Self {
            events,
            snapshots,
            locations,
        }
    }

    pub async fn send(&self, event: ListEvent) -> Result<(), SessionClosed> {
        self.events.send(event).await.map_err(|_| SessionClosed)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn snapshots(&self) -> watch::Receiver<ListSnapshot> {
        self.snapshots.clone()
    }

    /// Location updates for the host to apply. `None` until the first state change.
    pub fn locations(&self) -> watch::Receiver<Option<LocationUpdate>> {
        self.locations.clone()
    }
}

fn apply_event(list: &mut ListView, event: ListEvent) -> Option<LocationUpdate> {
    debug!(?event, "list event");
    match event {
        ListEvent::SearchInput(text) => list.set_query(&text),
        ListEvent::SetTags(tags) => list.set_tags(tags),
        ListEvent::ToggleTag(tag) => Some(list.toggle_tag(&tag)),
        ListEvent::SetPage(page) => list.set_page(page),
        ListEvent::LocationChanged(location) => {
            list.apply_location(&location);
            None
        }
    }
}
