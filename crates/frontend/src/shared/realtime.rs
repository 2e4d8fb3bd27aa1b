//! Backend socket: named events invalidate cached queries.
//!
//! One connection per session. Every envelope is first mapped to its cache
//! effect, then published so pages can react to events that carry data
//! (see [`use_socket_event`]).

use crate::shared::api_utils::api_base;
use crate::shared::query_cache::QueryCache;
use crate::system::session::SessionContext;
use contracts::shared::realtime::{effect_of, parse_envelope, socket_url, RealtimeEffect, SocketEnvelope};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

const RECONNECT_MS: u32 = 3000;

/// Something event callbacks can be removed from.
trait Detach {
    fn detach(&self);
}

impl Detach for WebSocket {
    fn detach(&self) {
        self.set_onmessage(None);
        self.set_onopen(None);
        self.set_onclose(None);
    }
}

/// A socket together with the callbacks attached to it. Dropping it detaches
/// the socket first and then frees the callbacks.
struct Attached<S: Detach, C> {
    socket: S,
    _callbacks: C,
}

impl<S: Detach, C> Drop for Attached<S, C> {
    fn drop(&mut self) {
        self.socket.detach();
    }
}

type Callbacks = (
    Closure<dyn FnMut(MessageEvent)>,
    Closure<dyn FnMut(Event)>,
    Closure<dyn FnMut(CloseEvent)>,
);
type Connection = Attached<WebSocket, Callbacks>;

#[derive(Clone, Copy)]
pub struct RealtimeClient {
    last: RwSignal<Option<SocketEnvelope>>,
    pub connected: RwSignal<bool>,
    connection: StoredValue<Option<Connection>, LocalStorage>,
}

impl RealtimeClient {
    pub fn start(cache: QueryCache, session: SessionContext) -> Self {
        let client = Self {
            last: RwSignal::new(None),
            connected: RwSignal::new(false),
            connection: StoredValue::new_local(None),
        };
        client.connect(cache, session);
        client
    }

    fn connect(self, cache: QueryCache, session: SessionContext) {
        let url = socket_url(&api_base());
        let socket = match WebSocket::new(&url) {
            Ok(socket) => socket,
            Err(e) => {
                log::warn!("socket {} failed to open: {:?}", url, e);
                self.reconnect_later(cache, session);
                return;
            }
        };

        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
            let Some(text) = ev.data().as_string() else {
                return;
            };
            let Some(envelope) = parse_envelope(&text) else {
                log::debug!("ignoring socket frame: {}", text);
                return;
            };
            let (branch_id, user_id) = session.ids_untracked();
            if let Some(RealtimeEffect::Invalidate(key)) = effect_of(&envelope, branch_id, user_id) {
                cache.invalidate(&key);
            }
            self.last.set(Some(envelope));
        });
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_open = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            log::info!("socket connected");
            self.connected.set(true);
        });
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
            log::warn!("socket closed ({}), retrying", ev.code());
            self.connected.set(false);
            self.reconnect_later(cache, session);
        });
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        // Replacing the previous connection releases its callbacks.
        self.connection.set_value(Some(Attached {
            socket,
            _callbacks: (on_message, on_open, on_close),
        }));
    }

    fn reconnect_later(self, cache: QueryCache, session: SessionContext) {
        spawn_local(async move {
            TimeoutFuture::new(RECONNECT_MS).await;
            self.connect(cache, session);
        });
    }
}

/// Runs `handler` for every envelope named `event`.
pub fn use_socket_event(event: &'static str, handler: impl Fn(SocketEnvelope) + 'static) {
    let client = use_context::<RealtimeClient>().expect("RealtimeClient not provided in context");
    Effect::new(move |_| {
        if let Some(envelope) = client.last.get() {
            if envelope.event == event {
                untrack(|| handler(envelope));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeSocket(Rc<Cell<u32>>);

    impl Detach for FakeSocket {
        fn detach(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_replacing_connection_releases_previous_callbacks() {
        let detached = Rc::new(Cell::new(0));
        let first_callbacks = Rc::new(());
        let mut slot = Some(Attached {
            socket: FakeSocket(detached.clone()),
            _callbacks: first_callbacks.clone(),
        });
        assert_eq!(Rc::strong_count(&first_callbacks), 2);
        assert!(slot.is_some());

        let second_callbacks = Rc::new(());
        slot = Some(Attached {
            socket: FakeSocket(detached.clone()),
            _callbacks: second_callbacks.clone(),
        });

        assert_eq!(detached.get(), 1);
        assert_eq!(Rc::strong_count(&first_callbacks), 1);
        assert_eq!(Rc::strong_count(&second_callbacks), 2);

        drop(slot);
        assert_eq!(detached.get(), 2);
        assert_eq!(Rc::strong_count(&second_callbacks), 1);
    }
}
