//! Browser session
//!
//! Wires a `Game` to the page: full-window canvas, a 25 ms interval timer,
//! the MQTT client of the page (mqtt.js loaded as the global `mqtt`) and the
//! window resize event. Everything runs on the browser event loop, so the
//! game sits in an `Rc<RefCell<_>>` and each callback borrows it for its
//! whole duration.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::deliver;
use crate::audio::WebAudioCue;
use crate::config::Config;
use crate::consts::TICK_INTERVAL_MS;
use crate::game::Game;
use crate::renderer::CanvasSurface;

#[wasm_bindgen(inline_js = "
    export function mqtt_connect(url, username, password, topics, on_message) {
        const client = mqtt.connect(url, { username: username, password: password });
        client.on('connect', () => client.subscribe(topics, { qos: 0 }));
        client.on('message', (topic, payload) => on_message(topic, new Uint8Array(payload)));
        return client;
    }

    export function mqtt_end(client) {
        client.end(true);
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn mqtt_connect(
        url: &str,
        username: &str,
        password: &str,
        topics: &js_sys::Array,
        on_message: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;

    fn mqtt_end(client: &JsValue);
}

/// Everything that has to be torn down together
struct Session {
    game: Rc<RefCell<Game>>,
    interval_id: i32,
    client: Option<JsValue>,
    _tick: Closure<dyn FnMut()>,
    _on_message: Closure<dyn FnMut(String, js_sys::Uint8Array)>,
    on_resize: Closure<dyn FnMut(web_sys::Event)>,
    active: bool,
}

impl Session {
    /// Stop the timer, close the broker connection and drop the resize
    /// listener. Runs on the event loop, so no tick can be mid-flight.
    fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.interval_id);
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.on_resize.as_ref().unchecked_ref(),
            );
        }
        if let Some(client) = self.client.take() {
            mqtt_end(&client);
        }

        let score = self.game.borrow().state().score;
        log::info!("Session closed at {} - {}", score.left, score.right);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

fn window_size(window: &web_sys::Window) -> (u32, u32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    (width as u32, height as u32)
}

/// Fixed seed from `?seed=` in the page URL, else the current time
fn launch_seed(window: &web_sys::Window) -> u64 {
    window
        .location()
        .search()
        .ok()
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("seed"))
        .and_then(|seed| seed.parse().ok())
        .unwrap_or_else(|| js_sys::Date::now() as u64)
}

/// Start the game on the page's `#canvas`
pub fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("UWB Pong starting...");

    let window = web_sys::window().expect("no window");
    let document = window.document().expect("no document");
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .expect("no canvas")
        .dyn_into()
        .expect("not a canvas");

    let config = Config::load();
    let seed = launch_seed(&window);
    let (width, height) = window_size(&window);

    let surface = match CanvasSurface::new(canvas) {
        Ok(surface) => Rc::new(RefCell::new(surface)),
        Err(e) => {
            log::error!("Canvas setup failed: {:?}", e);
            return;
        }
    };
    surface.borrow().resize(width, height);

    let game = Rc::new(RefCell::new(Game::new(
        config.clone(),
        seed,
        width as f32,
        height as f32,
    )));
    log::info!("Game initialized with seed: {}", seed);

    // Inbound positions
    let on_message = {
        let game = game.clone();
        Closure::<dyn FnMut(String, js_sys::Uint8Array)>::new(
            move |topic: String, payload: js_sys::Uint8Array| {
                deliver(&mut game.borrow_mut(), &topic, &payload.to_vec());
            },
        )
    };
    let topics = js_sys::Array::new();
    for topic in game.borrow().router().topics() {
        topics.push(&JsValue::from_str(topic));
    }
    let client = match mqtt_connect(
        &config.broker.url(),
        &config.broker.username,
        &config.broker.password,
        &topics,
        on_message.as_ref().unchecked_ref(),
    ) {
        Ok(client) => {
            log::info!("Subscribed to {:?}", game.borrow().router().topics());
            Some(client)
        }
        Err(e) => {
            // Paddles stay frozen; the ball still plays
            log::error!("MQTT connect failed: {:?}", e);
            None
        }
    };

    // Resize
    let on_resize = {
        let game = game.clone();
        let surface = surface.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = window_size(&window);
            surface.borrow().resize(width, height);
            game.borrow_mut().resize(width as f32, height as f32);
        })
    };
    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

    // Game loop
    let tick = {
        let game = game.clone();
        let cue = WebAudioCue::new();
        Closure::<dyn FnMut()>::new(move || {
            let now = js_sys::Date::now();
            game.borrow_mut()
                .frame(now, &mut *surface.borrow_mut(), &cue);
        })
    };
    game.borrow_mut().start(js_sys::Date::now());
    let interval_id = match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS as i32,
    ) {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to start game loop: {:?}", e);
            if let Some(client) = &client {
                mqtt_end(client);
            }
            return;
        }
    };

    // Tear everything down together when the page goes away
    let on_pagehide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        SESSION.with(|session| {
            if let Some(mut session) = session.borrow_mut().take() {
                session.shutdown();
            }
        });
    });
    let _ = window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref());
    on_pagehide.forget();

    SESSION.with(|session| {
        *session.borrow_mut() = Some(Session {
            game,
            interval_id,
            client,
            _tick: tick,
            _on_message: on_message,
            on_resize,
            active: true,
        });
    });

    log::info!("UWB Pong running!");
}
