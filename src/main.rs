//! Holiday Heart Spin entry point
//!
//! Wires the reveal state machine to the page on web. The native binary runs
//! one day's reveal against an in-memory store and logs what the page would show.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use holiday_heart_spin::calendar;
    use holiday_heart_spin::persistence::LocalStorage;
    use holiday_heart_spin::ui::{View, Wheel};
    use holiday_heart_spin::{QuestionPool, RevealStateManager, SeededIndexSource, Settings};

    /// How often the daily lock is re-checked
    const ROLLOVER_CHECK_MS: i32 = 60_000;

    /// App instance holding all state
    struct App {
        manager: RevealStateManager<LocalStorage, SeededIndexSource>,
        settings: Settings,
        wheel: Wheel,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let mut store = LocalStorage::open();
            let mut settings = Settings::load(&store);
            let query = web_sys::window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if settings.apply_query(&query) {
                settings.save(&mut store);
            }
            let mut manager = RevealStateManager::with_keys(
                QuestionPool::holiday(),
                store,
                SeededIndexSource::new(seed),
                settings.key_scheme.keys(),
            );
            manager.initialize(calendar::today());
            Self {
                manager,
                settings,
                wheel: Wheel::default(),
            }
        }

        /// Update text and button state in the DOM
        fn update_dom(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let view = View::from_manager(&self.manager);

            if let Some(el) = document.get_element_by_id("day-label") {
                el.set_text_content(Some(&view.day_label));
            }
            if let Some(el) = document.get_element_by_id("unlock-label") {
                el.set_text_content(Some(&view.unlock_label));
            }
            if let Some(el) = document.get_element_by_id("spin-button") {
                el.set_text_content(Some(view.button_label));
                if view.button_enabled {
                    let _ = el.remove_attribute("disabled");
                } else {
                    let _ = el.set_attribute("disabled", "");
                }
            }
            if let Some(el) = document.get_element_by_id("wheel") {
                let style = format!("transform: rotate({}deg)", self.wheel.rotation);
                let _ = el.set_attribute("style", &style);
            }
            if let Some(el) = document.get_element_by_id("revealed") {
                match &view.revealed {
                    Some(prompt) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(text) = document.get_element_by_id("revealed-text") {
                            text.set_text_content(Some(prompt));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
            if let Some(list) = document.get_element_by_id("memories") {
                list.set_text_content(None);
                for memory in &view.memories {
                    if let Ok(item) = document.create_element("li") {
                        item.set_text_content(Some(memory));
                        let _ = list.append_child(&item);
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Holiday Heart Spin starting...");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        app.borrow().update_dom();

        setup_spin_button(app.clone());
        setup_save_button(app.clone());
        setup_day_rollover(app);

        log::info!("Holiday Heart Spin ready");
    }

    fn setup_spin_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id("spin-button") else {
            log::warn!("No #spin-button on page");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let delay = {
                let mut a = app.borrow_mut();
                let today = calendar::today();
                if let Err(e) = a.manager.reveal(today) {
                    log::info!("Spin refused: {}", e);
                    return;
                }
                let slot = a.manager.last_slot().unwrap_or(0);
                let pool_len = a.manager.pool().len();
                let extra = a.settings.effective_extra_spins();
                a.wheel.spin(slot, pool_len, extra);
                a.update_dom();
                a.settings.effective_delay_ms()
            };
            schedule_finish(app.clone(), delay);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Show the committed prompt once the wheel has stopped
    fn schedule_finish(app: Rc<RefCell<App>>, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let mut a = app.borrow_mut();
            a.manager.finish_reveal();
            a.update_dom();
        });
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .is_err()
        {
            log::error!("Failed to schedule reveal display");
        }
        closure.forget();
    }

    /// Re-check the daily lock so the button unlocks at midnight without a reload
    fn setup_day_rollover(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut a = app.borrow_mut();
            if a.manager.refresh_lock(calendar::today()) {
                a.update_dom();
            }
        });
        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ROLLOVER_CHECK_MS,
            )
            .is_err()
        {
            log::warn!("Failed to schedule day rollover check");
        }
        closure.forget();
    }

    fn setup_save_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id("save-memory") else {
            log::warn!("No #save-memory on page");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut a = app.borrow_mut();
            if a.manager.save_revealed() {
                a.update_dom();
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Holiday Heart Spin (native) starting...");
    log::info!("Progress is not persisted natively - run with `trunk serve` for the web version");

    run_native_day();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_native_day() {
    use holiday_heart_spin::ui::View;
    use holiday_heart_spin::{
        MemoryStore, QuestionPool, RevealStateManager, SeededIndexSource, Settings, calendar,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    let store = MemoryStore::new();
    let settings = Settings::load(&store);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut manager = RevealStateManager::with_keys(
        QuestionPool::holiday(),
        store,
        SeededIndexSource::new(seed),
        settings.key_scheme.keys(),
    );
    let today = calendar::today();
    manager.initialize(today);

    let view = View::from_manager(&manager);
    log::info!("{} / {}", view.day_label, view.unlock_label);

    match manager.reveal(today) {
        Ok(_) => {
            if let Some(prompt) = manager.finish_reveal() {
                println!("🎁 {}", prompt);
            }
            manager.save_revealed();
        }
        Err(e) => log::warn!("No reveal: {}", e),
    }

    let view = View::from_manager(&manager);
    log::info!("{} / {} [{}]", view.day_label, view.unlock_label, view.button_label);
    log::info!("{} memories saved", view.memories.len());
}
