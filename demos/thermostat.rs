//! # Example: thermostat
//!
//! A model thread simulates a room heater; two "windows" display it.
//!
//! Shows how to:
//! - Implement [`Model`], [`UpdateReceiver`] and [`InteractiveView`].
//! - Run one view on a dedicated [`EventLoop`] and one on a [`TokioHost`].
//! - Attach a window late and bring it up to date with `replay_cached_state_to`.
//! - Watch controller events with [`LogWriter`].
//!
//! ## Flow
//! ```text
//! panel.click() ──► ViewerController::submit_action ──► pending buffer
//!                                                         │
//! model thread: tick ── drain_actions ──► Heater::handle_action
//!                    └─ report_property_change("temp") ──► HostUpdater ──► panel / gauge
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example thermostat --features logging
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use mvcbridge::{
    ActionCommand, Controller, ControllerConfig, EventLoop, HostUpdater, InteractiveView,
    LogWriter, Model, ModelListener, PropertyChange, TokioHost, UpdateReceiver, ViewerController,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Room heater: the setpoint comes from actions, temperature drifts towards it.
struct Heater {
    listener: OnceLock<Arc<dyn ModelListener>>,
    setpoint: Mutex<f64>,
    temp: Mutex<f64>,
    wake: AtomicBool,
}

impl Heater {
    fn tick(&self) {
        let Some(listener) = self.listener.get() else {
            return;
        };
        if self.wake.swap(false, Ordering::AcqRel) {
            listener.drain_actions();
        }

        let setpoint = *self.setpoint.lock().unwrap();
        let mut temp = self.temp.lock().unwrap();
        *temp += (setpoint - *temp) * 0.3;
        let heating = setpoint > *temp + 0.05;
        let rounded = (*temp * 10.0).round() / 10.0;
        drop(temp);

        listener.report_property_change("temp", rounded.into());
        listener.report_property_change("heating", heating.into());
    }
}

impl Model for Heater {
    fn update_notification(&self, _property: &str) {
        self.wake.store(true, Ordering::Release);
    }

    fn handle_action(&self, action: ActionCommand) {
        let (property, value) = action.into_parts();
        if &*property == "setpoint" {
            if let Some(v) = value.as_number() {
                *self.setpoint.lock().unwrap() = v;
                tracing::info!(setpoint = v, "setpoint changed");
            }
        }
    }
}

/// Window that prints what it receives.
struct Window {
    title: &'static str,
    controller: OnceLock<Arc<dyn ViewerController>>,
}

impl Window {
    fn new(title: &'static str) -> Arc<Self> {
        Arc::new(Self {
            title,
            controller: OnceLock::new(),
        })
    }

    fn click_setpoint(&self, value: f64) {
        if let (Some(ctrl), Ok(action)) = (self.controller.get(), ActionCommand::new("setpoint", value)) {
            ctrl.submit_action(action);
        }
    }
}

impl UpdateReceiver for Window {
    fn update_component(&self, change: &PropertyChange) {
        println!("[{}] {} = {}", self.title, change.property, change.new);
    }
}

impl InteractiveView for Window {
    fn register_controller(&self, controller: Arc<dyn ViewerController>) {
        let _ = self.controller.set(controller);
    }
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let heater = Arc::new(Heater {
        listener: OnceLock::new(),
        setpoint: Mutex::new(20.0),
        temp: Mutex::new(18.0),
        wake: AtomicBool::new(false),
    });
    let model: Arc<dyn Model> = heater.clone();

    let cfg = ControllerConfig {
        pending_warn_threshold: 64,
        ..ControllerConfig::default()
    };
    let ctrl = Controller::builder(cfg).with_model(&model).build();
    let _ = heater.listener.set(ctrl.clone());

    let token = CancellationToken::new();
    let log = LogWriter::spawn(ctrl.bus(), token.clone());

    // Main window on its own UI thread.
    let ui = EventLoop::spawn("ui-main")?;
    let panel = Window::new("panel");
    panel.register_controller(ctrl.clone());
    let panel_channel = HostUpdater::arc("panel", panel.clone(), ui.handle());
    ctrl.register_update_channel(&panel_channel);

    // Model thread.
    let running = Arc::new(AtomicBool::new(true));
    let model_thread = {
        let heater = Arc::clone(&heater);
        let running = Arc::clone(&running);
        std::thread::Builder::new().name("model".into()).spawn(move || {
            while running.load(Ordering::Acquire) {
                heater.tick();
                std::thread::sleep(Duration::from_millis(100));
            }
        })?
    };

    tokio::time::sleep(Duration::from_millis(300)).await;
    panel.click_setpoint(23.0);
    tokio::time::sleep(Duration::from_millis(300)).await;

    // A gauge window opens later, driven by the async runtime.
    let (host, gauge_worker) = TokioHost::spawn("gauge", &tokio::runtime::Handle::current(), token.clone());
    let gauge = Window::new("gauge");
    let gauge_channel = HostUpdater::arc("gauge", gauge.clone(), host);
    ctrl.register_update_channel(&gauge_channel);
    ctrl.replay_cached_state_to(gauge_channel.as_ref());

    tokio::time::sleep(Duration::from_millis(300)).await;

    running.store(false, Ordering::Release);
    let _ = model_thread.join();
    ui.shutdown();
    token.cancel();
    let _ = gauge_worker.await;
    let _ = log.await;
    Ok(())
}
