#![cfg(target_arch = "wasm32")]
//! Web front-end for the virtual theremin.
//!
//! The 3D scene, mesh loading and the pose-estimation model stay on the JS
//! side; this crate exposes a [`ThereminApp`] handle whose methods the host
//! calls with mesh-load results, per-detection wrist keypoints and XR grip
//! poses. Everything downstream of those calls — mapping, lifecycle,
//! Web Audio — lives here.

mod audio;
mod dom;
mod events;
mod session;
mod webcam;

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use theremin_core::{Hand, ThereminEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use session::Session;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("theremin-web starting");
    Ok(())
}

/// One theremin instance, owned by the JS host.
#[wasm_bindgen]
pub struct ThereminApp {
    session: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl ThereminApp {
    /// Build the session, wire the DOM, and request the webcam. Must be
    /// called once the document has a `#start-stop` button (and optionally
    /// a `#render-canvas` and a `#video` slot).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ThereminApp, JsValue> {
        let document =
            dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
        let session = Session::new(&document)
            .map_err(|e| JsValue::from_str(&format!("session init error: {e}")))?;
        let session = Rc::new(RefCell::new(session));

        events::wire_start_button(&document, &session);
        events::wire_pointer_handlers(&document, &session);

        // Webcam capture is best-effort: a denied permission leaves the
        // theremin inert rather than failing construction.
        {
            let session = session.clone();
            spawn_local(async move {
                match webcam::start_capture(&document).await {
                    Ok((stream, video)) => session.borrow_mut().set_capture(stream, video),
                    Err(e) => log::error!("webcam capture error: {:?}", e),
                }
            });
        }

        Ok(ThereminApp { session })
    }

    /// Mesh-load completion: the host hands over the two antenna positions.
    pub fn on_antennae_loaded(&self, px: f32, py: f32, pz: f32, vx: f32, vy: f32, vz: f32) {
        session::dispatch(
            &self.session,
            ThereminEvent::AntennaeLoaded {
                pitch: Vec3::new(px, py, pz),
                volume: Vec3::new(vx, vy, vz),
            },
        );
    }

    /// One pose-estimation detection: wrist keypoints in capture pixels.
    pub fn on_pose_frame(&self, right_x: f32, right_y: f32, left_x: f32, left_y: f32) {
        self.session
            .borrow_mut()
            .pose
            .on_detection(Vec2::new(right_x, right_y), Vec2::new(left_x, left_y));
        session::pump_sources(&self.session);
    }

    /// World-space XR grip pose; forwarded only while a pointer/trigger is
    /// held (`pitch_hand` selects which antenna the pose plays against).
    pub fn on_controller_pose(&self, pitch_hand: bool, x: f32, y: f32, z: f32) {
        let hand = if pitch_hand { Hand::Pitch } else { Hand::Volume };
        self.session
            .borrow_mut()
            .grip
            .on_pose(hand, Vec3::new(x, y, z));
        session::pump_sources(&self.session);
    }

    /// Combined start/stop action, same as pressing the button.
    pub fn toggle(&self) {
        session::dispatch(&self.session, ThereminEvent::TogglePressed);
    }

    /// Stop any running voice and release the capture device.
    pub fn dispose(&self) {
        session::dispose(&self.session);
    }
}
