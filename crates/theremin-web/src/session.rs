use std::cell::RefCell;
use std::rc::Rc;

use theremin_core::{
    AudioCommand, ControlSource, GripSource, OscillatorPhase, PoseSource, ThereminEngine,
    ThereminEvent,
};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::audio::AudioGraph;
use crate::dom;
use crate::webcam;

/// Everything one theremin instance owns: the lifecycle engine, the audio
/// graph it drives, the input adapters, and the DOM handles it updates.
/// All per-instance state lives here; no page-global mutables.
pub struct Session {
    pub engine: ThereminEngine,
    pub graph: AudioGraph,
    pub pose: PoseSource,
    pub grip: GripSource,
    button: Option<web::Element>,
    capture: Option<web::MediaStream>,
    video: Option<web::HtmlVideoElement>,
}

impl Session {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let engine = ThereminEngine::new(theremin_core::constants::POSE)?;
        let graph = AudioGraph::new().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let session = Self {
            engine,
            graph,
            pose: PoseSource::canonical(),
            grip: GripSource::new(),
            button: document.get_element_by_id("start-stop"),
            capture: None,
            video: None,
        };
        session.update_button_label();
        Ok(session)
    }

    pub fn set_capture(&mut self, stream: web::MediaStream, video: web::HtmlVideoElement) {
        self.capture = Some(stream);
        self.video = Some(video);
    }

    fn update_button_label(&self) {
        if let Some(button) = &self.button {
            let label = match self.engine.phase() {
                OscillatorPhase::Stopped => "Start sound",
                OscillatorPhase::Starting => "Starting...",
                OscillatorPhase::Running(_) => "Stop sound",
            };
            dom::set_label(button, label);
        }
    }
}

/// Run one event through the engine and apply the resulting commands.
/// `RequestResume` is the one async edge: the context resume is awaited off
/// this call stack and answered with `OutputReady`.
pub fn dispatch(session: &Rc<RefCell<Session>>, event: ThereminEvent) {
    let mut commands = Vec::new();
    {
        let mut s = session.borrow_mut();
        s.engine.handle(event, &mut commands);
        for command in &commands {
            s.graph.apply(command);
        }
        s.update_button_label();
    }
    if commands
        .iter()
        .any(|c| matches!(c, AudioCommand::RequestResume))
    {
        let session = session.clone();
        spawn_local(async move {
            let promise = session.borrow().graph.resume();
            match promise {
                Ok(p) => match JsFuture::from(p).await {
                    Ok(_) => dispatch(&session, ThereminEvent::OutputReady),
                    Err(e) => log::error!("AudioContext resume failed: {:?}", e),
                },
                Err(e) => log::error!("AudioContext resume failed: {:?}", e),
            }
        });
    }
}

/// Drain every input adapter and feed the pending moves through the engine.
pub fn pump_sources(session: &Rc<RefCell<Session>>) {
    let mut events = Vec::new();
    {
        let mut s = session.borrow_mut();
        s.pose.drain(&mut events);
        s.grip.drain(&mut events);
    }
    for event in events {
        dispatch(session, event);
    }
}

/// Tear down: stop any running voice and release the capture device.
pub fn dispose(session: &Rc<RefCell<Session>>) {
    dispatch(session, ThereminEvent::StopPressed);
    let mut s = session.borrow_mut();
    if let Some(stream) = s.capture.take() {
        webcam::stop_tracks(&stream);
    }
    if let Some(video) = s.video.take() {
        video.remove();
    }
}
