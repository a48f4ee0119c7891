use theremin_core::AudioCommand;
use wasm_bindgen::JsValue;
use web_sys as web;

/// The live audio graph: one oscillator routed through one gain node into
/// the context destination. The engine guarantees at most one voice; the
/// graph just translates its commands onto Web Audio calls and no-ops when
/// no oscillator exists.
pub struct AudioGraph {
    ctx: web::AudioContext,
    gain: web::GainNode,
    oscillator: Option<web::OscillatorNode>,
}

impl AudioGraph {
    pub fn new() -> Result<Self, JsValue> {
        let ctx = web::AudioContext::new()?;
        let gain = web::GainNode::new(&ctx)?;
        gain.gain().set_value(0.5);
        Ok(Self {
            ctx,
            gain,
            oscillator: None,
        })
    }

    /// The browser keeps the context suspended until a user gesture; the
    /// session awaits this promise and feeds `OutputReady` back in.
    pub fn resume(&self) -> Result<js_sys::Promise, JsValue> {
        self.ctx.resume()
    }

    pub fn apply(&mut self, command: &AudioCommand) {
        match command {
            // Handled asynchronously by the session.
            AudioCommand::RequestResume => {}
            AudioCommand::Start {
                frequency_hz, gain, ..
            } => self.start(*frequency_hz, *gain),
            AudioCommand::SetFrequency {
                frequency_hz,
                ramp_tau_sec,
            } => {
                if let Some(osc) = &self.oscillator {
                    let now = self.ctx.current_time();
                    let _ = osc
                        .frequency()
                        .set_target_at_time(*frequency_hz, now, *ramp_tau_sec as f64);
                }
            }
            AudioCommand::SetGain { gain, ramp_tau_sec } => {
                if self.oscillator.is_some() {
                    let now = self.ctx.current_time();
                    let _ = self
                        .gain
                        .gain()
                        .set_target_at_time(*gain, now, *ramp_tau_sec as f64);
                }
            }
            AudioCommand::Stop { .. } => self.stop(),
        }
    }

    fn start(&mut self, frequency_hz: f32, gain: f32) {
        if self.oscillator.is_some() {
            log::warn!("oscillator already live on start; replacing it");
            self.stop();
        }
        let osc = match web::OscillatorNode::new(&self.ctx) {
            Ok(o) => o,
            Err(e) => {
                log::error!("OscillatorNode error: {:?}", e);
                return;
            }
        };
        osc.frequency().set_value(frequency_hz);
        self.gain.gain().set_value(gain);
        if let Err(e) = osc.connect_with_audio_node(&self.gain) {
            log::error!("connect error: {:?}", e);
            return;
        }
        if let Err(e) = self.gain.connect_with_audio_node(&self.ctx.destination()) {
            log::error!("connect error: {:?}", e);
            return;
        }
        if let Err(e) = osc.start() {
            log::error!("oscillator start error: {:?}", e);
            return;
        }
        self.oscillator = Some(osc);
    }

    fn stop(&mut self) {
        if let Some(osc) = self.oscillator.take() {
            let _ = osc.stop();
            let _ = osc.disconnect();
        }
    }
}
