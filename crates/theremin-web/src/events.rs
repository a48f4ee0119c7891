use std::cell::RefCell;
use std::rc::Rc;

use theremin_core::ThereminEvent;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::session::{self, Session};

/// Combined start/stop button: a press toggles the voice.
pub fn wire_start_button(document: &web::Document, session: &Rc<RefCell<Session>>) {
    let session = session.clone();
    dom::add_click_listener(document, "start-stop", move || {
        session::dispatch(&session, ThereminEvent::TogglePressed);
    });
}

/// Held-pointer modality on the render canvas: pointer down starts the
/// voice and opens the grip gate, pointer up stops it again.
pub fn wire_pointer_handlers(document: &web::Document, session: &Rc<RefCell<Session>>) {
    let Some(canvas) = document.get_element_by_id("render-canvas") else {
        log::warn!("missing #render-canvas; pointer input disabled");
        return;
    };

    {
        let session = session.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
                session.borrow_mut().grip.set_held(true);
                session::dispatch(&session, ThereminEvent::StartPressed);
            }) as Box<dyn FnMut(_)>);
        let _ =
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let session = session.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
                session.borrow_mut().grip.set_held(false);
                session::dispatch(&session, ThereminEvent::StopPressed);
            }) as Box<dyn FnMut(_)>);
        let _ =
            canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
