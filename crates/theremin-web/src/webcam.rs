use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Backing size of the capture element; the pose tracker's pixel-space
/// remap ranges assume this.
pub const CAPTURE_SIZE: u32 = 255;

/// Request the user's webcam and attach it to a `<video>` element appended
/// under `#video`. Permission denial surfaces as the returned `Err`; the
/// caller logs it and the theremin simply never receives tracking data.
pub async fn start_capture(
    document: &web::Document,
) -> Result<(web::MediaStream, web::HtmlVideoElement), JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);
    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream: web::MediaStream = JsFuture::from(promise).await?.dyn_into()?;

    let video: web::HtmlVideoElement = document.create_element("video")?.dyn_into()?;
    video.set_width(CAPTURE_SIZE);
    video.set_height(CAPTURE_SIZE);
    video.set_autoplay(true);
    video.set_src_object(Some(&stream));
    if let Some(slot) = document.get_element_by_id("video") {
        let _ = slot.append_child(&video);
    }
    Ok((stream, video))
}

/// Release the capture device.
pub fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}
