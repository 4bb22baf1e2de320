//! `MediaBackend` over an HTML `<audio>` element

use crate::{
    backend::{MediaBackend, MediaSource},
    error::{PlaybackError, Result},
    events::MediaEvent,
    state::normalize_duration,
    store::EventSink,
};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

/// Drives the page's `<audio>` element
///
/// The element lives outside any page component, so playback survives
/// client-side navigation.
pub struct HtmlAudioBackend {
    element: HtmlAudioElement,
    sink: EventSink,
}

impl HtmlAudioBackend {
    /// Wrap `element`; asynchronous failures are reported through `sink`
    pub fn new(element: HtmlAudioElement, sink: EventSink) -> Self {
        Self { element, sink }
    }
}

impl MediaBackend for HtmlAudioBackend {
    fn load(&mut self, source: &MediaSource) -> Result<()> {
        if !source.mime_type.is_empty() && self.element.can_play_type(&source.mime_type).is_empty() {
            return Err(PlaybackError::UnsupportedSource(format!(
                "{} ({})",
                source.src, source.mime_type
            )));
        }

        self.element.set_src(&source.src);
        self.element.load();
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|err| PlaybackError::Backend(describe(&err)))?;

        // play() resolves later; a rejection (autoplay policy, bad source)
        // arrives as an error event
        let sink = Rc::clone(&self.sink);
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                // Interrupted by pause() or a new load; not a failure
                if error_name(&err).as_deref() == Some("AbortError") {
                    return;
                }
                sink(MediaEvent::Error {
                    message: describe(&err),
                });
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            tracing::warn!("pause() failed: {}", describe(&err));
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        normalize_duration(self.element.duration())
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn set_volume(&mut self, gain: f64) {
        self.element.set_volume(gain.clamp(0.0, 1.0));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
    }
}

fn error_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe(err: &JsValue) -> String {
    let message = js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string());

    match (error_name(err), message) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (None, Some(message)) => message,
        _ => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
