use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Element, Event};

use crate::{
  error::ActionError,
  target::{AnimationEndHandler, AnimationTarget},
};

const ANIMATION_END: &str = "animationend";

/// Keeps an `animationend` handler attached to a DOM element.
pub struct DomListener {
  element: Element,
  closure: Closure<dyn FnMut(Event)>,
}

fn js_error(err: JsValue) -> ActionError { format!("{err:?}").into() }

impl AnimationTarget for Element {
  type Event = Event;
  type Listener = DomListener;

  fn add_class(&self, class: &str) -> Result<(), ActionError> {
    self.class_list().add_1(class).map_err(js_error)
  }

  fn remove_class(&self, class: &str) -> Result<(), ActionError> {
    self.class_list().remove_1(class).map_err(js_error)
  }

  fn animation_duration(&self) -> Option<String> {
    let style = web_sys::window()?
      .get_computed_style(self)
      .ok()??;
    style.get_property_value("animation-duration").ok()
  }

  fn listen_animation_end(&self, mut handler: AnimationEndHandler<Event>) -> DomListener {
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&event));
    if let Err(err) =
      self.add_event_listener_with_callback(ANIMATION_END, closure.as_ref().unchecked_ref())
    {
      log::warn!("failed to listen to `{ANIMATION_END}`: {err:?}");
    }
    DomListener { element: self.clone(), closure }
  }

  fn is_event_target(&self, event: &Event) -> bool {
    let this: &JsValue = self.as_ref();
    event
      .target()
      .is_some_and(|target| AsRef::<JsValue>::as_ref(&target) == this)
  }
}

impl Drop for DomListener {
  fn drop(&mut self) {
    if let Err(err) = self
      .element
      .remove_event_listener_with_callback(ANIMATION_END, self.closure.as_ref().unchecked_ref())
    {
      log::warn!("failed to stop listening to `{ANIMATION_END}`: {err:?}");
    }
  }
}
