use wasm_bindgen::JsCast;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent
};
use yew::{
  Callback,
  UseStateHandle
};

/// Current value of the input, select or textarea that fired `event`.
pub fn event_value(
  event: &Event
) -> Option<String> {
  let target = event.target()?;
  if let Some(input) =
    target.dyn_ref::<HtmlInputElement>()
  {
    return Some(input.value());
  }
  if let Some(select) =
    target.dyn_ref::<HtmlSelectElement>()
  {
    return Some(select.value());
  }
  target
    .dyn_ref::<HtmlTextAreaElement>()
    .map(HtmlTextAreaElement::value)
}

/// Writes typed text into one field of a draft.
pub fn on_input<T, F>(
  draft: &UseStateHandle<T>,
  apply: F
) -> Callback<InputEvent>
where
  T: Clone + 'static,
  F: Fn(&mut T, String) + 'static
{
  let draft = draft.clone();
  Callback::from(move |e: InputEvent| {
    if let Some(value) = event_value(&e) {
      let mut next = (*draft).clone();
      apply(&mut next, value);
      draft.set(next);
    }
  })
}

/// Like [`on_input`] for selects and date pickers.
pub fn on_change<T, F>(
  draft: &UseStateHandle<T>,
  apply: F
) -> Callback<Event>
where
  T: Clone + 'static,
  F: Fn(&mut T, String) + 'static
{
  let draft = draft.clone();
  Callback::from(move |e: Event| {
    if let Some(value) = event_value(&e) {
      let mut next = (*draft).clone();
      apply(&mut next, value);
      draft.set(next);
    }
  })
}
