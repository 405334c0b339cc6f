//! Hosts pre-rendered table markup and turns clicks and changes on its
//! `data-action` elements back into controller messages.

use taskdash_core::Msg;
use wasm_bindgen::JsCast;
use web_sys::{
  Element,
  Event,
  HtmlSelectElement
};
use yew::{
  AttrValue,
  Callback,
  Classes,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ActionRegionProps {
  pub markup: AttrValue,
  pub on_msg: Callback<Msg>,
  #[prop_or_default]
  pub class:  Classes
}

#[function_component(ActionRegion)]
pub fn action_region(
  props: &ActionRegionProps
) -> Html {
  let onclick = {
    let on_msg = props.on_msg.clone();
    Callback::from(move |e: MouseEvent| {
      if let Some(msg) =
        decode_action(&e, None)
      {
        on_msg.emit(msg);
      }
    })
  };
  let onchange = {
    let on_msg = props.on_msg.clone();
    Callback::from(move |e: Event| {
      let value = e
        .target_dyn_into::<HtmlSelectElement>()
        .map(|select| select.value());
      if let Some(msg) =
        decode_action(&e, value.as_deref())
      {
        on_msg.emit(msg);
      }
    })
  };

  html! {
      <div class={props.class.clone()} {onclick} {onchange}>
          { Html::from_html_unchecked(props.markup.clone()) }
      </div>
  }
}

fn decode_action(
  event: &Event,
  value: Option<&str>
) -> Option<Msg> {
  let element = event
    .target()?
    .dyn_into::<Element>()
    .ok()?
    .closest("[data-action]")
    .ok()??;
  let action =
    element.get_attribute("data-action")?;
  let id = element
    .get_attribute("data-id")
    .or_else(|| {
      element.get_attribute("data-page")
    });

  let msg = Msg::from_ui_action(
    &action,
    id.as_deref(),
    value
  );
  if msg.is_none() && value.is_some() {
    tracing::warn!(
      %action,
      id = ?id,
      "unrecognized table action"
    );
  }
  msg
}
