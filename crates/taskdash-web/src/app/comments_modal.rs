use taskdash_core::SubmitButton;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  function_component,
  html,
  use_state
};

use super::fields::on_input;

#[derive(Properties, PartialEq)]
pub struct CommentsModalProps {
  pub title:     AttrValue,
  /// Rendered comment list from the controller.
  pub thread:    AttrValue,
  pub busy:      bool,
  pub on_submit: Callback<String>,
  pub on_close:  Callback<()>
}

#[function_component(CommentsModal)]
pub fn comments_modal(
  props: &CommentsModalProps
) -> Html {
  let draft = use_state(String::new);

  let onsubmit = {
    let draft = draft.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit((*draft).clone());
    })
  };
  let on_cancel = props
    .on_close
    .reform(|_: MouseEvent| ());
  let button = SubmitButton::AddComment;

  html! {
      <div class="fixed inset-0 bg-gray-900/50 flex items-center justify-center z-50">
          <div class="bg-white rounded-lg shadow-xl w-full max-w-lg p-6">
              <h3 class="text-lg font-semibold text-gray-900 mb-4">{ format!("Comments: {}", props.title) }</h3>
              <div class="max-h-80 overflow-y-auto mb-4">
                  { Html::from_html_unchecked(props.thread.clone()) }
              </div>
              <form class="space-y-3" {onsubmit}>
                  <textarea
                      class="w-full px-3 py-2 border rounded"
                      rows="3"
                      placeholder="Write a comment"
                      value={(*draft).clone()}
                      oninput={on_input(&draft, |text: &mut String, v| *text = v)}
                  />
                  <div class="flex justify-end gap-3">
                      <button type="button" class="px-4 py-2 rounded-lg border text-sm" onclick={on_cancel}>{ "Close" }</button>
                      <button type="submit" class="px-4 py-2 rounded-lg bg-blue-600 text-white text-sm" disabled={props.busy}>
                          { button.label(props.busy) }
                      </button>
                  </div>
              </form>
          </div>
      </div>
  }
}
