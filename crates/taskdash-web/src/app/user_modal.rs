use taskdash_core::SubmitButton;
use taskdash_core::forms::UserForm;
use taskdash_shared::Role;
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

use super::fields::{
  on_change,
  on_input
};

#[derive(Properties, PartialEq)]
pub struct UserModalProps {
  pub title:             AttrValue,
  pub form:              UserForm,
  /// Edits keep the stored password when the field is left blank.
  pub password_required: bool,
  pub button:            SubmitButton,
  pub busy:              bool,
  pub on_submit:         Callback<UserForm>,
  pub on_close:          Callback<()>
}

#[function_component(UserModal)]
pub fn user_modal(
  props: &UserModalProps
) -> Html {
  let draft = {
    let initial = props.form.clone();
    use_state(move || initial)
  };

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
  let password_hint =
    if props.password_required {
      "Password"
    } else {
      "Password (leave blank to keep current)"
    };

  html! {
      <div class="fixed inset-0 bg-gray-900/50 flex items-center justify-center z-50">
          <div class="bg-white rounded-lg shadow-xl w-full max-w-md p-6">
              <h3 class="text-lg font-semibold text-gray-900 mb-4">{ &props.title }</h3>
              <form class="space-y-4" {onsubmit}>
                  <label class="block text-sm text-gray-700">
                      { "Name" }
                      <input
                          type="text"
                          class="mt-1 w-full px-3 py-2 border rounded"
                          required={true}
                          value={draft.name.clone()}
                          oninput={on_input(&draft, |f: &mut UserForm, v| f.name = v)}
                      />
                  </label>
                  <label class="block text-sm text-gray-700">
                      { "Email" }
                      <input
                          type="email"
                          class="mt-1 w-full px-3 py-2 border rounded"
                          required={true}
                          value={draft.email.clone()}
                          oninput={on_input(&draft, |f: &mut UserForm, v| f.email = v)}
                      />
                  </label>
                  <label class="block text-sm text-gray-700">
                      { password_hint }
                      <input
                          type="password"
                          class="mt-1 w-full px-3 py-2 border rounded"
                          required={props.password_required}
                          value={draft.password.clone()}
                          oninput={on_input(&draft, |f: &mut UserForm, v| f.password = v)}
                      />
                  </label>
                  <label class="block text-sm text-gray-700">
                      { "Role" }
                      <select
                          class="mt-1 w-full px-3 py-2 border rounded"
                          onchange={on_change(&draft, |f: &mut UserForm, v| f.role = v)}
                      >
                          {
                              for [Role::Developer, Role::Admin].iter().map(|role| html! {
                                  <option value={role.as_str()} selected={role.as_str() == draft.role}>{ role.as_str() }</option>
                              })
                          }
                      </select>
                  </label>
                  <div class="flex justify-end gap-3 pt-2">
                      <button type="button" class="px-4 py-2 rounded-lg border text-sm" onclick={on_cancel}>{ "Cancel" }</button>
                      <button type="submit" class="px-4 py-2 rounded-lg bg-green-600 text-white text-sm" disabled={props.busy}>
                          { props.button.label(props.busy) }
                      </button>
                  </div>
              </form>
          </div>
      </div>
  }
}
