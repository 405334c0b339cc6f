use taskdash_core::SubmitButton;
use taskdash_core::forms::TaskForm;
use taskdash_core::render::SelectOption;
use taskdash_shared::{
  TaskPriority,
  TaskStatus
};
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
pub struct TaskModalProps {
  pub title:      AttrValue,
  pub form:       TaskForm,
  pub developers: Vec<SelectOption>,
  pub button:     SubmitButton,
  pub busy:       bool,
  pub on_submit:  Callback<TaskForm>,
  pub on_close:   Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
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

  html! {
      <div class="fixed inset-0 bg-gray-900/50 flex items-center justify-center z-50">
          <div class="bg-white rounded-lg shadow-xl w-full max-w-lg p-6">
              <h3 class="text-lg font-semibold text-gray-900 mb-4">{ &props.title }</h3>
              <form class="space-y-4" {onsubmit}>
                  <label class="block text-sm text-gray-700">
                      { "Title" }
                      <input
                          type="text"
                          class="mt-1 w-full px-3 py-2 border rounded"
                          required={true}
                          value={draft.title.clone()}
                          oninput={on_input(&draft, |f: &mut TaskForm, v| f.title = v)}
                      />
                  </label>
                  <label class="block text-sm text-gray-700">
                      { "Description" }
                      <textarea
                          class="mt-1 w-full px-3 py-2 border rounded"
                          rows="3"
                          value={draft.description.clone()}
                          oninput={on_input(&draft, |f: &mut TaskForm, v| f.description = v)}
                      />
                  </label>
                  <label class="block text-sm text-gray-700">
                      { "Assign To" }
                      <select
                          class="mt-1 w-full px-3 py-2 border rounded"
                          onchange={on_change(&draft, |f: &mut TaskForm, v| f.assigned_to = v)}
                      >
                          {
                              for props.developers.iter().map(|option| html! {
                                  <option value={option.value.clone()} selected={option.value == draft.assigned_to}>{ &option.label }</option>
                              })
                          }
                      </select>
                  </label>
                  <div class="grid grid-cols-2 gap-4">
                      <label class="block text-sm text-gray-700">
                          { "Priority" }
                          <select
                              class="mt-1 w-full px-3 py-2 border rounded"
                              onchange={on_change(&draft, |f: &mut TaskForm, v| f.priority = v)}
                          >
                              {
                                  for TaskPriority::ALL.iter().map(|priority| html! {
                                      <option value={priority.as_str()} selected={priority.as_str() == draft.priority}>{ priority.as_str() }</option>
                                  })
                              }
                          </select>
                      </label>
                      <label class="block text-sm text-gray-700">
                          { "Status" }
                          <select
                              class="mt-1 w-full px-3 py-2 border rounded"
                              onchange={on_change(&draft, |f: &mut TaskForm, v| f.status = v)}
                          >
                              {
                                  for TaskStatus::ALL.iter().map(|status| html! {
                                      <option value={status.as_str()} selected={status.as_str() == draft.status}>{ status.as_str() }</option>
                                  })
                              }
                          </select>
                      </label>
                      <label class="block text-sm text-gray-700">
                          { "Start Date" }
                          <input
                              type="date"
                              class="mt-1 w-full px-3 py-2 border rounded"
                              value={draft.start_date.clone()}
                              onchange={on_change(&draft, |f: &mut TaskForm, v| f.start_date = v)}
                          />
                      </label>
                      <label class="block text-sm text-gray-700">
                          { "Due Date" }
                          <input
                              type="date"
                              class="mt-1 w-full px-3 py-2 border rounded"
                              value={draft.due_date.clone()}
                              onchange={on_change(&draft, |f: &mut TaskForm, v| f.due_date = v)}
                          />
                      </label>
                  </div>
                  <div class="flex justify-end gap-3 pt-2">
                      <button type="button" class="px-4 py-2 rounded-lg border text-sm" onclick={on_cancel}>{ "Cancel" }</button>
                      <button type="submit" class="px-4 py-2 rounded-lg bg-blue-600 text-white text-sm" disabled={props.busy}>
                          { props.button.label(props.busy) }
                      </button>
                  </div>
              </form>
          </div>
      </div>
  }
}
