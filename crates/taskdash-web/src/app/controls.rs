use taskdash_core::Msg;
use taskdash_core::query::{
  SortDir,
  SortField
};
use taskdash_core::render::SelectOption;
use web_sys::{
  Event,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ListControlsProps {
  pub sort_by:          SortField,
  pub sort_dir:         SortDir,
  pub per_page:         u32,
  pub page_sizes:       Vec<u32>,
  pub assignee:         String,
  pub assignee_options: Vec<SelectOption>,
  pub show_assignee:    bool,
  pub on_msg:           Callback<Msg>
}

#[function_component(ListControls)]
pub fn list_controls(
  props: &ListControlsProps
) -> Html {
  let on_sort_field = select_msg(
    &props.on_msg,
    Msg::SortFieldChanged
  );
  let on_sort_dir = select_msg(
    &props.on_msg,
    Msg::SortDirChanged
  );
  let on_page_size = select_msg(
    &props.on_msg,
    Msg::PageSizeChanged
  );
  let on_assignee = select_msg(
    &props.on_msg,
    Msg::AssigneeFilterChanged
  );

  html! {
      <div class="px-6 py-4 flex flex-wrap gap-4 items-end border-b">
          <label class="text-sm text-gray-700">
              { "Sort by" }
              <select class="ml-2 px-2 py-1 border rounded" onchange={on_sort_field}>
                  {
                      for SortField::ALL.iter().map(|field| html! {
                          <option value={field.as_str()} selected={*field == props.sort_by}>{ field.label() }</option>
                      })
                  }
              </select>
          </label>
          <label class="text-sm text-gray-700">
              { "Order" }
              <select class="ml-2 px-2 py-1 border rounded" onchange={on_sort_dir}>
                  {
                      for [SortDir::Desc, SortDir::Asc].iter().map(|dir| html! {
                          <option value={dir.as_str()} selected={*dir == props.sort_dir}>{ dir.label() }</option>
                      })
                  }
              </select>
          </label>
          <label class="text-sm text-gray-700">
              { "Per page" }
              <select class="ml-2 px-2 py-1 border rounded" onchange={on_page_size}>
                  {
                      for props.page_sizes.iter().map(|size| html! {
                          <option value={size.to_string()} selected={*size == props.per_page}>{ size.to_string() }</option>
                      })
                  }
              </select>
          </label>
          {
              if props.show_assignee {
                  html! {
                      <label class="text-sm text-gray-700">
                          { "Assigned to" }
                          <select class="ml-2 px-2 py-1 border rounded" onchange={on_assignee}>
                              {
                                  for props.assignee_options.iter().map(|option| html! {
                                      <option value={option.value.clone()} selected={option.value == props.assignee}>{ &option.label }</option>
                                  })
                              }
                          </select>
                      </label>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}

fn select_msg(
  on_msg: &Callback<Msg>,
  make: fn(String) -> Msg
) -> Callback<Event> {
  let on_msg = on_msg.clone();
  Callback::from(move |e: Event| {
    if let Some(select) =
      e.target_dyn_into::<HtmlSelectElement>()
    {
      on_msg.emit(make(select.value()));
    } else {
      tracing::warn!(
        "list control event had \
         non-select target"
      );
    }
  })
}
