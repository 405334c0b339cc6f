mod action_region;
mod comments_modal;
mod controls;
mod fields;
mod host;
mod stats;
mod task_modal;
mod user_modal;

use taskdash_core::config::Settings;
use taskdash_core::{
  Dashboard,
  Modal,
  Msg,
  SubmitButton
};
use taskdash_shared::Role;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use self::action_region::ActionRegion;
use self::comments_modal::CommentsModal;
use self::controls::ListControls;
use self::host::Host;
use self::stats::StatsCards;
use self::task_modal::TaskModal;
use self::user_modal::UserModal;

#[derive(Properties, PartialEq)]
pub struct AppProps {
  pub role:     Role,
  pub settings: Settings
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let dashboard = {
    let role = props.role;
    let settings =
      props.settings.clone();
    use_mut_ref(move || {
      Dashboard::new(role, settings)
    })
  };
  let host = Host::new(
    dashboard.clone(),
    use_force_update()
  );

  {
    let host = host.clone();
    use_effect_with((), move |_| {
      tracing::info!(
        "dashboard mounted"
      );
      host.dispatch(Msg::Init);
      || ()
    });
  }

  let on_msg = {
    let host = host.clone();
    Callback::from(move |msg: Msg| {
      host.dispatch(msg)
    })
  };
  let on_logout = on_msg
    .reform(|_: MouseEvent| Msg::Logout);
  let on_add_task = on_msg
    .reform(|_: MouseEvent| {
      Msg::OpenAddTask
    });
  let on_add_user = on_msg
    .reform(|_: MouseEvent| {
      Msg::OpenAddUser
    });

  let dash = dashboard.borrow();
  let is_admin = dash.role().is_admin();
  let query = dash.query();

  html! {
      <div class="min-h-screen bg-gray-100">
          <header class="bg-white shadow">
              <div class="max-w-7xl mx-auto px-6 py-4 flex items-center justify-between">
                  <h1 class="text-2xl font-bold text-gray-900">{ "Task Management Dashboard" }</h1>
                  <div class="flex items-center gap-4">
                      <span class="text-sm text-gray-600">{ format!("Signed in as {}", dash.role().as_str()) }</span>
                      <button type="button" class="px-4 py-2 rounded-lg bg-gray-800 text-white text-sm" onclick={on_logout}>{ "Logout" }</button>
                  </div>
              </div>
          </header>

          <main class="max-w-7xl mx-auto px-6 py-6 space-y-6">
              <StatsCards stats={dash.stats().cloned()} />

              <section class="bg-white rounded-lg shadow">
                  <div class="px-6 py-4 border-b flex items-center justify-between">
                      <h2 class="text-lg font-semibold text-gray-900">{ "Tasks" }</h2>
                      {
                          if is_admin {
                              html! { <button type="button" class="px-4 py-2 rounded-lg bg-blue-600 text-white text-sm" onclick={on_add_task}>{ "Add Task" }</button> }
                          } else {
                              html! {}
                          }
                      }
                  </div>
                  <ListControls
                      sort_by={query.sort_by}
                      sort_dir={query.sort_dir}
                      per_page={query.per_page}
                      page_sizes={dash.page_size_options()}
                      assignee={query.assignee.as_value()}
                      assignee_options={dash.assignee_options()}
                      show_assignee={is_admin}
                      on_msg={on_msg.clone()}
                  />
                  <ActionRegion class="overflow-x-auto" markup={AttrValue::from(dash.render_task_table())} on_msg={on_msg.clone()} />
                  <ActionRegion markup={AttrValue::from(dash.render_pagination())} on_msg={on_msg.clone()} />
              </section>

              {
                  if is_admin {
                      html! {
                          <section class="bg-white rounded-lg shadow">
                              <div class="px-6 py-4 border-b flex items-center justify-between">
                                  <h2 class="text-lg font-semibold text-gray-900">{ "User Management" }</h2>
                                  <button type="button" class="px-4 py-2 rounded-lg bg-green-600 text-white text-sm" onclick={on_add_user}>{ "Add User" }</button>
                              </div>
                              <ActionRegion class="overflow-x-auto" markup={AttrValue::from(dash.render_users_table())} on_msg={on_msg.clone()} />
                          </section>
                      }
                  } else {
                      html! {}
                  }
              }
          </main>

          { modal_view(&dash, &on_msg) }
      </div>
  }
}

fn modal_view(
  dash: &Dashboard,
  on_msg: &Callback<Msg>
) -> Html {
  let on_close =
    on_msg.reform(|()| Msg::CloseModal);
  // Re-keying on each open discards the previous form's draft state.
  let key = dash.modal_epoch().to_string();

  match dash.modal() {
    | None => html! {},
    | Some(Modal::AddTask(form)) => {
      let button = SubmitButton::CreateTask;
      html! {
          <TaskModal
              key={key}
              title="Add New Task"
              form={form.clone()}
              developers={dash.developer_options()}
              {button}
              busy={dash.is_busy(button)}
              on_submit={on_msg.reform(Msg::SubmitNewTask)}
              {on_close}
          />
      }
    }
    | Some(Modal::EditTask {
      id,
      form
    }) => {
      let id = *id;
      let button = SubmitButton::UpdateTask;
      html! {
          <TaskModal
              key={key}
              title="Edit Task"
              form={form.clone()}
              developers={dash.developer_options()}
              {button}
              busy={dash.is_busy(button)}
              on_submit={on_msg.reform(move |form| Msg::SubmitTaskEdit(id, form))}
              {on_close}
          />
      }
    }
    | Some(Modal::AddUser(form)) => {
      let button = SubmitButton::CreateUser;
      html! {
          <UserModal
              key={key}
              title="Add New User"
              form={form.clone()}
              password_required={true}
              {button}
              busy={dash.is_busy(button)}
              on_submit={on_msg.reform(Msg::SubmitNewUser)}
              {on_close}
          />
      }
    }
    | Some(Modal::EditUser {
      id,
      form
    }) => {
      let id = *id;
      let button = SubmitButton::UpdateUser;
      html! {
          <UserModal
              key={key}
              title="Edit User"
              form={form.clone()}
              password_required={false}
              {button}
              busy={dash.is_busy(button)}
              on_submit={on_msg.reform(move |form| Msg::SubmitUserEdit(id, form))}
              {on_close}
          />
      }
    }
    | Some(Modal::Comments {
      id,
      title
    }) => {
      let id = *id;
      html! {
          <CommentsModal
              key={key}
              title={AttrValue::from(title.clone())}
              thread={AttrValue::from(dash.render_comments())}
              busy={dash.is_busy(SubmitButton::AddComment)}
              on_submit={on_msg.reform(move |text| Msg::SubmitComment(id, text))}
              {on_close}
          />
      }
    }
  }
}
