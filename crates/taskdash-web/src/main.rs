mod api;
mod app;
mod boot;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting task dashboard frontend"
  );

  let Some(mount) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.get_element_by_id("app")
    })
  else {
    tracing::error!(
      "missing #app mount element"
    );
    return;
  };

  let props = boot::read(&mount);
  yew::Renderer::<app::App>::with_root_and_props(
    mount, props
  )
  .render();
}
