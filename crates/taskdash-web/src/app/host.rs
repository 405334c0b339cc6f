//! Carries out controller effects in the browser.

use std::cell::RefCell;
use std::rc::Rc;

use taskdash_core::{
  Dashboard,
  Effect,
  Msg
};
use yew::functional::UseForceUpdateHandle;

use crate::api;

#[derive(Clone)]
pub struct Host {
  dashboard: Rc<RefCell<Dashboard>>,
  refresh:   UseForceUpdateHandle
}

impl Host {
  pub fn new(
    dashboard: Rc<RefCell<Dashboard>>,
    refresh: UseForceUpdateHandle
  ) -> Self {
    Self {
      dashboard,
      refresh
    }
  }

  /// Feeds `msg` to the controller, re-renders, then runs the resulting
  /// effects. Requests complete asynchronously and re-enter here.
  pub fn dispatch(&self, msg: Msg) {
    let effects =
      self.dashboard.borrow_mut().handle(msg);
    self.refresh.force_update();
    for effect in effects {
      self.run(effect);
    }
  }

  fn run(&self, effect: Effect) {
    match effect {
      | Effect::Request {
        kind,
        request
      } => {
        let base = self
          .dashboard
          .borrow()
          .settings()
          .api_base
          .clone();
        let host = self.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let reply =
              api::send(&base, &request)
                .await;
            if let Err(err) = &reply {
              tracing::warn!(
                ?kind,
                error = %err,
                "request did not complete"
              );
            }
            host.dispatch(Msg::Completed {
              kind,
              reply
            });
          }
        );
      }
      | Effect::Alert(text) => {
        gloo::dialogs::alert(&text)
      }
      | Effect::Confirm {
        prompt,
        then
      } => {
        if gloo::dialogs::confirm(&prompt) {
          self.dispatch(then);
        } else {
          tracing::info!(
            action = then.label(),
            "confirmation declined"
          );
        }
      }
      | Effect::Navigate(to) => {
        tracing::info!(%to, "navigating away");
        if let Err(err) = gloo::utils::window()
          .location()
          .set_href(&to)
        {
          tracing::error!(
            ?err,
            "failed to navigate"
          );
        }
      }
    }
  }
}
