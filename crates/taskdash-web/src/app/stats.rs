use taskdash_shared::DashboardStats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsCardsProps {
  pub stats: Option<DashboardStats>
}

#[function_component(StatsCards)]
pub fn stats_cards(
  props: &StatsCardsProps
) -> Html {
  let count = |pick: fn(&DashboardStats) -> u64| {
    props
      .stats
      .as_ref()
      .map(|stats| pick(stats).to_string())
      .unwrap_or_else(|| "-".to_string())
  };
  let cards = [
    ("Total Tasks", count(|s| s.total_tasks), "text-gray-900"),
    ("Completed", count(|s| s.completed_tasks), "text-green-600"),
    ("Pending", count(|s| s.pending_tasks), "text-yellow-600"),
    ("In Progress", count(|s| s.in_progress_tasks), "text-blue-600"),
    ("Overdue", count(|s| s.overdue_tasks), "text-red-600"),
  ];

  html! {
      <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
          {
              for cards.into_iter().map(|(label, value, tone)| html! {
                  <div class="bg-white rounded-lg shadow p-4">
                      <div class="text-sm text-gray-500">{ label }</div>
                      <div class={format!("text-2xl font-bold {tone}")}>{ value }</div>
                  </div>
              })
          }
      </div>
  }
}
