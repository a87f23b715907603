use crate::api::AgentHandle;
use crate::state::{HistoryDisplay, HistoryPanelState};
use crate::timestamp::format_history_timestamp;
use crate::types::HistoryRecord;
use crate::views::shared::{ErrorBanner, HumanTransferNotice, MultilineText};
use dioxus::prelude::*;

fn load_history(mut state: Signal<HistoryPanelState>, agent: AgentHandle) {
    let Some(pending) = state.with_mut(|history| history.begin_fetch()) else {
        return;
    };
    spawn(async move {
        let outcome = pending.run(agent.api()).await;
        state.with_mut(|history| history.finish_fetch(outcome));
    });
}

/// Past exchanges, fetched the first time the tab is shown and on Refresh.
#[component]
pub fn HistoryView(active: ReadOnlySignal<bool>) -> Element {
    let agent = use_context::<AgentHandle>();
    let state = use_signal(HistoryPanelState::default);

    let first_load_agent = agent.clone();
    use_effect(move || {
        if active() && state.peek().needs_initial_fetch() {
            load_history(state, first_load_agent.clone());
        }
    });

    let snapshot = state();

    rsx! {
        div { class: "panel history-panel",
            div { class: "panel-header panel-header-row",
                h2 { class: "panel-title", "Chat History" }
                button {
                    class: "btn btn-primary btn-small", r#type: "button",
                    disabled: !snapshot.can_refresh(),
                    onclick: move |_| load_history(state, agent.clone()),
                    "{snapshot.refresh_label()}"
                }
            }

            div { class: "panel-body",
                if let Some(err) = snapshot.error() {
                    ErrorBanner { message: err.to_string(), class: "history-error" }
                }
                {match snapshot.display() {
                    HistoryDisplay::Loading => rsx! {
                        div { class: "history-placeholder",
                            div { class: "spinner" }
                            p { "Loading chat history..." }
                        }
                    },
                    HistoryDisplay::Empty => rsx! {
                        div { class: "history-placeholder",
                            p { class: "text-muted", "No chat history found" }
                        }
                    },
                    HistoryDisplay::Records(records) => rsx! {
                        div { class: "history-list",
                            for record in records.iter() {
                                HistoryCard { key: "{record.id}", record: record.clone() }
                            }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn HistoryCard(record: HistoryRecord) -> Element {
    rsx! {
        div { class: "history-card",
            div { class: "history-section",
                p { class: "history-label", "User Message" }
                p { class: "history-text", "{record.message}" }
                p { class: "history-time", "{format_history_timestamp(&record.created_at)}" }
            }
            div { class: "history-section history-response",
                p { class: "history-label", "AI Response" }
                div { class: "history-text",
                    MultilineText { text: record.response.clone() }
                }
                if record.requires_human() {
                    HumanTransferNotice {}
                }
            }
        }
    }
}
