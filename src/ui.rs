use crate::api::{AgentHandle, HttpAgentClient};
use crate::config;
use crate::views::{ChatView, HistoryView};
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppTab {
    Chat,
    History,
}

impl AppTab {
    pub const ALL: [AppTab; 2] = [AppTab::Chat, AppTab::History];

    pub fn label(self) -> &'static str {
        match self {
            AppTab::Chat => "Chat",
            AppTab::History => "History",
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| AgentHandle::new(HttpAgentClient::new(config::current())));
    let active_tab = use_signal(|| AppTab::Chat);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        AppHeader {}
        TabNavigation { active_tab }
        main { class: "main-container",
            TabPanels { active_tab }
        }
    }
}

#[component]
fn AppHeader() -> Element {
    rsx! {
        header { class: "header",
            div { class: "header-content",
                h1 { class: "header-title", "BikeHero AI Agent Interface" }
                span { class: "header-tagline", "Demo Mode - Single User" }
            }
        }
    }
}

/// Both panels stay mounted so the transcript and loaded history survive tab
/// switches; only the active one is visible.
#[component]
fn TabPanels(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView {} ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::History,
                children: rsx!( HistoryView { active: active_tab() == AppTab::History } ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        nav { class: "tabs",
            div { class: "tabs-inner",
                for tab in AppTab::ALL {
                    TabButton { active_tab, tab }
                }
            }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab { "tab active" } else { "tab" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| active_tab.set(tab),
            "{tab.label()}"
        }
    }
}
