use crate::api::AgentHandle;
use crate::state::ChatPanelState;
use crate::types::{ChatMessage, Sender};
use crate::views::shared::{ErrorBanner, HumanTransferNotice, MultilineText};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

const EMPTY_TITLE: &str = "Start a conversation with the AI agent";
const EMPTY_HINT: &str = "Try asking: \"What are your maintenance packages?\"";

/// Enter sends; Shift+Enter is left to the textarea as a newline.
fn submits_on(key: &Key, shift: bool) -> bool {
    *key == Key::Enter && !shift
}

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    }
}

/// Admit the send, then post it in the background. `finish_send` runs on every
/// outcome so the loading flag always comes back down.
fn submit(mut state: Signal<ChatPanelState>, agent: AgentHandle, text: String) {
    let Some(pending) = state.with_mut(|chat| chat.begin_send(&text)) else {
        return;
    };
    spawn(async move {
        let outcome = pending.deliver(agent.api()).await;
        state.with_mut(|chat| chat.finish_send(outcome));
    });
}

/// Keep the newest bubble in view whenever the transcript grows.
fn use_scroll_to_latest(state: Signal<ChatPanelState>) -> Signal<Option<Rc<MountedData>>> {
    let anchor = use_signal(|| Option::<Rc<MountedData>>::None);
    let message_count = use_memo(move || state.read().messages().len());

    use_effect(move || {
        let _ = message_count();
        if let Some(target) = anchor.with_peek(|current| current.clone()) {
            spawn(async move {
                let _ = target.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    });

    anchor
}

#[component]
pub fn ChatView() -> Element {
    let agent = use_context::<AgentHandle>();
    let mut state = use_signal(ChatPanelState::default);
    let mut scroll_anchor = use_scroll_to_latest(state);

    let snapshot = state();
    let key_agent = agent.clone();
    let click_agent = agent;

    rsx! {
        div { class: "panel chat-panel",
            div { class: "panel-header",
                h2 { class: "panel-title", "Chat with AI Agent" }
                p { class: "panel-subtitle", "Ask me about BikeHero's maintenance services and pricing!" }
            }

            div { id: "chat-list", class: "chat-list",
                if snapshot.messages().is_empty() {
                    div { class: "chat-empty",
                        p { "{EMPTY_TITLE}" }
                        p { class: "hint", "{EMPTY_HINT}" }
                    }
                } else {
                    for msg in snapshot.messages().iter() {
                        MessageBubble { key: "{msg.id}", message: msg.clone() }
                    }
                }
                if snapshot.is_loading() {
                    TypingIndicator {}
                }
                div {
                    class: "scroll-anchor",
                    onmounted: move |ev| scroll_anchor.set(Some(ev.data())),
                }
            }

            if let Some(err) = snapshot.error() {
                ErrorBanner { message: err.to_string(), class: "chat-error" }
            }

            form { class: "composer", onsubmit: move |ev| ev.prevent_default(),
                div { class: "composer-inner",
                    textarea {
                        rows: "1",
                        placeholder: "Type your message...",
                        value: "{snapshot.input()}",
                        disabled: snapshot.is_loading(),
                        autofocus: true,
                        oninput: move |ev| state.with_mut(|chat| chat.set_input(ev.value())),
                        onkeydown: move |ev| {
                            if submits_on(&ev.key(), ev.modifiers().shift()) {
                                ev.prevent_default();
                                let text = state.peek().input().to_string();
                                submit(state, key_agent.clone(), text);
                            }
                        },
                    }
                    button {
                        class: "btn btn-primary", r#type: "button",
                        disabled: !snapshot.can_send(),
                        onclick: move |_| {
                            let text = state.peek().input().to_string();
                            submit(state, click_agent.clone(), text);
                        },
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let side = sender_class(message.sender);
    rsx! {
        div { class: "message-row {side}",
            div { class: "bubble {side}",
                div { class: "bubble-text",
                    MultilineText { text: message.text.clone() }
                }
                if message.requires_human() {
                    HumanTransferNotice {}
                }
                p { class: "message-timestamp", "{message.timestamp}" }
            }
        }
    }
}

#[component]
fn TypingIndicator() -> Element {
    rsx! {
        div { class: "message-row bot",
            div { class: "bubble bot typing", aria_label: "Agent is typing",
                span { class: "typing-dot" }
                span { class: "typing-dot", style: "animation-delay: 0.1s;" }
                span { class: "typing-dot", style: "animation-delay: 0.2s;" }
            }
        }
    }
}
