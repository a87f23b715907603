use dioxus::prelude::*;

pub const HUMAN_TRANSFER_NOTICE: &str = "⚠️Transfer to human agent required";

/// Lines of a message body; each `\n` becomes a line break when rendered.
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

#[component]
pub fn MultilineText(text: String) -> Element {
    let lines = text_lines(&text);
    let last = lines.len().saturating_sub(1);
    rsx! {
        for (i, line) in lines.iter().enumerate() {
            "{line}"
            if i < last {
                br {}
            }
        }
    }
}

#[component]
pub fn HumanTransferNotice() -> Element {
    rsx! {
        div { class: "human-transfer", role: "status", "{HUMAN_TRANSFER_NOTICE}" }
    }
}

#[component]
pub fn ErrorBanner(message: String, class: &'static str) -> Element {
    rsx! {
        div { class: "error-banner {class}", role: "alert",
            span { "{message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lines_keeps_blank_lines() {
        assert_eq!(
            text_lines("Basic: $20\n\nPremium: $45"),
            vec!["Basic: $20", "", "Premium: $45"]
        );
        assert_eq!(text_lines("single"), vec!["single"]);
    }
}
