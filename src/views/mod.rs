pub mod chat;
pub mod history;
pub mod shared;

pub use chat::ChatView;
pub use history::HistoryView;
