/// Read-only view of the outputs produced so far
use iced::widget::{column, container, scrollable, text, Column};
use iced::{Element, Length};

use crate::state::history::History;
use crate::Message;

/// Render the history list, oldest first
pub fn view(history: &History) -> Element<'_, Message> {
    let rows: Column<Message> = if history.is_empty() {
        column![text("No files produced yet.").size(14)]
    } else {
        Column::with_children(history.entries().iter().map(|entry| {
            text(format!(
                "{}  {}",
                entry.recorded_at.format("%H:%M:%S"),
                entry.path.display()
            ))
            .size(14)
            .into()
        }))
    };

    container(
        column![
            text("History").size(20),
            scrollable(rows.spacing(4)).height(Length::Fixed(200.0)),
        ]
        .spacing(10),
    )
    .padding(10)
    .width(Length::Fill)
    .into()
}
