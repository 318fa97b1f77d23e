use iced::widget::image::Handle;
use iced::widget::{button, column, container, progress_bar, radio, row, text, Column, Row};
use iced::{time, Alignment, Element, Length, Size, Subscription, Task, Theme};
use std::path::Path;
use std::sync::Arc;

mod batch;
mod error;
mod output;
mod selection;
mod state;
mod ui;

use batch::{CommandTransform, ImageTransform, PollReport};
use state::data::OutputFormat;
use state::session::Session;
use state::settings::Settings;

/// Main application state
struct BackgroundRemover {
    /// Selection, output target, history and the running batch
    session: Session,
    settings: Settings,
    /// Background removal routine shared with every worker
    transform: Arc<dyn ImageTransform>,
    /// Status message to display to the user
    status: String,
    /// Scaled copy of the latest result
    preview: Option<Handle>,
    /// Results applied in the current batch
    progress: f32,
    progress_max: f32,
    show_history: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Select File(s)"
    SelectFiles,
    /// User clicked "Select Folder"
    SelectFolder,
    /// User clicked "Select Save Location"
    SelectOutputFolder,
    FormatSelected(OutputFormat),
    StartProcessing,
    /// Poll timer fired while a batch is running
    Tick,
    ToggleHistory,
}

impl BackgroundRemover {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        let transform = CommandTransform::from_command_line(&settings.transform_command)
            .unwrap_or_else(|| {
                log::warn!("⚠️  Empty transform command in settings, using rembg");
                CommandTransform::default()
            });
        log::info!("🎨 Background remover ready ({:?})", transform);

        (
            BackgroundRemover {
                session: Session::new(settings.default_format),
                settings,
                transform: Arc::new(transform),
                status: "Waiting for input...".to_string(),
                preview: None,
                progress: 0.0,
                progress_max: 1.0,
                show_history: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectFiles => {
                if let Some(paths) = ui::dialogs::pick_images() {
                    let images = selection::filter_images(paths);
                    self.status = format!("{} images selected.", images.len());
                    self.session.set_inputs(images);
                }
            }
            Message::SelectFolder => {
                if let Some(folder) = ui::dialogs::pick_input_folder() {
                    match selection::scan_folder(&folder) {
                        Ok(images) => {
                            self.status = format!("{} images found in folder.", images.len());
                            self.session.set_inputs(images);
                        }
                        Err(e) => {
                            log::error!("❌ Cannot read {}: {}", folder.display(), e);
                            ui::dialogs::show_error("Error", &format!("Cannot read folder: {}", e));
                        }
                    }
                }
            }
            Message::SelectOutputFolder => {
                if let Some(folder) = ui::dialogs::pick_output_folder() {
                    self.status = format!("Save location selected: {}", folder.display());
                    self.session.set_output_folder(folder);
                }
            }
            Message::FormatSelected(format) => {
                self.session.set_format(format);
            }
            Message::StartProcessing => {
                self.start_processing();
            }
            Message::Tick => {
                if let Some(report) = self.session.poll() {
                    self.apply_report(report);
                }
            }
            Message::ToggleHistory => {
                self.show_history = !self.show_history;
            }
        }

        Task::none()
    }

    /// Validate the selection, ask about document mode and launch the worker
    fn start_processing(&mut self) {
        // Output folder is checked here, not when enabling the button
        if let Err(e) = self.session.check_ready() {
            ui::dialogs::show_error("Error", &e.to_string());
            return;
        }

        let document_mode = self
            .session
            .offers_document_mode(self.settings.document_threshold)
            && ui::dialogs::confirm_document_mode();

        match self.session.start_batch(document_mode, Arc::clone(&self.transform)) {
            Ok(()) => {
                let total = self.session.inputs().len();
                self.progress = 0.0;
                self.progress_max = total.max(1) as f32;
                self.status = format!("Processing {} images...", total);
            }
            Err(e) => {
                log::error!("❌ Could not start batch: {}", e);
                ui::dialogs::show_error("Error", &e.to_string());
            }
        }
    }

    /// Reflect one poll in the progress bar, status line and preview
    fn apply_report(&mut self, report: PollReport) {
        self.progress += report.processed.len() as f32;

        if let Some(latest) = report.processed.last() {
            self.status = format!("Processed: {}", file_name(&latest.source_path));
            self.preview = Some(ui::preview::preview_handle(
                &latest.image,
                self.settings.preview_width,
                self.settings.preview_height,
            ));
        }

        match report.finished {
            Some(Ok(_)) => {
                ui::dialogs::show_info("Success", "All images processed successfully!");
            }
            Some(Err(e)) => {
                log::error!("❌ Batch failed: {}", e);
                ui::dialogs::show_error("Error", &e.to_string());
            }
            None => {}
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let selection: Row<Message> = row![
            button("Select File(s)")
                .on_press(Message::SelectFiles)
                .padding(10),
            button("Select Folder")
                .on_press(Message::SelectFolder)
                .padding(10),
            button("Select Save Location")
                .on_press(Message::SelectOutputFolder)
                .padding(10),
        ]
        .spacing(20);

        let formats = OutputFormat::ALL.into_iter().fold(
            row![text("Save as:")].spacing(15).align_y(Alignment::Center),
            |formats, format| {
                formats.push(radio(
                    format.to_string(),
                    format,
                    Some(self.session.format()),
                    Message::FormatSelected,
                ))
            },
        );

        let start = button("Start Processing")
            .on_press_maybe(self.session.can_start().then_some(Message::StartProcessing))
            .padding(10);

        let history_label = if self.show_history { "Hide History" } else { "View History" };

        let preview_surface: Element<Message> = match &self.preview {
            Some(handle) => iced::widget::image(handle.clone()).into(),
            None => text("No preview yet").size(14).into(),
        };

        let mut content: Column<Message> = column![
            text("Background Remover").size(28),
            selection,
            progress_bar(0.0..=self.progress_max, self.progress)
                .width(Length::Fixed(500.0))
                .height(Length::Fixed(12.0)),
            text(match self.session.batch() {
                Some(batch) => format!("{} / {}", batch.completed(), batch.total()),
                None => String::new(),
            })
            .size(14),
            formats,
            row![
                start,
                button(history_label)
                    .on_press(Message::ToggleHistory)
                    .padding(10),
            ]
            .spacing(20),
            container(preview_surface)
                .style(container::rounded_box)
                .center_x(Length::Fixed(self.settings.preview_width as f32))
                .center_y(Length::Fixed(self.settings.preview_height as f32)),
            text(format!("Status: {}", self.status)).size(16),
        ]
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center);

        if self.show_history {
            content = content.push(ui::history::view(self.session.history()));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Poll the worker's queue only while a batch runs
    fn subscription(&self) -> Subscription<Message> {
        if self.session.is_processing() {
            time::every(self.settings.poll_interval()).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Base name of a path for status messages
fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application(
        "Background Remover",
        BackgroundRemover::update,
        BackgroundRemover::view,
    )
    .subscription(BackgroundRemover::subscription)
    .theme(BackgroundRemover::theme)
    .window_size(Size::new(800.0, 760.0))
    .centered()
    .run_with(BackgroundRemover::new)
}
