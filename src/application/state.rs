use crate::config::Config;
use crate::core::events::*;
use crate::core::models::{DialFrame, TimerPhase};
use crate::core::traits::RenderSink;
use crate::modules::timer::controller::PlaybackController;
use crate::modules::ui::progress_formatter::format_time;

/// Complete application state (single source of truth for rendering)
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let ui = UiState {
            selected_minutes: config.default_minutes,
            presets: config.presets.clone(),
            sound: config.sound,
            ..UiState::default()
        };
        Self { ui }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    // Dial
    pub dial: DialFrame,
    pub phase: TimerPhase,
    pub button_label: String,
    pub selected_minutes: u32,
    pub presets: Vec<u32>,
    pub progress: f64,
    pub sound: bool,

    // Tasks
    pub tasks: Vec<String>,
    pub selected_task: Option<usize>,
    pub input_active: bool,
    pub input_buffer: String,

    // Messages
    pub notice: Option<String>,
    pub status_message: String,
    pub error_message: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dial: DialFrame::default(),
            phase: TimerPhase::Idle,
            button_label: "Start".to_string(),
            selected_minutes: crate::utils::DEFAULT_MINUTES,
            presets: crate::utils::DEFAULT_PRESETS.to_vec(),
            progress: 0.0,
            sound: true,
            tasks: Vec::new(),
            selected_task: None,
            input_active: false,
            input_buffer: String::new(),
            notice: None,
            status_message: "Welcome".to_string(),
            error_message: None,
        }
    }
}

impl RenderSink for DialFrame {
    fn render(&mut self, angle_deg: f64, time_text: &str) {
        self.angle_deg = angle_deg;
        self.time_text.clear();
        self.time_text.push_str(time_text);
    }
}

impl UiState {
    /// Copy the controller's observable timer state into the view
    pub fn sync_timer(&mut self, controller: &PlaybackController) {
        self.phase = controller.phase();
        self.button_label = controller.button_label().to_string();
        self.selected_minutes = controller.selected_minutes();
        self.progress = controller.countdown().progress_fraction();
    }

    pub fn notice_open(&self) -> bool {
        self.notice.is_some()
    }
}

impl AppState {
    /// Update state based on an event
    pub fn apply_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Timer(te) => match te {
                TimerEvent::Started => {
                    self.ui.status_message = "Focus".to_string();
                    self.ui.error_message = None;
                }
                TimerEvent::Paused { remaining_ms } => {
                    self.ui.status_message =
                        format!("Paused with {} left", format_time(*remaining_ms as i64));
                }
                TimerEvent::Reset { duration_ms } => {
                    self.ui.status_message =
                        format!("Ready for {}", format_time(*duration_ms as i64));
                }
                TimerEvent::Completed => {
                    self.ui.status_message = "Session complete".to_string();
                }
                _ => {}
            },

            AppEvent::Tasks(te) => match te {
                TaskEvent::Loaded { tasks } => {
                    self.ui.tasks = tasks.clone();
                    self.ui.selected_task = match self.ui.selected_task {
                        _ if tasks.is_empty() => None,
                        Some(i) => Some(i.min(tasks.len() - 1)),
                        None => Some(0),
                    };
                }
                _ => {}
            },

            AppEvent::Ui(ue) => match ue {
                UiEvent::SelectionChanged { index } => {
                    if *index < self.ui.tasks.len() {
                        self.ui.selected_task = Some(*index);
                    }
                }
                UiEvent::InputToggled { active } => {
                    self.ui.input_active = *active;
                    self.ui.input_buffer.clear();
                }
                UiEvent::InputChanged { text } => {
                    self.ui.input_buffer = text.clone();
                }
                UiEvent::NoticeRaised { message } => {
                    self.ui.notice = Some(message.clone());
                }
                UiEvent::NoticeDismissed => {
                    self.ui.notice = None;
                }
                UiEvent::ShowMessage { message } => {
                    self.ui.status_message = message.clone();
                    self.ui.error_message = None;
                }
                UiEvent::ShowError { message } => {
                    self.ui.error_message = Some(message.clone());
                }
                UiEvent::QuitRequested => {}
            },

            AppEvent::Shutdown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(tasks: &[&str]) -> AppEvent {
        AppEvent::Tasks(TaskEvent::Loaded {
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        })
    }

    #[test]
    fn dial_frame_records_render_calls() {
        let mut frame = DialFrame::default();
        frame.render(90.5, "12:34");
        assert_eq!(frame.angle_deg, 90.5);
        assert_eq!(frame.time_text, "12:34");
    }

    #[test]
    fn selection_follows_task_list() {
        let mut state = AppState::default();
        state.apply_event(&loaded(&["a", "b", "c"]));
        assert_eq!(state.ui.selected_task, Some(0));

        state.apply_event(&AppEvent::Ui(UiEvent::SelectionChanged { index: 2 }));
        assert_eq!(state.ui.selected_task, Some(2));

        // Deleting the last item pulls the selection back in range.
        state.apply_event(&loaded(&["a", "b"]));
        assert_eq!(state.ui.selected_task, Some(1));

        state.apply_event(&loaded(&[]));
        assert_eq!(state.ui.selected_task, None);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut state = AppState::default();
        state.apply_event(&loaded(&["a"]));
        state.apply_event(&AppEvent::Ui(UiEvent::SelectionChanged { index: 4 }));
        assert_eq!(state.ui.selected_task, Some(0));
    }

    #[test]
    fn notice_opens_and_closes() {
        let mut state = AppState::default();
        state.apply_event(&AppEvent::Ui(UiEvent::NoticeRaised {
            message: "done".to_string(),
        }));
        assert!(state.ui.notice_open());
        state.apply_event(&AppEvent::Ui(UiEvent::NoticeDismissed));
        assert!(!state.ui.notice_open());
    }

    #[test]
    fn toggling_input_clears_buffer() {
        let mut state = AppState::default();
        state.apply_event(&AppEvent::Ui(UiEvent::InputToggled { active: true }));
        state.apply_event(&AppEvent::Ui(UiEvent::InputChanged {
            text: "draft".to_string(),
        }));
        assert_eq!(state.ui.input_buffer, "draft");
        state.apply_event(&AppEvent::Ui(UiEvent::InputToggled { active: false }));
        assert!(!state.ui.input_active);
        assert!(state.ui.input_buffer.is_empty());
    }
}
