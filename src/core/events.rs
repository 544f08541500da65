/// All events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // Timer events
    Timer(TimerEvent),

    // Task list events
    Tasks(TaskEvent),

    // UI events
    Ui(UiEvent),

    // Application lifecycle
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// A preset button was chosen (whole minutes)
    PresetSelected { minutes: u32 },

    /// Start/pause button pressed
    StartPauseRequested,

    /// Reset button pressed
    ResetRequested,

    /// The display is ready for the next frame
    FrameElapsed,

    /// Countdown started or resumed
    Started,

    /// Countdown paused with this much time left
    Paused { remaining_ms: u64 },

    /// Countdown returned to its full duration
    Reset { duration_ms: u64 },

    /// Countdown reached zero
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// User submitted a new task
    AddRequested { text: String },

    /// User asked to delete the task at this position
    DeleteRequested { index: usize },

    /// Task list (re)loaded from storage
    Loaded { tasks: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// User changed task selection
    SelectionChanged { index: usize },

    /// Task text entry opened or closed
    InputToggled { active: bool },

    /// Task text entry buffer changed
    InputChanged { text: String },

    /// Completion acknowledgement became due
    NoticeRaised { message: String },

    /// User acknowledged the completion notice
    NoticeDismissed,

    /// User requested quit
    QuitRequested,

    /// Display message to user
    ShowMessage { message: String },

    /// Display error to user
    ShowError { message: String },
}

/// Type alias for event sender
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;
