use crate::application::state::UiState;
use crate::core::events::{AppEvent, TaskEvent, TimerEvent, UiEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate one key press into application events.
///
/// Shared by both renderers. Three modes, checked in order: an open notice
/// swallows everything but dismissal, task text entry captures printable
/// keys, and otherwise the normal bindings apply.
pub fn map_key(key: KeyEvent, state: &UiState) -> Vec<AppEvent> {
    if state.notice_open() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => vec![AppEvent::Ui(UiEvent::NoticeDismissed)],
            _ => Vec::new(),
        };
    }

    if state.input_active {
        return map_input_key(key, state);
    }

    let mut events = Vec::new();
    match key.code {
        KeyCode::Char('q') => events.push(AppEvent::Ui(UiEvent::QuitRequested)),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            events.push(AppEvent::Ui(UiEvent::QuitRequested));
        }
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c as usize - '0' as usize;
            if let Some(&minutes) = state.presets.get(slot - 1) {
                events.push(AppEvent::Timer(TimerEvent::PresetSelected { minutes }));
            }
        }
        KeyCode::Char(' ') => events.push(AppEvent::Timer(TimerEvent::StartPauseRequested)),
        KeyCode::Char('r') => events.push(AppEvent::Timer(TimerEvent::ResetRequested)),
        KeyCode::Char('a') => events.push(AppEvent::Ui(UiEvent::InputToggled { active: true })),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(index) = state.selected_task {
                events.push(AppEvent::Tasks(TaskEvent::DeleteRequested { index }));
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(index) = step_selection(state, false) {
                events.push(AppEvent::Ui(UiEvent::SelectionChanged { index }));
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(index) = step_selection(state, true) {
                events.push(AppEvent::Ui(UiEvent::SelectionChanged { index }));
            }
        }
        _ => {}
    }
    events
}

fn map_input_key(key: KeyEvent, state: &UiState) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Enter => vec![
            AppEvent::Tasks(TaskEvent::AddRequested {
                text: state.input_buffer.clone(),
            }),
            AppEvent::Ui(UiEvent::InputToggled { active: false }),
        ],
        KeyCode::Esc => vec![AppEvent::Ui(UiEvent::InputToggled { active: false })],
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![AppEvent::Ui(UiEvent::QuitRequested)]
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![AppEvent::Ui(UiEvent::InputChanged {
                text: String::new(),
            })]
        }
        KeyCode::Backspace => {
            let mut text = state.input_buffer.clone();
            text.pop();
            vec![AppEvent::Ui(UiEvent::InputChanged { text })]
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = state.input_buffer.clone();
            text.push(c);
            vec![AppEvent::Ui(UiEvent::InputChanged { text })]
        }
        _ => Vec::new(),
    }
}

/// Next task index in the given direction, wrapping at both ends.
fn step_selection(state: &UiState, down: bool) -> Option<usize> {
    let len = state.tasks.len();
    if len == 0 {
        return None;
    }
    Some(match (state.selected_task, down) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % len,
        (Some(0), false) => len - 1,
        (Some(i), false) => i - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_tasks(tasks: &[&str]) -> UiState {
        UiState {
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
            selected_task: Some(0),
            ..UiState::default()
        }
    }

    #[test]
    fn digits_select_configured_presets() {
        let state = UiState::default();
        assert_eq!(
            map_key(press(KeyCode::Char('2')), &state),
            vec![AppEvent::Timer(TimerEvent::PresetSelected { minutes: 5 })]
        );
        assert!(map_key(press(KeyCode::Char('9')), &state).is_empty());
    }

    #[test]
    fn timer_bindings() {
        let state = UiState::default();
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), &state),
            vec![AppEvent::Timer(TimerEvent::StartPauseRequested)]
        );
        assert_eq!(
            map_key(press(KeyCode::Char('r')), &state),
            vec![AppEvent::Timer(TimerEvent::ResetRequested)]
        );
    }

    #[test]
    fn selection_wraps() {
        let mut state = with_tasks(&["a", "b", "c"]);
        assert_eq!(
            map_key(press(KeyCode::Up), &state),
            vec![AppEvent::Ui(UiEvent::SelectionChanged { index: 2 })]
        );
        state.selected_task = Some(2);
        assert_eq!(
            map_key(press(KeyCode::Down), &state),
            vec![AppEvent::Ui(UiEvent::SelectionChanged { index: 0 })]
        );
        assert!(map_key(press(KeyCode::Down), &UiState::default()).is_empty());
    }

    #[test]
    fn delete_targets_selected_task() {
        let mut state = with_tasks(&["a", "b"]);
        state.selected_task = Some(1);
        assert_eq!(
            map_key(press(KeyCode::Delete), &state),
            vec![AppEvent::Tasks(TaskEvent::DeleteRequested { index: 1 })]
        );
    }

    #[test]
    fn text_entry_captures_keys() {
        let mut state = UiState {
            input_active: true,
            input_buffer: "Writ".to_string(),
            ..UiState::default()
        };

        // 'q' types instead of quitting.
        assert_eq!(
            map_key(press(KeyCode::Char('q')), &state),
            vec![AppEvent::Ui(UiEvent::InputChanged {
                text: "Writq".to_string()
            })]
        );

        state.input_buffer = "Write report".to_string();
        assert_eq!(
            map_key(press(KeyCode::Enter), &state),
            vec![
                AppEvent::Tasks(TaskEvent::AddRequested {
                    text: "Write report".to_string()
                }),
                AppEvent::Ui(UiEvent::InputToggled { active: false }),
            ]
        );
    }

    #[test]
    fn control_chords_do_not_type_during_text_entry() {
        let state = UiState {
            input_active: true,
            input_buffer: "Read".to_string(),
            ..UiState::default()
        };
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        assert_eq!(
            map_key(ctrl('c'), &state),
            vec![AppEvent::Ui(UiEvent::QuitRequested)]
        );
        assert!(map_key(ctrl('x'), &state).is_empty());
        assert_eq!(
            map_key(ctrl('u'), &state),
            vec![AppEvent::Ui(UiEvent::InputChanged {
                text: String::new()
            })]
        );
    }

    #[test]
    fn open_notice_only_accepts_dismissal() {
        let state = UiState {
            notice: Some("done".to_string()),
            ..UiState::default()
        };
        assert!(map_key(press(KeyCode::Char(' ')), &state).is_empty());
        assert!(map_key(press(KeyCode::Char('q')), &state).is_empty());
        assert_eq!(
            map_key(press(KeyCode::Esc), &state),
            vec![AppEvent::Ui(UiEvent::NoticeDismissed)]
        );
    }
}
