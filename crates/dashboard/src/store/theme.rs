use dashboard_api::ThemeMode;

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeState {
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Copy)]
pub enum ThemeAction {
    Toggle,
    Set(ThemeMode),
}

pub fn reduce(state: &mut ThemeState, action: &ThemeAction) -> bool {
    let next = match action {
        ThemeAction::Toggle => state.mode.toggled(),
        ThemeAction::Set(mode) => *mode,
    };
    let changed = next != state.mode;
    state.mode = next;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_set_is_idempotent() {
        let mut state = ThemeState::default();
        assert!(reduce(&mut state, &ThemeAction::Toggle));
        assert_eq!(state.mode, ThemeMode::Dark);
        assert!(!reduce(&mut state, &ThemeAction::Set(ThemeMode::Dark)));
        assert!(reduce(&mut state, &ThemeAction::Toggle));
        assert_eq!(state.mode, ThemeMode::Light);
    }
}
