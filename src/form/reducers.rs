use super::state::FillState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillCommand {
    FocusNextField,
    FocusPrevField,
    FocusNextSection(i32),
}

pub fn apply_command(state: &mut FillState, command: FillCommand) {
    match command {
        FillCommand::FocusNextField => state.focus_next_field(),
        FillCommand::FocusPrevField => state.focus_prev_field(),
        FillCommand::FocusNextSection(delta) => state.focus_next_section(delta),
    }
}
