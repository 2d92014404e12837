use runwatch::run::{assembled_name, base_name, queued_name, RunState};

#[test]
fn state_decodes_from_suffixes() {
    assert_eq!(RunState::of_name("Run1"), RunState::Incoming);
    assert_eq!(RunState::of_name("Run1_Ready"), RunState::Ready);
    assert_eq!(RunState::of_name("Run1_Ready_Queued"), RunState::Queued);
    assert_eq!(RunState::of_name("Run1_Assembled"), RunState::Assembled);
}

#[test]
fn queued_and_assembled_dominate_ready() {
    assert_eq!(RunState::of_name("Run1_Ready_Queued"), RunState::Queued);
    // An assembled name never regresses, whatever else it contains.
    assert_eq!(RunState::of_name("Run1_Ready_Assembled"), RunState::Assembled);
}

#[test]
fn collision_suffix_does_not_change_state() {
    assert_eq!(RunState::of_name("Run1_Ready_Queued_1"), RunState::Queued);
    assert_eq!(RunState::of_name("Run1_Assembled_42"), RunState::Assembled);
}

#[test]
fn base_name_strips_all_tags() {
    assert_eq!(base_name("Run1"), "Run1");
    assert_eq!(base_name("Run1_Ready"), "Run1");
    assert_eq!(base_name("Run1_Ready_Queued"), "Run1");
    assert_eq!(base_name("Run1_Assembled"), "Run1");
}

#[test]
fn encode_is_deterministic() {
    assert_eq!(queued_name("Run1_Ready"), "Run1_Ready_Queued");
    assert_eq!(assembled_name("Run1_Ready_Queued"), "Run1_Assembled");
    assert_eq!(assembled_name("Run1_Ready"), "Run1_Assembled");
}
