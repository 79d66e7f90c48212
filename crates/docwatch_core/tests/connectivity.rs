use docwatch_core::{update, AppState, Effect, Msg, Notice};

#[test]
fn flips_notify_and_repeats_stay_quiet() {
    let (state, effects) = update(AppState::new(), Msg::ConnectivityChanged { online: false });
    assert_eq!(
        effects,
        vec![Effect::Notify {
            notice: Notice::warning("Connection lost - some features may be unavailable")
        }]
    );
    assert!(!state.view().online);

    let (state, effects) = update(state, Msg::ConnectivityChanged { online: false });
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::ConnectivityChanged { online: true });
    assert_eq!(
        effects,
        vec![Effect::Notify {
            notice: Notice::success("Connection restored")
        }]
    );
    assert!(state.view().online);
}
