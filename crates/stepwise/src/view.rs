//! The surrounding view, as seen by the wizard.

/// Callbacks into the view that renders the wizard.
///
/// The view owns tab affordances (enabled, locked, active) and the visible
/// pane. The wizard calls it after every committed transition.
pub trait HostView: Send + Sync {
    /// Visually activate the tab of step `name`.
    fn activate_tab(&self, name: &str);

    /// Move input focus to the first focusable element of step `name`.
    fn focus_first_input(&self, name: &str) {
        let _ = name;
    }
}
