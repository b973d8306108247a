//! New Event Wizard Example
//!
//! Walks a four-step "create event" wizard (metadata, source, processing,
//! summary) the way a dialog would: steps become valid as the user types,
//! the source step keeps its file selection in the shared data bag, and the
//! summary collects every step's entries for submission.
//!
//! Run with: cargo run -p stepwise --example new_event

use std::sync::{Arc, OnceLock};

use serde_json::json;
use stepwise::{HostView, SharedData, StepController, Wizard, WizardConfig, WizardQuery};
use stepwise_core::Property;

/// Selected files cannot be rebuilt from form data, so they live in the
/// shared bag instead of on the step.
#[derive(Debug, Clone, Default)]
struct SelectedTracks(Vec<String>);

struct MetadataStep {
    title: Property<String>,
}

impl StepController for MetadataStep {
    fn is_valid(&self) -> bool {
        !self.title.get().trim().is_empty()
    }

    fn reset(&self) {
        self.title.set_silent(String::new());
    }

    fn user_entries(&self) -> Option<serde_json::Value> {
        Some(json!({ "title": self.title.get() }))
    }
}

struct SourceStep {
    upload: Property<bool>,
    shared: OnceLock<Arc<SharedData>>,
    wizard: OnceLock<WizardQuery>,
    track_summary: Property<Vec<String>>,
}

impl SourceStep {
    fn new(upload: bool) -> Self {
        Self {
            upload: Property::new(upload),
            shared: OnceLock::new(),
            wizard: OnceLock::new(),
            track_summary: Property::new(Vec::new()),
        }
    }

    fn select_file(&self, file: &str) {
        if let Some(shared) = self.shared.get() {
            if shared
                .with_mut(|tracks: &mut SelectedTracks| tracks.0.push(file.to_string()))
                .is_none()
            {
                shared.insert(SelectedTracks(vec![file.to_string()]));
            }
        }
    }

    fn selected(&self) -> Vec<String> {
        self.shared
            .get()
            .and_then(|shared| shared.get::<SelectedTracks>())
            .unwrap_or_default()
            .0
    }
}

impl StepController for SourceStep {
    fn is_valid(&self) -> bool {
        !self.upload.get() || !self.selected().is_empty()
    }

    fn on_exit_step(&self) {
        self.track_summary.set(self.selected());
    }

    fn attach(&self, wizard: WizardQuery) {
        let _ = self.wizard.set(wizard);
    }

    fn attach_shared_data(&self, data: Arc<SharedData>) {
        let _ = self.shared.set(data);
    }

    fn user_entries(&self) -> Option<serde_json::Value> {
        let on_summary = self
            .wizard
            .get()
            .and_then(WizardQuery::current_step_name)
            .is_some_and(|name| name == "summary");
        Some(json!({
            "type": if self.upload.get() { "UPLOAD" } else { "SCHEDULE_SINGLE" },
            "tracks": self.track_summary.get(),
            "reviewed": on_summary,
        }))
    }
}

struct ProcessingStep;

impl StepController for ProcessingStep {
    fn is_valid(&self) -> bool {
        true
    }

    fn user_entries(&self) -> Option<serde_json::Value> {
        Some(json!({ "workflow": "fast" }))
    }
}

struct SummaryStep;

impl StepController for SummaryStep {
    fn is_valid(&self) -> bool {
        true
    }
}

struct ConsoleView;

impl HostView for ConsoleView {
    fn activate_tab(&self, name: &str) {
        println!("  [view] showing tab '{name}'");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WizardConfig::from_toml_str(
        r#"
        name = "EVENTS.EVENTS.NEW.CAPTION"
        action = "create"
        final_button_translation = "WIZARD.CREATE_EVENT"
        "#,
    )?;

    let metadata = Arc::new(MetadataStep {
        title: Property::new(String::new()),
    });
    let source = Arc::new(SourceStep::new(true));

    let wizard = Wizard::builder()
        .with_config(config)
        .with_step("metadata", metadata.clone())
        .with_step("source", source.clone())
        .with_step("processing", Arc::new(ProcessingStep))
        .with_step("summary", Arc::new(SummaryStep))
        .with_view(Arc::new(ConsoleView))
        .with_submit(|wizard| {
            let payload = serde_json::Value::Object(wizard.user_entries());
            println!("  [submit] {payload}");
        })
        .build()?;

    wizard.tab_changing().connect(|change| {
        println!("  [signal] {} -> {}", change.old, change.new);
    });

    println!("Jumping to the summary before entering a title:");
    if let Err(err) = wizard.to_tab("summary") {
        println!("  refused: {err}");
    }

    metadata.title.set("Lecture 1: Introduction".to_string());
    println!("Title entered, moving on:");
    wizard.to_tab("next")?;

    source.select_file("presenter.mp4");
    source.select_file("slides.mp4");
    println!("Tracks selected, skipping to the summary:");
    wizard.to_tab("summary")?;

    println!(
        "On '{}', last step: {}, final button: {}",
        wizard.current_state_name(),
        wizard.is_last(),
        wizard.final_button_label()
    );

    if wizard.is_all_completed() {
        wizard.submit();
    }

    Ok(())
}
