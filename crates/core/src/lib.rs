pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod view;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use chrono::Local;
use tracing::{debug, info, warn};

use errors::CoreError;
use models::{
    event::PageEvent,
    history::HistoryEntry,
    notification::{Notification, NotificationKind},
    report::REPORT_MIME,
    request::{FormField, PredictionRequest},
    result::{Estimate, PredictionResult},
    server::{ComparedCar, Comparison, ServerHistoryRecord},
    settings::ControllerSettings,
    theme::Theme,
};
use providers::http::COMPARE_MIN_MESSAGE;
use providers::traits::PredictionProvider;
use services::{
    advice_service, report_service,
    validation_service::{self, FieldMark},
};
use storage::{preferences::Preferences, traits::KeyValueStore};
use view::{PageView, ResultView, Section};

/// Shown after a successful estimate.
pub const PREDICTION_SUCCESS_MESSAGE: &str = "Price calculated successfully!";
/// Shown for any transport or parse failure; details go to the log only.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
/// Shown after the report download was triggered.
pub const REPORT_DOWNLOADED_MESSAGE: &str = "Report downloaded successfully!";

/// How one `predict_price` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// Rendered, stored in history, success toast shown.
    Estimated(Estimate),
    /// The service declined; its message was shown verbatim.
    Rejected(String),
    /// The call failed; the generic message was shown. Holds the cause.
    Failed(String),
}

/// Keeps the loading overlay up for as long as it lives.
///
/// Dropping the guard hides the overlay on every exit path, including a
/// prediction future that is dropped before it settles.
struct LoadingGuard<'a> {
    view: &'a dyn PageView,
}

impl<'a> LoadingGuard<'a> {
    fn show(view: &'a dyn PageView) -> Result<Self, CoreError> {
        view.set_loading(true)?;
        Ok(Self { view })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.view.set_loading(false) {
            warn!(error = %e, "failed to hide loading overlay");
        }
    }
}

/// Main entry point for the CarValue page.
///
/// Owns the preferences, the prediction client and the view, and maps
/// every [`PageEvent`] to its behaviour. Handlers take `&self`; two
/// submissions may be in flight at once, and whichever response settles
/// last is the one left on screen.
#[must_use]
pub struct PageController {
    settings: ControllerSettings,
    preferences: Preferences,
    provider: Box<dyn PredictionProvider>,
    view: Box<dyn PageView>,
    /// Mirror of the theme currently applied to the document.
    theme: Cell<Theme>,
    /// Observed elements that already received the reveal animation.
    revealed: RefCell<HashSet<String>>,
}

impl std::fmt::Debug for PageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("settings", &self.settings)
            .field("provider", &self.provider.name())
            .field("theme", &self.theme.get())
            .field("revealed", &self.revealed.borrow().len())
            .finish()
    }
}

impl PageController {
    pub fn new(
        settings: ControllerSettings,
        store: Box<dyn KeyValueStore>,
        provider: Box<dyn PredictionProvider>,
        view: Box<dyn PageView>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let preferences = Preferences::with_capacity(store, settings.history_capacity);
        Ok(Self {
            settings,
            preferences,
            provider,
            view,
            theme: Cell::new(Theme::default()),
            revealed: RefCell::new(HashSet::new()),
        })
    }

    /// Page-ready work that needs no event: restore remembered field
    /// values, then apply the stored theme.
    pub fn initialize(&self) -> Result<(), CoreError> {
        let restored = self.load_saved_data()?;
        let theme = self.load_theme()?;
        info!(restored_fields = restored, theme = %theme, "page initialised");
        Ok(())
    }

    /// Route one page event to its handler.
    pub async fn dispatch(&self, event: PageEvent) -> Result<(), CoreError> {
        debug!(event = event.name(), "dispatching page event");
        match event {
            PageEvent::Submit => {
                self.predict_price().await?;
            }
            PageEvent::ToggleTheme => {
                self.toggle_theme()?;
            }
            PageEvent::FieldBlur {
                field,
                value,
                constraint_satisfied,
            } => {
                self.validate_field(field, &value, constraint_satisfied)?;
            }
            PageEvent::FieldInput { field } => self.clear_field_marks(field)?,
            PageEvent::FieldChange { field, value } => self.remember_field(field, &value)?,
            PageEvent::ElementVisible { key } => {
                self.reveal(&key)?;
            }
            PageEvent::ScrollToPredict => self.scroll_to_predict()?,
            PageEvent::DownloadReport => {
                self.download_report()?;
            }
        }
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Theme currently applied to the document.
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Persisted prediction history, newest first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, CoreError> {
        self.preferences.history()
    }

    // ── Theme ───────────────────────────────────────────────────────

    /// Apply the persisted theme (light if none) to the document.
    pub fn load_theme(&self) -> Result<Theme, CoreError> {
        let theme = self.preferences.theme()?;
        self.view.apply_theme(theme)?;
        self.theme.set(theme);
        Ok(theme)
    }

    /// Flip between light and dark, persist the choice, and play the
    /// transition. Returns the new theme.
    pub fn toggle_theme(&self) -> Result<Theme, CoreError> {
        let next = self.theme.get().toggled();
        self.view.apply_theme(next)?;
        self.theme.set(next);
        self.preferences.set_theme(next)?;
        self.view.play_theme_transition()?;
        info!(theme = %next, "theme switched");
        Ok(next)
    }

    // ── Prediction ──────────────────────────────────────────────────

    /// Snapshot of the ten form fields, as typed.
    pub fn read_request(&self) -> Result<PredictionRequest, CoreError> {
        let mut request = PredictionRequest::default();
        for field in FormField::ALL {
            request.set(field, self.view.read_field(field)?);
        }
        Ok(request)
    }

    /// Read the form, ask the service for a valuation and show the result.
    ///
    /// The loading overlay is shown for the duration of the call and hidden
    /// once on every exit path. Failures never propagate as errors past the
    /// notification; only a broken view or store does.
    pub async fn predict_price(&self) -> Result<PredictionOutcome, CoreError> {
        let _loading = LoadingGuard::show(self.view.as_ref())?;
        let request = self.read_request()?;

        match self.request_and_render(request).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "prediction failed");
                self.show_notification(GENERIC_FAILURE_MESSAGE, NotificationKind::Error)?;
                Ok(PredictionOutcome::Failed(e.to_string()))
            }
        }
    }

    async fn request_and_render(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionOutcome, CoreError> {
        match self.provider.predict(&request).await? {
            PredictionResult::Success(estimate) => {
                self.display_result(&estimate)?;
                self.save_to_history(request, PredictionResult::Success(estimate.clone()))?;
                self.show_notification(PREDICTION_SUCCESS_MESSAGE, NotificationKind::Success)?;
                info!(price = %estimate.price, value = estimate.price_value, "estimate rendered");
                Ok(PredictionOutcome::Estimated(estimate))
            }
            PredictionResult::Failure { error } => {
                warn!(error = %error, "service rejected prediction request");
                self.show_notification(&error, NotificationKind::Error)?;
                Ok(PredictionOutcome::Rejected(error))
            }
        }
    }

    /// Write an estimate to the result card and bring it into view.
    pub fn display_result(&self, estimate: &Estimate) -> Result<(), CoreError> {
        self.view.render_result(&ResultView::from_estimate(estimate))?;
        self.view.scroll_into_view(Section::ResultCard)
    }

    // ── Field validation & memory ───────────────────────────────────

    /// Blur handler: style the field from its value and native validity.
    pub fn validate_field(
        &self,
        field: FormField,
        value: &str,
        constraint_satisfied: bool,
    ) -> Result<FieldMark, CoreError> {
        let mark = validation_service::validity_on_blur(value, constraint_satisfied);
        self.view.mark_field(field, mark)?;
        Ok(mark)
    }

    /// Input handler: drop any validation styling while the user types.
    pub fn clear_field_marks(&self, field: FormField) -> Result<(), CoreError> {
        self.view.clear_field_marks(field)
    }

    /// Put every remembered field value back into the form.
    /// Returns how many fields were restored.
    pub fn load_saved_data(&self) -> Result<usize, CoreError> {
        let mut restored = 0;
        for field in FormField::ALL {
            if let Some(value) = self.preferences.field_value(field)? {
                self.view.write_field(field, &value)?;
                restored += 1;
            }
        }
        Ok(restored)
    }

    /// Change handler: persist the field's committed value.
    pub fn remember_field(&self, field: FormField, value: &str) -> Result<(), CoreError> {
        self.preferences.remember_field(field, value)
    }

    /// Record a completed prediction at the head of the history.
    pub fn save_to_history(
        &self,
        request: PredictionRequest,
        result: PredictionResult,
    ) -> Result<usize, CoreError> {
        self.preferences
            .push_history(HistoryEntry::new(request, result))
    }

    // ── Notifications, animation, navigation ────────────────────────

    /// Show a toast that removes itself after the configured display and
    /// fade periods. Overlapping toasts are independent.
    pub fn show_notification(
        &self,
        message: &str,
        kind: NotificationKind,
    ) -> Result<Notification, CoreError> {
        let notification = Notification::new(
            message,
            kind,
            self.settings.notification_display(),
            self.settings.notification_fade(),
        );
        self.view.show_notification(&notification)?;
        Ok(notification)
    }

    /// Mark an observed element as revealed. Returns `false` when it
    /// already was, in which case the view is not touched.
    pub fn reveal(&self, key: &str) -> Result<bool, CoreError> {
        if !self.revealed.borrow_mut().insert(key.to_string()) {
            return Ok(false);
        }
        self.view.reveal(key)?;
        Ok(true)
    }

    pub fn scroll_to_predict(&self) -> Result<(), CoreError> {
        self.view.scroll_into_view(Section::PredictForm)
    }

    // ── Report ──────────────────────────────────────────────────────

    /// Download the displayed result as a plain-text report.
    /// Returns the report text.
    pub fn download_report(&self) -> Result<String, CoreError> {
        let fields = self.view.report_fields()?;
        let report = report_service::render_report(&fields, &Local::now());
        self.view
            .download(&self.settings.report_filename, REPORT_MIME, &report)?;
        self.show_notification(REPORT_DOWNLOADED_MESSAGE, NotificationKind::Success)?;
        Ok(report)
    }

    // ── Extras ──────────────────────────────────────────────────────

    /// Maintenance suggestions for the car currently in the form.
    pub fn maintenance_suggestions(&self) -> Result<Vec<&'static str>, CoreError> {
        let kms = self
            .view
            .read_field(FormField::Kms)?
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0);
        let year = self.view.read_field(FormField::Year)?;
        Ok(advice_service::suggest_maintenance(
            kms,
            &year,
            self.settings.reference_year,
        ))
    }

    /// The service's own log of recent predictions.
    pub async fn server_history(&self) -> Result<Vec<ServerHistoryRecord>, CoreError> {
        self.provider.server_history().await
    }

    /// Compare two or more estimates through the service.
    pub async fn compare(&self, estimates: &[Estimate]) -> Result<Comparison, CoreError> {
        if estimates.len() < 2 {
            return Err(CoreError::InvalidInput(COMPARE_MIN_MESSAGE.into()));
        }
        let cars: Vec<ComparedCar> = estimates.iter().map(ComparedCar::from).collect();
        self.provider.compare(&cars).await
    }
}
