//! web-sys implementation of [`PageView`].

use carvalue_core::errors::CoreError;
use carvalue_core::models::notification::Notification;
use carvalue_core::models::report::ReportFields;
use carvalue_core::models::request::FormField;
use carvalue_core::models::theme::Theme;
use carvalue_core::services::validation_service::FieldMark;
use carvalue_core::view::{classes, ids, PageView, ResultView, Section};
use gloo_timers::callback::Timeout;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Url,
};

use crate::config::{reveal_selector, OBJECT_URL_LIFETIME_MS};

/// Best-effort text of a thrown JS value.
pub(crate) fn js_error(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn dom_error(context: &str, err: JsValue) -> CoreError {
    CoreError::Dom(format!("{context}: {}", js_error(err)))
}

/// Value and native validity of an `<input>` or `<select>`.
pub(crate) fn control_state(element: &Element) -> Option<(String, bool)> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some((input.value(), input.check_validity()));
    }
    element
        .dyn_ref::<HtmlSelectElement>()
        .map(|select| (select.value(), select.check_validity()))
}

fn set_control_value(element: &Element, value: &str) -> bool {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
        true
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
        true
    } else {
        false
    }
}

fn millis(duration: std::time::Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn element(&self, id: &str) -> Result<Element, CoreError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| CoreError::Dom(format!("#{id} missing")))
    }

    fn html_element(&self, id: &str) -> Result<HtmlElement, CoreError> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CoreError::Dom(format!("#{id} is not an HTML element")))
    }

    fn create(&self, tag: &str) -> Result<HtmlElement, CoreError> {
        self.document
            .create_element(tag)
            .map_err(|e| dom_error(tag, e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CoreError::Dom(format!("<{tag}> is not an HTML element")))
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), CoreError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn text(&self, id: &str) -> Result<String, CoreError> {
        Ok(self.element(id)?.text_content().unwrap_or_default())
    }

    /// `<div class=..><i class=..></i>text</div>`, text inserted as a text node.
    fn icon_row(&self, icon_class: &str, text: &str) -> Result<HtmlElement, CoreError> {
        let row = self.create("div")?;
        let icon = self.create("i")?;
        icon.set_class_name(icon_class);
        row.append_child(&icon).map_err(|e| dom_error("icon", e))?;
        row.append_child(&self.document.create_text_node(text))
            .map_err(|e| dom_error("text", e))?;
        Ok(row)
    }
}

impl PageView for DomView {
    fn read_field(&self, field: FormField) -> Result<String, CoreError> {
        let element = self.element(field.id())?;
        control_state(&element)
            .map(|(value, _)| value)
            .ok_or_else(|| CoreError::Dom(format!("#{field} is not a form control")))
    }

    fn write_field(&self, field: FormField, value: &str) -> Result<(), CoreError> {
        let element = self.element(field.id())?;
        if set_control_value(&element, value) {
            Ok(())
        } else {
            Err(CoreError::Dom(format!("#{field} is not a form control")))
        }
    }

    fn mark_field(&self, field: FormField, mark: FieldMark) -> Result<(), CoreError> {
        let (add, remove) = match mark {
            FieldMark::Valid => (FieldMark::Valid, FieldMark::Invalid),
            FieldMark::Invalid => (FieldMark::Invalid, FieldMark::Valid),
            FieldMark::Unmarked => return Ok(()),
        };
        let list = self.element(field.id())?.class_list();
        if let (Some(add), Some(remove)) = (add.class(), remove.class()) {
            list.add_1(add).map_err(|e| dom_error("classList.add", e))?;
            list.remove_1(remove)
                .map_err(|e| dom_error("classList.remove", e))?;
        }
        Ok(())
    }

    fn clear_field_marks(&self, field: FormField) -> Result<(), CoreError> {
        let list = self.element(field.id())?.class_list();
        for class in [FieldMark::Valid, FieldMark::Invalid]
            .iter()
            .filter_map(FieldMark::class)
        {
            list.remove_1(class)
                .map_err(|e| dom_error("classList.remove", e))?;
        }
        Ok(())
    }

    fn apply_theme(&self, theme: Theme) -> Result<(), CoreError> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| CoreError::Dom("no document element".into()))?;
        root.set_attribute(classes::THEME_ATTRIBUTE, theme.as_str())
            .map_err(|e| dom_error(classes::THEME_ATTRIBUTE, e))?;
        match self.document.get_element_by_id(ids::THEME_ICON) {
            Some(icon) => icon.set_class_name(theme.icon_class()),
            None => debug!("no #{} on this page", ids::THEME_ICON),
        }
        Ok(())
    }

    fn play_theme_transition(&self) -> Result<(), CoreError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| CoreError::Dom("no <body>".into()))?;
        body.style()
            .set_property("transition", "all 0.3s ease")
            .map_err(|e| dom_error("body.style", e))
    }

    fn set_loading(&self, visible: bool) -> Result<(), CoreError> {
        let list = self.element(ids::LOADING_OVERLAY)?.class_list();
        let result = if visible {
            list.add_1(classes::ACTIVE)
        } else {
            list.remove_1(classes::ACTIVE)
        };
        result.map_err(|e| dom_error(ids::LOADING_OVERLAY, e))
    }

    fn render_result(&self, result: &ResultView) -> Result<(), CoreError> {
        let price = self.element(ids::PRICE_DISPLAY)?;
        price.set_text_content(Some(&result.price));
        price
            .class_list()
            .add_1(classes::FADE_IN)
            .map_err(|e| dom_error(ids::PRICE_DISPLAY, e))?;
        self.set_text(ids::PRICE_RANGE, &result.category)?;

        if !result.has_insights() {
            return Ok(());
        }

        let list = self.element(ids::INSIGHTS_LIST)?;
        list.set_inner_html("");
        for insight in &result.insights {
            let row = self.icon_row("fas fa-info-circle me-2", &insight.text)?;
            row.set_class_name(&insight.class);
            list.append_child(&row)
                .map_err(|e| dom_error(ids::INSIGHTS_LIST, e))?;
        }
        self.set_text(ids::CAR_AGE, &result.car_age)?;
        self.set_text(ids::DEPRECIATION, &result.depreciation)?;
        self.html_element(ids::INSIGHTS_SECTION)?
            .style()
            .set_property("display", "block")
            .map_err(|e| dom_error(ids::INSIGHTS_SECTION, e))
    }

    fn show_notification(&self, notification: &Notification) -> Result<(), CoreError> {
        let toast = self.icon_row(notification.kind.icon_class(), &notification.message)?;
        toast.style().set_css_text(&notification.css_text());
        toast
            .set_attribute("data-notification", &notification.id.to_string())
            .map_err(|e| dom_error("toast", e))?;
        self.document
            .body()
            .ok_or_else(|| CoreError::Dom("no <body>".into()))?
            .append_child(&toast)
            .map_err(|e| dom_error("toast", e))?;

        let fade = notification.fade_out_animation();
        let fade_ms = millis(notification.fade);
        Timeout::new(millis(notification.display), move || {
            let _ = toast.style().set_property("animation", &fade);
            Timeout::new(fade_ms, move || toast.remove()).forget();
        })
        .forget();
        Ok(())
    }

    fn reveal(&self, key: &str) -> Result<(), CoreError> {
        let selector = reveal_selector(key);
        let element = self
            .document
            .query_selector(&selector)
            .map_err(|e| dom_error(&selector, e))?
            .ok_or_else(|| CoreError::Dom(format!("{selector} missing")))?;
        element
            .class_list()
            .add_1(classes::FADE_IN)
            .map_err(|e| dom_error(&selector, e))
    }

    fn scroll_into_view(&self, section: Section) -> Result<(), CoreError> {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        let block = JsValue::from_str(section.block());
        if let Some(block) = ScrollLogicalPosition::from_js_value(&block) {
            options.set_block(block);
        }
        self.element(section.element_id())?
            .scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }

    fn report_fields(&self) -> Result<ReportFields, CoreError> {
        Ok(ReportFields {
            price: self.text(ids::PRICE_DISPLAY)?,
            car_age: self.text(ids::CAR_AGE)?,
            depreciation: self.text(ids::DEPRECIATION)?,
        })
    }

    fn download(&self, filename: &str, mime: &str, contents: &str) -> Result<(), CoreError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| dom_error("Blob", e))?;
        let url =
            Url::create_object_url_with_blob(&blob).map_err(|e| dom_error("object URL", e))?;

        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(|e| dom_error("<a>", e))?
            .dyn_into()
            .map_err(|_| CoreError::Dom("<a> is not an anchor".into()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        // The click only queues the navigation to the blob URL.
        Timeout::new(OBJECT_URL_LIFETIME_MS, move || {
            let _ = Url::revoke_object_url(&url);
        })
        .forget();
        Ok(())
    }
}
