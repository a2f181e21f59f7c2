pub mod advice_service;
pub mod category_service;
pub mod report_service;
pub mod validation_service;
