mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod loading;
pub use loading::Loading;

mod pagination;
pub use pagination::Pagination;

mod map_preview;
pub use map_preview::MapPreview;

mod location_picker;
pub use location_picker::LocationPicker;

mod otp_input;
pub use otp_input::OtpInput;

mod customer_form;
pub use customer_form::CustomerForm;

mod region_select;
pub use region_select::RegionSelect;
