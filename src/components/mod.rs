//! UI Components
//!
//! Reusable Leptos components and the console pages built from them.

mod bulk_actions;
mod catalog_page;
mod contacts_page;
mod delete_confirm_button;
pub mod form_fields;
mod guest_filter_bar;
mod guest_form;
mod guest_list_mobile;
mod guest_table;
mod guests_page;
mod locations_page;
mod login_form;
mod navbar;
mod public_site;
mod settings_page;
mod tag_autocomplete;
mod tags_page;
mod toast_host;

pub use bulk_actions::BulkActionsBar;
pub use catalog_page::{CatalogKind, CatalogPage};
pub use contacts_page::ContactsPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use guest_filter_bar::GuestFilterBar;
pub use guest_form::GuestFormModal;
pub use guest_list_mobile::GuestListMobile;
pub use guest_table::GuestTable;
pub use guests_page::GuestsPage;
pub use locations_page::LocationsPage;
pub use login_form::LoginForm;
pub use navbar::{Navbar, Page};
pub use public_site::PublicSite;
pub use settings_page::SettingsPage;
pub use tag_autocomplete::TagAutocomplete;
pub use tags_page::TagsPage;
pub use toast_host::ToastHost;
