//! UI Components
//!
//! Pages and reusable Leptos components.

mod board_filters;
mod brokers_table;
mod coded_select;
mod dashboard_page;
mod delete_confirm_button;
mod kanban_board;
mod lead_card;
mod lead_form;
mod lead_profile;
mod leads_table;
mod nav_bar;
mod owner_profile;
mod owners_table;
mod price_input;
mod properties_table;
mod property_form;
mod property_profile;
mod reports_page;

pub use board_filters::BoardFilters;
pub use brokers_table::BrokersTable;
pub use coded_select::CodedSelect;
pub use dashboard_page::DashboardPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use kanban_board::KanbanBoard;
pub use lead_card::LeadCard;
pub use lead_form::LeadForm;
pub use lead_profile::LeadProfile;
pub use leads_table::LeadsTable;
pub use nav_bar::NavBar;
pub use owner_profile::OwnerProfile;
pub use owners_table::OwnersTable;
pub use price_input::PriceInput;
pub use properties_table::PropertiesTable;
pub use property_form::PropertyForm;
pub use property_profile::PropertyProfile;
pub use reports_page::ReportsPage;
