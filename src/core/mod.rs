//! Core business logic, independent of any user interface.
//!
//! Each module owns one area of the workshop: the catalog (categories and
//! parts), the people side (clients, equipment, appointments), the order
//! book, and the inspection wizard with its checklist templates. All state
//! lives in the database; these functions take a connection and return
//! domain models.

/// Service appointment scheduling
pub mod appointment;
/// Category tree and referential integrity over denormalized part fields
pub mod category;
/// Checklist templates the inspection wizard instantiates
pub mod checklist_type;
/// Client registry
pub mod client;
/// Sequential ID issuing via the counters table
pub mod counter;
/// Equipment owned by clients
pub mod equipment;
/// CSV export of parts and service orders
pub mod export;
/// Spreadsheet import of parts
pub mod import;
/// Inspection submit and edit flows
pub mod inspection;
/// Parts catalog
pub mod part;
/// Service order book
pub mod service_order;
/// The six-step inspection wizard state machine
pub mod wizard;
