//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod appointment;
pub mod category;
pub mod checklist_type;
pub mod client;
pub mod counter;
pub mod equipment;
pub mod inspection;
pub mod part;
pub mod service_order;

// Re-export specific types to avoid conflicts
pub use appointment::{Column as AppointmentColumn, Entity as Appointment, Model as AppointmentModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use checklist_type::{
    Column as ChecklistTypeColumn, Entity as ChecklistType, Model as ChecklistTypeModel,
};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use counter::{Column as CounterColumn, Entity as Counter, Model as CounterModel};
pub use equipment::{Column as EquipmentColumn, Entity as Equipment, Model as EquipmentModel};
pub use inspection::{Column as InspectionColumn, Entity as Inspection, Model as InspectionModel};
pub use part::{Column as PartColumn, Entity as Part, Model as PartModel};
pub use service_order::{
    Column as ServiceOrderColumn, Entity as ServiceOrder, Model as ServiceOrderModel,
};
