pub mod enums;
pub mod menu_items;
pub mod ngo_partners;
pub mod order_items;
pub mod orders;
pub mod production_records;
pub mod surplus_broadcasts;
pub mod users;

pub use menu_items::Entity as MenuItems;
pub use ngo_partners::Entity as NgoPartners;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use production_records::Entity as ProductionRecords;
pub use surplus_broadcasts::Entity as SurplusBroadcasts;
pub use users::Entity as Users;
