//! Database repositories module
//!
//! One repository per entity family, each owning its SQL.

pub mod camp;
pub mod design;
pub mod lead;
pub mod order;
pub mod research;
pub mod roster;
pub mod schedule;
pub mod travel;
pub mod user;

pub use camp::CampRepository;
pub use design::DesignRepository;
pub use lead::LeadRepository;
pub use order::OrderRepository;
pub use research::ResearchRepository;
pub use roster::RosterRepository;
pub use schedule::ScheduleRepository;
pub use travel::TravelRepository;
pub use user::UserRepository;
