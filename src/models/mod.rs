//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod camp;
pub mod design;
pub mod lead;
pub mod message;
pub mod order;
pub mod research;
pub mod roster;
pub mod schedule;
pub mod travel;
pub mod user;

// Re-export commonly used models
pub use camp::{
    Camp, CreateCampRequest, CreateRegistrationRequest, Registration, RegistrationStatus,
    UpdateCampRequest, UpdateRegistrationRequest,
};
pub use design::{
    CreateDesignProjectRequest, CreateDesignVersionRequest, DesignProject, DesignStatus,
    DesignVersion, UpdateDesignProjectRequest,
};
pub use lead::{
    CreateLeadRequest, Lead, LeadProgressRequest, LeadStatus, LeadStep, UpdateLeadRequest,
};
pub use message::{ComposeRequest, MailFolder, MailMessage, MailboxSummary};
pub use order::{
    CreateOrderRequest, CreateStatusUpdateRequest, Order, OrderStatus, PaymentStatus,
    StatusUpdate, UpdateOrderRequest,
};
pub use research::{
    CreateResearchNoteRequest, ResearchKind, ResearchNote, UpdateResearchNoteRequest,
};
pub use roster::{
    AssignStaffRequest, CampStaff, CreateParticipantRequest, CreateStaffRequest, Participant,
    Staff, UpdateParticipantRequest, UpdateStaffRequest,
};
pub use schedule::{CreateScheduleEventRequest, ScheduleEvent, UpdateScheduleEventRequest};
pub use travel::{
    CreateTravelRequest, TravelArrangement, TravelKind, TravelerKind, UpdateTravelRequest,
};
pub use user::{
    CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, User, UserRole,
};
