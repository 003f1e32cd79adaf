//! Test data helpers for creating request fixtures

use chrono::{Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;

use threadline::models::camp::CreateCampRequest;
use threadline::models::lead::CreateLeadRequest;
use threadline::models::order::CreateOrderRequest;
use threadline::models::roster::{CreateParticipantRequest, CreateStaffRequest};
use threadline::models::user::CreateUserRequest;

/// Helper function to create a user request with a given role
pub fn create_user_request(role: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: SafeEmail().fake(),
        display_name: Name().fake(),
        password: "correct-horse-battery".to_string(),
        role: role.to_string(),
        visible_pages: None,
    }
}

/// Helper function to create a lead request
pub fn create_lead_request() -> CreateLeadRequest {
    CreateLeadRequest {
        company_name: CompanyName().fake(),
        contact_name: Name().fake(),
        contact_email: Some(SafeEmail().fake()),
        contact_phone: None,
        source: Some("trade-show".to_string()),
        assigned_to: None,
        notes: None,
    }
}

/// Helper function to create an order request
pub fn create_order_request() -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: CompanyName().fake(),
        lead_id: None,
        garment_type: "hoodie".to_string(),
        quantity: 250,
        due_date: Some(Utc::now() + Duration::days(30)),
    }
}

/// Helper function to create a camp request with the given capacity
pub fn create_camp_request(capacity: i32) -> CreateCampRequest {
    let start = Utc::now() + Duration::days(14);
    CreateCampRequest {
        name: "Summer Stitch Camp".to_string(),
        location: Some("Lakeside Hall".to_string()),
        start_date: start,
        end_date: start + Duration::days(5),
        capacity,
        description: None,
    }
}

/// Helper function to create a participant request
pub fn create_participant_request() -> CreateParticipantRequest {
    CreateParticipantRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        date_of_birth: None,
        guardian_name: Some(Name().fake()),
        guardian_phone: Some("+1 555 010 0199".to_string()),
        medical_notes: None,
    }
}

/// Helper function to create a staff request
pub fn create_staff_request() -> CreateStaffRequest {
    CreateStaffRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        role_title: "Instructor".to_string(),
        email: Some(SafeEmail().fake()),
        phone: None,
        certifications: Some(vec!["first-aid".to_string()]),
    }
}
