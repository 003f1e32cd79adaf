//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod camp;
pub mod design;
pub mod lead;
pub mod logistics;
pub mod mailbox;
pub mod navigation;
pub mod order;
pub mod redis;
pub mod research;
pub mod roster;
pub mod user;

// Re-export commonly used services
pub use auth::{AuthContext, AuthService, Claims, Permission};
pub use camp::CampService;
pub use design::DesignService;
pub use lead::LeadService;
pub use logistics::LogisticsService;
pub use mailbox::MailboxService;
pub use navigation::{navigation_for, NavEntry, NavigationService};
pub use order::OrderService;
pub use redis::RedisService;
pub use research::ResearchService;
pub use roster::RosterService;
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub lead_service: LeadService,
    pub order_service: OrderService,
    pub design_service: DesignService,
    pub camp_service: CampService,
    pub roster_service: RosterService,
    pub logistics_service: LogisticsService,
    pub research_service: ResearchService,
    pub navigation_service: NavigationService,
    pub mailbox_service: MailboxService,
    pub redis_service: RedisService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, database: &DatabaseService) -> Result<Self> {
        let redis_service = RedisService::new(settings.clone())?;

        let auth_service = AuthService::new(
            settings.clone(),
            database.users.clone(),
            redis_service.clone(),
        );
        let user_service = UserService::new(database.users.clone());
        let lead_service = LeadService::new(database.leads.clone(), database.designs.clone());
        let order_service = OrderService::new(database.orders.clone());
        let design_service = DesignService::new(database.designs.clone());
        let camp_service = CampService::new(database.camps.clone(), database.rosters.clone());
        let roster_service = RosterService::new(database.rosters.clone(), database.camps.clone());
        let logistics_service = LogisticsService::new(
            database.schedules.clone(),
            database.travel.clone(),
            database.camps.clone(),
            database.rosters.clone(),
        );
        let research_service = ResearchService::new(database.research.clone());
        let navigation_service = NavigationService::new(redis_service.clone());
        let mailbox_service = MailboxService::new();

        Ok(Self {
            auth_service,
            user_service,
            lead_service,
            order_service,
            design_service,
            camp_service,
            roster_service,
            logistics_service,
            research_service,
            navigation_service,
            mailbox_service,
            redis_service,
        })
    }

    /// Health check for backing services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let redis_healthy = self.redis_service.health_check().await.unwrap_or(false);

        ServiceHealthStatus { redis_healthy }
    }
}

/// Health status for backing services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub redis_healthy: bool,
}

impl ServiceHealthStatus {
    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.redis_healthy {
            issues.push("Redis connection failed".to_string());
        }

        issues
    }
}
