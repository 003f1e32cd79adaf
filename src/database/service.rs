//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    CampRepository, DatabasePool, DesignRepository, LeadRepository, OrderRepository,
    ResearchRepository, RosterRepository, ScheduleRepository, TravelRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub leads: LeadRepository,
    pub orders: OrderRepository,
    pub designs: DesignRepository,
    pub camps: CampRepository,
    pub rosters: RosterRepository,
    pub schedules: ScheduleRepository,
    pub travel: TravelRepository,
    pub research: ResearchRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            leads: LeadRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            designs: DesignRepository::new(pool.clone()),
            camps: CampRepository::new(pool.clone()),
            rosters: RosterRepository::new(pool.clone()),
            schedules: ScheduleRepository::new(pool.clone()),
            travel: TravelRepository::new(pool.clone()),
            research: ResearchRepository::new(pool),
        }
    }
}
